//! Portfolio orchestration: order execution, bookkeeping, and valuation.

use chrono::NaiveDateTime;

use super::error::TickfolioError;
use super::holding::HoldingsLedger;
use super::order::{Order, OrderType, Side};
use super::slippage;
use super::transaction::{Status, Transaction};
use crate::domain::quote::PriceField;
use crate::ports::price_port::PricePort;

/// The four pending-order books, in their fixed tick evaluation order:
/// stops before limits, buys before sells within each.
#[derive(Debug, Clone, Copy)]
enum Book {
    BuyStop,
    SellStop,
    BuyLimit,
    SellLimit,
}

impl Book {
    const EVALUATION_ORDER: [Book; 4] =
        [Book::BuyStop, Book::SellStop, Book::BuyLimit, Book::SellLimit];

    fn order_type(self) -> OrderType {
        match self {
            Book::BuyStop => OrderType::BuyStop,
            Book::SellStop => OrderType::SellStop,
            Book::BuyLimit => OrderType::BuyLimit,
            Book::SellLimit => OrderType::SellLimit,
        }
    }

    fn side(self) -> Side {
        match self {
            Book::BuyStop | Book::BuyLimit => Side::Buy,
            Book::SellStop | Book::SellLimit => Side::Sell,
        }
    }
}

/// Simulated portfolio: cash, holdings, transaction history, and the
/// pending conditional-order books.
///
/// The external simulation driver owns the clock: it advances the
/// timestamp via [`set_timestamp`] and calls [`on_tick`] once per step.
/// Cash and history are mutated only inside the order-submission path.
///
/// [`set_timestamp`]: Portfolio::set_timestamp
/// [`on_tick`]: Portfolio::on_tick
pub struct Portfolio {
    start_balance: f64,
    cash_balance: f64,
    holdings: HoldingsLedger,
    transactions: Vec<Transaction>,
    timestamp: Option<NaiveDateTime>,
    source: Box<dyn PricePort>,
    slippage_percent: f64,
    transaction_fees: f64,
    pending_buy_stop: Vec<Order>,
    pending_sell_stop: Vec<Order>,
    pending_buy_limit: Vec<Order>,
    pending_sell_limit: Vec<Order>,
}

impl Portfolio {
    pub fn new(
        start_balance: f64,
        source: Box<dyn PricePort>,
        slippage_percent: f64,
        transaction_fees: f64,
    ) -> Self {
        Portfolio {
            start_balance,
            cash_balance: start_balance,
            holdings: HoldingsLedger::new(),
            transactions: Vec::new(),
            timestamp: None,
            source,
            slippage_percent,
            transaction_fees,
            pending_buy_stop: Vec::new(),
            pending_sell_stop: Vec::new(),
            pending_buy_limit: Vec::new(),
            pending_sell_limit: Vec::new(),
        }
    }

    pub fn start_balance(&self) -> f64 {
        self.start_balance
    }

    pub fn cash_balance(&self) -> f64 {
        self.cash_balance
    }

    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        self.timestamp
    }

    pub fn set_timestamp(&mut self, timestamp: NaiveDateTime) {
        self.timestamp = Some(timestamp);
    }

    pub fn holdings(&self) -> &HoldingsLedger {
        &self.holdings
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn pending_buy_stop_orders(&self) -> &[Order] {
        &self.pending_buy_stop
    }

    pub fn pending_sell_stop_orders(&self) -> &[Order] {
        &self.pending_sell_stop
    }

    pub fn pending_buy_limit_orders(&self) -> &[Order] {
        &self.pending_buy_limit
    }

    pub fn pending_sell_limit_orders(&self) -> &[Order] {
        &self.pending_sell_limit
    }

    /// Buy or sell at the current quote, adjusted for slippage and fees.
    /// Negative `shares` sells. Always records a transaction; the status
    /// says whether it filled.
    pub fn market_order(
        &mut self,
        symbol: &str,
        shares: f64,
    ) -> Result<Transaction, TickfolioError> {
        validate_shares(symbol, shares)?;
        Ok(self.submit(symbol, shares, OrderType::Market))
    }

    /// Order to buy once the price has fallen to `price` or below.
    pub fn buy_limit_order(
        &mut self,
        symbol: &str,
        shares: f64,
        price: f64,
    ) -> Result<(), TickfolioError> {
        self.enqueue(Book::BuyLimit, symbol, shares, price)
    }

    /// Order to sell once the price has risen to `price` or above.
    pub fn sell_limit_order(
        &mut self,
        symbol: &str,
        shares: f64,
        price: f64,
    ) -> Result<(), TickfolioError> {
        self.enqueue(Book::SellLimit, symbol, shares, price)
    }

    /// Order to buy once the price has risen to `price` or above.
    pub fn buy_stop_order(
        &mut self,
        symbol: &str,
        shares: f64,
        price: f64,
    ) -> Result<(), TickfolioError> {
        self.enqueue(Book::BuyStop, symbol, shares, price)
    }

    /// Order to sell once the price has fallen to `price` or below.
    pub fn sell_stop_order(
        &mut self,
        symbol: &str,
        shares: f64,
        price: f64,
    ) -> Result<(), TickfolioError> {
        self.enqueue(Book::SellStop, symbol, shares, price)
    }

    /// Evaluate the pending books against current prices. Called once per
    /// simulation step by the driver.
    ///
    /// Each book is snapshot first and triggered entries are removed only
    /// after the scan completes, so a fired order can neither skip nor
    /// double-fire entries in the same book. A triggered order goes
    /// through the market path with its label preserved and leaves the
    /// book whatever its fill outcome.
    pub fn on_tick(&mut self) {
        for book in Book::EVALUATION_ORDER {
            self.evaluate_book(book);
        }
    }

    /// Refresh every holding's mark price from the source and return
    /// cash plus the signed market value of all holdings. Symbols with no
    /// current quote keep their last mark.
    pub fn update_and_get_balance(&mut self) -> f64 {
        if let Some(ts) = self.timestamp {
            for symbol in self.holdings.symbols() {
                if let Some(price) = self.source.price(&symbol, ts, PriceField::Close) {
                    self.holdings.set_mark_price(&symbol, price);
                }
            }
        }
        self.cash_balance + self.holdings.total_market_value()
    }

    /// Profit over the start balance, as a percentage rounded to two
    /// decimal places.
    pub fn get_percentage_profit(&mut self) -> f64 {
        let balance = self.update_and_get_balance();
        let profit = balance / self.start_balance * 100.0 - 100.0;
        (profit * 100.0).round() / 100.0
    }

    fn enqueue(
        &mut self,
        book: Book,
        symbol: &str,
        shares: f64,
        price: f64,
    ) -> Result<(), TickfolioError> {
        if !shares.is_finite() || shares <= 0.0 {
            return Err(TickfolioError::InvalidOrder {
                symbol: symbol.to_string(),
                reason: format!("share quantity must be a positive number, got {shares}"),
            });
        }
        if !price.is_finite() || price <= 0.0 {
            return Err(TickfolioError::InvalidOrder {
                symbol: symbol.to_string(),
                reason: format!("trigger price must be a positive number, got {price}"),
            });
        }

        let signed_shares = match book.side() {
            Side::Buy => shares,
            Side::Sell => -shares,
        };
        let order = Order::new(symbol, signed_shares, price, book.order_type());
        self.book_mut(book).push(order);
        Ok(())
    }

    fn evaluate_book(&mut self, book: Book) {
        let Some(ts) = self.timestamp else {
            return;
        };

        let snapshot = self.book_mut(book).clone();
        let mut triggered = Vec::new();
        for (index, order) in snapshot.iter().enumerate() {
            let Some(price) = self.source.price(&order.symbol, ts, PriceField::Close) else {
                continue;
            };
            if order.triggers_at(price) {
                triggered.push(index);
            }
        }

        for &index in &triggered {
            let order = &snapshot[index];
            self.submit(&order.symbol, order.shares, order.order_type);
        }

        let live = self.book_mut(book);
        for &index in triggered.iter().rev() {
            live.remove(index);
        }
    }

    /// Validate funds, price the fill, settle cash, and record the
    /// transaction. The only path that mutates cash and history.
    fn submit(&mut self, symbol: &str, shares: f64, order_type: OrderType) -> Transaction {
        let quote = match self.timestamp {
            Some(ts) => self
                .source
                .price(symbol, ts, PriceField::Close)
                .map(|price| (ts, price)),
            None => None,
        };

        let (theoretical_price, simulated_price, status) = match quote {
            None => (None, None, Status::FailedSymbolNotFound),
            Some((ts, theoretical)) => {
                match slippage::adjusted_price(
                    self.source.as_ref(),
                    theoretical,
                    self.slippage_percent,
                    symbol,
                    ts,
                ) {
                    // Daily high unavailable: cannot price the fill.
                    None => (Some(theoretical), None, Status::FailedSymbolNotFound),
                    Some(simulated) => {
                        let total_cost = shares * simulated + self.transaction_fees;
                        if self.cash_balance >= total_cost {
                            self.cash_balance -= total_cost;
                            self.holdings.apply_fill(symbol, shares, simulated);
                            (Some(theoretical), Some(simulated), Status::Successful)
                        } else {
                            (
                                Some(theoretical),
                                Some(simulated),
                                Status::FailedInsufficientFunds,
                            )
                        }
                    }
                }
            }
        };

        let transaction = Transaction {
            symbol: symbol.to_string(),
            shares,
            theoretical_price,
            simulated_price,
            timestamp: self.timestamp,
            cash_balance: self.cash_balance,
            status,
            fees: self.transaction_fees,
            order_type,
        };
        self.transactions.push(transaction.clone());
        transaction
    }

    fn book_mut(&mut self, book: Book) -> &mut Vec<Order> {
        match book {
            Book::BuyStop => &mut self.pending_buy_stop,
            Book::SellStop => &mut self.pending_sell_stop,
            Book::BuyLimit => &mut self.pending_buy_limit,
            Book::SellLimit => &mut self.pending_sell_limit,
        }
    }
}

fn validate_shares(symbol: &str, shares: f64) -> Result<(), TickfolioError> {
    if !shares.is_finite() || shares == 0.0 {
        return Err(TickfolioError::InvalidOrder {
            symbol: symbol.to_string(),
            reason: format!("share quantity must be a non-zero number, got {shares}"),
        });
    }
    Ok(())
}
