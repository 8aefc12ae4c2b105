//! Pending conditional orders and order-type labels.

use std::fmt;

/// Buy or sell, derived from the sign of the share quantity. Share signs
/// carry direction throughout the engine; call sites should go through
/// [`Order::direction`] rather than comparing signs directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Buy,
    Sell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderType {
    Market,
    BuyStop,
    SellStop,
    BuyLimit,
    SellLimit,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OrderType::Market => "Market Order",
            OrderType::BuyStop => "Buy Stop Order",
            OrderType::SellStop => "Sell Stop Order",
            OrderType::BuyLimit => "Buy Limit Order",
            OrderType::SellLimit => "Sell Limit Order",
        };
        f.write_str(label)
    }
}

/// A stop or limit order waiting in the pending book. Sell orders are
/// stored with negated shares. Immutable once enqueued.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub symbol: String,
    pub shares: f64,
    pub trigger_price: f64,
    pub order_type: OrderType,
}

impl Order {
    pub fn new(symbol: &str, shares: f64, trigger_price: f64, order_type: OrderType) -> Self {
        Order {
            symbol: symbol.to_string(),
            shares,
            trigger_price,
            order_type,
        }
    }

    pub fn direction(&self) -> Side {
        if self.shares > 0.0 { Side::Buy } else { Side::Sell }
    }

    /// Trigger rule. Limit orders fire in the favorable direction (buy on
    /// a dip to the threshold, sell on a rise to it); stop orders fire in
    /// the adverse direction (buy on a rise, sell on a fall). Threshold
    /// touches count as crossed.
    ///
    /// The stop directions follow the conventional brokerage reading: a
    /// buy stop chases a breakout upward, a sell stop cuts a loss on the
    /// way down. Some engines instead trigger every buy at-or-below and
    /// every sell at-or-above; that reading cannot express a protective
    /// stop and is deliberately not used here.
    pub fn triggers_at(&self, price: f64) -> bool {
        match self.order_type {
            OrderType::BuyLimit | OrderType::SellStop => price <= self.trigger_price,
            OrderType::SellLimit | OrderType::BuyStop => price >= self.trigger_price,
            // Market orders never sit in a pending book.
            OrderType::Market => false,
        }
    }
}
