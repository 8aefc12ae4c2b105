//! Holdings ledger: net open positions per symbol.

use std::collections::HashMap;

/// Net position in one symbol. Positive shares are long, negative short.
/// A holding never exists with exactly zero shares; the ledger removes it
/// when a fill nets the position out.
#[derive(Debug, Clone, PartialEq)]
pub struct Holding {
    pub symbol: String,
    pub shares: f64,
    pub avg_price: f64,
    pub mark_price: f64,
}

impl Holding {
    pub fn is_long(&self) -> bool {
        self.shares > 0.0
    }

    pub fn is_short(&self) -> bool {
        self.shares < 0.0
    }

    /// Signed value at the current mark price.
    pub fn market_value(&self) -> f64 {
        self.shares * self.mark_price
    }

    /// Merge a fill into the position.
    ///
    /// Same-direction adds recompute a weighted average entry price;
    /// partial offsets reduce shares and keep the average; a fill that
    /// crosses through zero is treated as close-then-reopen, so the
    /// remainder carries the fill price as its entry price.
    fn apply_fill(&mut self, shares: f64, price: f64) {
        let old = self.shares;
        let new = old + shares;

        if old == 0.0 || shares.signum() == old.signum() {
            self.avg_price = (old * self.avg_price + shares * price) / new;
        } else if new != 0.0 && new.signum() != old.signum() {
            self.avg_price = price;
        }

        self.shares = new;
        self.mark_price = price;
    }
}

/// Symbol-to-holding map. All mutation goes through [`apply_fill`] and
/// [`set_mark_price`] so the no-zero-share invariant holds everywhere.
///
/// [`apply_fill`]: HoldingsLedger::apply_fill
/// [`set_mark_price`]: HoldingsLedger::set_mark_price
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HoldingsLedger {
    positions: HashMap<String, Holding>,
}

impl HoldingsLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply_fill(&mut self, symbol: &str, shares: f64, price: f64) {
        let holding = self
            .positions
            .entry(symbol.to_string())
            .or_insert_with(|| Holding {
                symbol: symbol.to_string(),
                shares: 0.0,
                avg_price: 0.0,
                mark_price: price,
            });
        holding.apply_fill(shares, price);
        if holding.shares == 0.0 {
            self.positions.remove(symbol);
        }
    }

    pub fn get(&self, symbol: &str) -> Option<&Holding> {
        self.positions.get(symbol)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.positions.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Holding> {
        self.positions.values()
    }

    pub fn symbols(&self) -> Vec<String> {
        self.positions.keys().cloned().collect()
    }

    pub fn set_mark_price(&mut self, symbol: &str, price: f64) {
        if let Some(holding) = self.positions.get_mut(symbol) {
            holding.mark_price = price;
        }
    }

    /// Sum of signed market values across all holdings.
    pub fn total_market_value(&self) -> f64 {
        self.positions.values().map(|h| h.market_value()).sum()
    }
}
