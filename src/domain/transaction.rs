//! Transaction records and outcome statuses.

use chrono::NaiveDateTime;
use std::fmt;

use super::order::OrderType;

/// Outcome of an order attempt. Failures are data, not faults: the
/// simulation continues and the caller branches on the status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Successful,
    FailedSymbolNotFound,
    FailedInsufficientFunds,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Status::Successful => "SUCCESSFUL",
            Status::FailedSymbolNotFound => "FAILED_SYMBOL_NOT_FOUND",
            Status::FailedInsufficientFunds => "FAILED_INSUFFICIENT_FUNDS",
        };
        f.write_str(label)
    }
}

/// Immutable record of one order attempt, successful or not. The ordered
/// sequence held by the portfolio forms the audit trail.
///
/// `simulated_price` is the slippage-adjusted fill price; it is absent when
/// the attempt failed before pricing. `cash_balance` is the balance after
/// the attempt settled (unchanged on failure).
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub symbol: String,
    pub shares: f64,
    pub theoretical_price: Option<f64>,
    pub simulated_price: Option<f64>,
    pub timestamp: Option<NaiveDateTime>,
    pub cash_balance: f64,
    pub status: Status,
    pub fees: f64,
    pub order_type: OrderType,
}
