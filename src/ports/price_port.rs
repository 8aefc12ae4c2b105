//! Price source port trait.

use crate::domain::quote::{PriceField, Resolution};
use chrono::NaiveDateTime;

/// A source of price quotes for the simulation. `None` from [`price`] is
/// the normal absence signal (unknown symbol or no bar at the timestamp),
/// not an error.
///
/// [`price`]: PricePort::price
pub trait PricePort {
    fn resolution(&self) -> Resolution;

    fn price(&self, symbol: &str, timestamp: NaiveDateTime, field: PriceField) -> Option<f64>;

    /// Ordered distinct bar timestamps in `[start, end]`, across all
    /// symbols. The simulation driver uses this as its clock.
    fn timeline(&self, start: NaiveDateTime, end: NaiveDateTime) -> Vec<NaiveDateTime>;
}
