//! Slippage model: worse-than-quote fills biased toward the daily high.

use chrono::{NaiveDateTime, NaiveTime};

use super::quote::PriceField;
use crate::ports::price_port::PricePort;

/// Compute the slippage-adjusted execution price for a fill.
///
/// At non-daily resolutions the quote is assumed accurate enough and the
/// theoretical price is returned unchanged. At daily resolution the fill
/// is pushed toward the day's high in proportion to `slippage_percent`:
///
/// `theoretical + (daily_high - theoretical) * slippage_percent / 100`
///
/// Returns `None` when the day's high is unavailable; the caller must
/// treat that as a symbol-not-found outcome, never as a valid price.
pub fn adjusted_price(
    source: &dyn PricePort,
    theoretical_price: f64,
    slippage_percent: f64,
    symbol: &str,
    timestamp: NaiveDateTime,
) -> Option<f64> {
    if !source.resolution().is_daily() {
        return Some(theoretical_price);
    }

    let midnight = timestamp.date().and_time(NaiveTime::MIN);
    let daily_high = source.price(symbol, midnight, PriceField::High)?;
    let factor = (daily_high - theoretical_price) * (slippage_percent / 100.0);
    Some(theoretical_price + factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::quote::Resolution;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    struct FixedSource {
        resolution: Resolution,
        highs: HashMap<String, f64>,
    }

    impl FixedSource {
        fn daily(symbol: &str, high: f64) -> Self {
            let mut highs = HashMap::new();
            highs.insert(symbol.to_string(), high);
            FixedSource {
                resolution: Resolution::Daily,
                highs,
            }
        }
    }

    impl PricePort for FixedSource {
        fn resolution(&self) -> Resolution {
            self.resolution
        }

        fn price(
            &self,
            symbol: &str,
            timestamp: NaiveDateTime,
            field: PriceField,
        ) -> Option<f64> {
            // Daily bars live at midnight.
            if timestamp.time() != NaiveTime::MIN || field != PriceField::High {
                return None;
            }
            self.highs.get(symbol).copied()
        }

        fn timeline(&self, _start: NaiveDateTime, _end: NaiveDateTime) -> Vec<NaiveDateTime> {
            Vec::new()
        }
    }

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn non_daily_resolution_is_a_no_op() {
        let source = FixedSource {
            resolution: Resolution::Minute,
            highs: HashMap::new(),
        };
        let price = adjusted_price(&source, 100.0, 10.0, "AAPL", noon()).unwrap();
        assert!((price - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn daily_resolution_biases_toward_high() {
        // theoretical 100, high 110, 10% -> 100 + (110 - 100) * 0.10 = 101
        let source = FixedSource::daily("AAPL", 110.0);
        let price = adjusted_price(&source, 100.0, 10.0, "AAPL", noon()).unwrap();
        assert!((price - 101.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_slippage_returns_theoretical() {
        let source = FixedSource::daily("AAPL", 110.0);
        let price = adjusted_price(&source, 100.0, 0.0, "AAPL", noon()).unwrap();
        assert!((price - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn full_slippage_reaches_the_high() {
        let source = FixedSource::daily("AAPL", 110.0);
        let price = adjusted_price(&source, 100.0, 100.0, "AAPL", noon()).unwrap();
        assert!((price - 110.0).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_daily_high_is_none() {
        let source = FixedSource::daily("AAPL", 110.0);
        assert!(adjusted_price(&source, 100.0, 10.0, "MSFT", noon()).is_none());
    }

    #[test]
    fn lookup_truncates_timestamp_to_midnight() {
        // The fixture only answers at midnight, so a fill quoted intraday
        // still resolves its daily high.
        let source = FixedSource::daily("AAPL", 120.0);
        let price = adjusted_price(&source, 100.0, 50.0, "AAPL", noon()).unwrap();
        assert!((price - 110.0).abs() < f64::EPSILON);
    }
}
