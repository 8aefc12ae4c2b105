//! Simulation driver: advances the clock and steps a strategy.

use chrono::NaiveDateTime;

use super::portfolio::Portfolio;

/// A trading strategy stepped once per bar. Implementations submit orders
/// through the portfolio; everything else is bookkeeping the engine owns.
pub trait Strategy {
    fn on_tick(&mut self, portfolio: &mut Portfolio);
}

#[derive(Debug, Clone, PartialEq)]
pub struct EquityPoint {
    pub timestamp: NaiveDateTime,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    pub equity_curve: Vec<EquityPoint>,
    pub final_balance: f64,
    pub percentage_profit: f64,
}

/// Run the portfolio over a timeline of bar timestamps.
///
/// Per step: set the portfolio clock, evaluate pending conditional orders,
/// step the strategy, then record marked-to-market equity. Single-threaded
/// and synchronous throughout.
pub fn run_simulation(
    portfolio: &mut Portfolio,
    strategy: &mut dyn Strategy,
    timeline: &[NaiveDateTime],
) -> SimulationResult {
    let mut equity_curve = Vec::with_capacity(timeline.len());

    for &timestamp in timeline {
        portfolio.set_timestamp(timestamp);
        portfolio.on_tick();
        strategy.on_tick(portfolio);
        let balance = portfolio.update_and_get_balance();
        equity_curve.push(EquityPoint { timestamp, balance });
    }

    let final_balance = portfolio.update_and_get_balance();
    let percentage_profit = portfolio.get_percentage_profit();

    SimulationResult {
        equity_curve,
        final_balance,
        percentage_profit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::quote::{Bar, PriceField, Resolution};
    use crate::ports::price_port::PricePort;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    struct SeriesSource {
        bars: HashMap<(String, NaiveDateTime), Bar>,
    }

    impl SeriesSource {
        fn from_closes(symbol: &str, closes: &[(NaiveDateTime, f64)]) -> Self {
            let mut bars = HashMap::new();
            for &(ts, close) in closes {
                bars.insert(
                    (symbol.to_string(), ts),
                    Bar {
                        timestamp: ts,
                        open: close,
                        high: close,
                        low: close,
                        close,
                        volume: 0,
                    },
                );
            }
            SeriesSource { bars }
        }
    }

    impl PricePort for SeriesSource {
        fn resolution(&self) -> Resolution {
            Resolution::Minute
        }

        fn price(&self, symbol: &str, ts: NaiveDateTime, field: PriceField) -> Option<f64> {
            self.bars
                .get(&(symbol.to_string(), ts))
                .map(|bar| bar.field(field))
        }

        fn timeline(&self, start: NaiveDateTime, end: NaiveDateTime) -> Vec<NaiveDateTime> {
            let mut stamps: Vec<NaiveDateTime> = self
                .bars
                .keys()
                .map(|(_, ts)| *ts)
                .filter(|ts| *ts >= start && *ts <= end)
                .collect();
            stamps.sort();
            stamps.dedup();
            stamps
        }
    }

    struct BuyOnce {
        symbol: String,
        shares: f64,
        done: bool,
    }

    impl Strategy for BuyOnce {
        fn on_tick(&mut self, portfolio: &mut Portfolio) {
            if !self.done {
                portfolio.market_order(&self.symbol, self.shares).ok();
                self.done = true;
            }
        }
    }

    struct Idle;

    impl Strategy for Idle {
        fn on_tick(&mut self, _portfolio: &mut Portfolio) {}
    }

    fn ts(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn records_one_equity_point_per_step() {
        let closes = vec![(ts(10), 100.0), (ts(11), 105.0), (ts(12), 110.0)];
        let source = SeriesSource::from_closes("AAPL", &closes);
        let timeline = source.timeline(ts(0), ts(23));
        let mut portfolio = Portfolio::new(10_000.0, Box::new(source), 0.0, 0.0);

        let mut strategy = Idle;
        let result = run_simulation(&mut portfolio, &mut strategy, &timeline);

        assert_eq!(result.equity_curve.len(), 3);
        assert!(result
            .equity_curve
            .iter()
            .all(|point| (point.balance - 10_000.0).abs() < f64::EPSILON));
        assert!((result.percentage_profit - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn buy_and_hold_tracks_price_appreciation() {
        let closes = vec![(ts(10), 100.0), (ts(11), 105.0), (ts(12), 110.0)];
        let source = SeriesSource::from_closes("AAPL", &closes);
        let timeline = source.timeline(ts(0), ts(23));
        let mut portfolio = Portfolio::new(10_000.0, Box::new(source), 0.0, 0.0);

        let mut strategy = BuyOnce {
            symbol: "AAPL".into(),
            shares: 10.0,
            done: false,
        };
        let result = run_simulation(&mut portfolio, &mut strategy, &timeline);

        // Bought 10 @ 100 on the first bar; final mark at 110.
        assert!((result.final_balance - 10_100.0).abs() < f64::EPSILON);
        assert!((result.percentage_profit - 1.0).abs() < f64::EPSILON);
        assert!((result.equity_curve[0].balance - 10_000.0).abs() < f64::EPSILON);
        assert!((result.equity_curve[2].balance - 10_100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn pending_stop_fires_during_the_run() {
        let closes = vec![(ts(10), 100.0), (ts(11), 94.0)];
        let source = SeriesSource::from_closes("AAPL", &closes);
        let timeline = source.timeline(ts(0), ts(23));
        let mut portfolio = Portfolio::new(10_000.0, Box::new(source), 0.0, 0.0);
        portfolio.set_timestamp(ts(10));
        portfolio.market_order("AAPL", 10.0).unwrap();
        portfolio.sell_stop_order("AAPL", 10.0, 95.0).unwrap();

        let mut strategy = Idle;
        run_simulation(&mut portfolio, &mut strategy, &timeline[1..]);

        // The drop to 94 crossed the stop; the position is sold out and
        // the book is empty.
        assert!(portfolio.pending_sell_stop_orders().is_empty());
        assert!(!portfolio.holdings().contains("AAPL"));
        assert!((portfolio.cash_balance() - 9_940.0).abs() < f64::EPSILON);
    }
}
