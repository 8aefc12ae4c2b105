#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::HashMap;
use tickfolio::domain::quote::{Bar, PriceField, Resolution};
use tickfolio::ports::price_port::PricePort;

pub struct MockPriceSource {
    pub resolution: Resolution,
    pub bars: HashMap<(String, NaiveDateTime), Bar>,
}

impl MockPriceSource {
    pub fn new(resolution: Resolution) -> Self {
        Self {
            resolution,
            bars: HashMap::new(),
        }
    }

    pub fn with_close(self, symbol: &str, ts: NaiveDateTime, close: f64) -> Self {
        self.with_bar(symbol, ts, close, close, close, close)
    }

    pub fn with_bar(
        mut self,
        symbol: &str,
        ts: NaiveDateTime,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
    ) -> Self {
        self.bars.insert(
            (symbol.to_string(), ts),
            Bar {
                timestamp: ts,
                open,
                high,
                low,
                close,
                volume: 1_000,
            },
        );
        self
    }
}

impl PricePort for MockPriceSource {
    fn resolution(&self) -> Resolution {
        self.resolution
    }

    fn price(&self, symbol: &str, timestamp: NaiveDateTime, field: PriceField) -> Option<f64> {
        self.bars
            .get(&(symbol.to_string(), timestamp))
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

pub fn ts(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

pub fn midnight(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, day)
        .unwrap()
        .and_time(NaiveTime::MIN)
}
