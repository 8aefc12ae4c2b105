//! Price-series granularity and bar representation.

use chrono::NaiveDateTime;

/// Granularity of the underlying price series. Slippage modelling only
/// applies at daily resolution (see [`crate::domain::slippage`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Daily,
    Hourly,
    Minute,
}

impl Resolution {
    pub fn is_daily(&self) -> bool {
        matches!(self, Resolution::Daily)
    }

    /// Wire name used in data files and configs: `1day`, `1hour`, `1min`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::Daily => "1day",
            Resolution::Hourly => "1hour",
            Resolution::Minute => "1min",
        }
    }

    pub fn parse(value: &str) -> Option<Resolution> {
        match value {
            "1day" | "daily" => Some(Resolution::Daily),
            "1hour" | "hourly" => Some(Resolution::Hourly),
            "1min" | "minute" => Some(Resolution::Minute),
            _ => None,
        }
    }
}

/// Which value of a bar a price lookup refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceField {
    Open,
    High,
    Low,
    Close,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

impl Bar {
    pub fn field(&self, field: PriceField) -> f64 {
        match field {
            PriceField::Open => self.open,
            PriceField::High => self.high,
            PriceField::Low => self.low,
            PriceField::Close => self.close,
        }
    }
}
