//! Simulation configuration and validation.

use chrono::NaiveDateTime;
use std::path::PathBuf;

use super::error::TickfolioError;
use super::quote::Resolution;

/// Parameters for one simulation run, typically loaded from an INI file by
/// the config adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub start_balance: f64,
    pub slippage_percent: f64,
    pub transaction_fees: f64,
    pub resolution: Resolution,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub data_dir: PathBuf,
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), TickfolioError> {
        if !self.start_balance.is_finite() || self.start_balance <= 0.0 {
            return Err(invalid(
                "start_balance",
                format!("must be a positive number, got {}", self.start_balance),
            ));
        }
        if !self.slippage_percent.is_finite() || self.slippage_percent < 0.0 {
            return Err(invalid(
                "slippage_percent",
                format!("must be non-negative, got {}", self.slippage_percent),
            ));
        }
        if !self.transaction_fees.is_finite() || self.transaction_fees < 0.0 {
            return Err(invalid(
                "transaction_fees",
                format!("must be non-negative, got {}", self.transaction_fees),
            ));
        }
        if self.start > self.end {
            return Err(invalid(
                "start_date",
                format!("start {} is after end {}", self.start, self.end),
            ));
        }
        Ok(())
    }
}

fn invalid(key: &str, reason: String) -> TickfolioError {
    TickfolioError::ConfigInvalid {
        section: "simulation".to_string(),
        key: key.to_string(),
        reason,
    }
}
