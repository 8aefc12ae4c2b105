//! INI configuration adapter.
//!
//! Loads [`SimulationConfig`] and the demo strategy parameters from an INI
//! file with `[simulation]`, `[data]`, and `[strategy]` sections.

use chrono::{NaiveDate, NaiveTime};
use configparser::ini::Ini;
use std::path::{Path, PathBuf};

use crate::domain::config::SimulationConfig;
use crate::domain::error::TickfolioError;
use crate::domain::quote::Resolution;

/// Demo buy-and-hold parameters for the CLI `run` command.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyConfig {
    pub symbol: String,
    pub shares: f64,
}

pub fn load_simulation_config(path: &Path) -> Result<SimulationConfig, TickfolioError> {
    let ini = load_ini(path)?;

    let start_balance = require_float(&ini, "simulation", "start_balance")?;
    let slippage_percent = float_or(&ini, "simulation", "slippage_percent", 0.0)?;
    let transaction_fees = float_or(&ini, "simulation", "transaction_fees", 0.0)?;
    let resolution = resolution_or(&ini, "simulation", "resolution", Resolution::Daily)?;
    let start = parse_date(&ini, "simulation", "start_date")?.and_time(NaiveTime::MIN);
    // The end date is inclusive: cover its intraday bars too.
    let end = parse_date(&ini, "simulation", "end_date")?.and_time(NaiveTime::MIN)
        + chrono::Duration::days(1)
        - chrono::Duration::seconds(1);
    let data_dir = PathBuf::from(require_string(&ini, "data", "csv_dir")?);

    let config = SimulationConfig {
        start_balance,
        slippage_percent,
        transaction_fees,
        resolution,
        start,
        end,
        data_dir,
    };
    config.validate()?;
    Ok(config)
}

pub fn load_strategy_config(path: &Path) -> Result<StrategyConfig, TickfolioError> {
    let ini = load_ini(path)?;
    let symbol = require_string(&ini, "strategy", "symbol")?;
    let shares = require_float(&ini, "strategy", "shares")?;
    Ok(StrategyConfig { symbol, shares })
}

fn load_ini(path: &Path) -> Result<Ini, TickfolioError> {
    let mut ini = Ini::new();
    ini.load(path).map_err(|reason| TickfolioError::ConfigParse {
        file: path.display().to_string(),
        reason,
    })?;
    Ok(ini)
}

fn require_string(ini: &Ini, section: &str, key: &str) -> Result<String, TickfolioError> {
    ini.get(section, key).ok_or_else(|| TickfolioError::ConfigMissing {
        section: section.to_string(),
        key: key.to_string(),
    })
}

fn require_float(ini: &Ini, section: &str, key: &str) -> Result<f64, TickfolioError> {
    match ini.getfloat(section, key) {
        Ok(Some(value)) => Ok(value),
        Ok(None) => Err(TickfolioError::ConfigMissing {
            section: section.to_string(),
            key: key.to_string(),
        }),
        Err(reason) => Err(TickfolioError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason,
        }),
    }
}

fn float_or(ini: &Ini, section: &str, key: &str, default: f64) -> Result<f64, TickfolioError> {
    match ini.getfloat(section, key) {
        Ok(Some(value)) => Ok(value),
        Ok(None) => Ok(default),
        Err(reason) => Err(TickfolioError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason,
        }),
    }
}

fn resolution_or(
    ini: &Ini,
    section: &str,
    key: &str,
    default: Resolution,
) -> Result<Resolution, TickfolioError> {
    match ini.get(section, key) {
        None => Ok(default),
        Some(value) => Resolution::parse(&value).ok_or_else(|| TickfolioError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: format!("unknown resolution {:?}, expected 1day, 1hour, or 1min", value),
        }),
    }
}

fn parse_date(ini: &Ini, section: &str, key: &str) -> Result<NaiveDate, TickfolioError> {
    let value = require_string(ini, section, key)?;
    NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|e| TickfolioError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: e.to_string(),
    })
}
