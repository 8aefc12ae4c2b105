//! CSV file price source adapter.
//!
//! One file per symbol (`<SYMBOL>.csv`) with columns
//! `timestamp,open,high,low,close,volume`. Timestamps are either
//! `YYYY-MM-DD HH:MM:SS` or a bare date, which maps to midnight (where
//! daily bars live). The whole directory is loaded eagerly; lookups during
//! the simulation never touch the disk.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::error::TickfolioError;
use crate::domain::quote::{Bar, PriceField, Resolution};
use crate::ports::price_port::PricePort;

pub struct CsvPriceSource {
    resolution: Resolution,
    series: HashMap<String, BTreeMap<NaiveDateTime, Bar>>,
}

impl CsvPriceSource {
    /// Load every `*.csv` in `dir`. The file stem is the symbol.
    pub fn load(dir: &Path, resolution: Resolution) -> Result<Self, TickfolioError> {
        let entries = fs::read_dir(dir).map_err(|e| TickfolioError::Data {
            reason: format!("failed to read directory {}: {}", dir.display(), e),
        })?;

        let mut series = HashMap::new();
        for entry in entries {
            let entry = entry.map_err(|e| TickfolioError::Data {
                reason: format!("directory entry error: {}", e),
            })?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("csv") {
                continue;
            }
            let Some(symbol) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            series.insert(symbol.to_string(), load_bars(&path)?);
        }

        Ok(CsvPriceSource { resolution, series })
    }

    pub fn symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self.series.keys().cloned().collect();
        symbols.sort();
        symbols
    }

    pub fn bar_count(&self, symbol: &str) -> usize {
        self.series.get(symbol).map_or(0, |bars| bars.len())
    }

    /// First and last bar timestamp for a symbol, if it has any data.
    pub fn data_range(&self, symbol: &str) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let bars = self.series.get(symbol)?;
        let first = bars.keys().next()?;
        let last = bars.keys().next_back()?;
        Some((*first, *last))
    }
}

impl PricePort for CsvPriceSource {
    fn resolution(&self) -> Resolution {
        self.resolution
    }

    fn price(&self, symbol: &str, timestamp: NaiveDateTime, field: PriceField) -> Option<f64> {
        self.series
            .get(symbol)?
            .get(&timestamp)
            .map(|bar| bar.field(field))
    }

    fn timeline(&self, start: NaiveDateTime, end: NaiveDateTime) -> Vec<NaiveDateTime> {
        let mut stamps: Vec<NaiveDateTime> = self
            .series
            .values()
            .flat_map(|bars| bars.range(start..=end).map(|(ts, _)| *ts))
            .collect();
        stamps.sort();
        stamps.dedup();
        stamps
    }
}

fn load_bars(path: &PathBuf) -> Result<BTreeMap<NaiveDateTime, Bar>, TickfolioError> {
    let content = fs::read_to_string(path).map_err(|e| TickfolioError::Data {
        reason: format!("failed to read {}: {}", path.display(), e),
    })?;

    let mut rdr = csv::Reader::from_reader(content.as_bytes());
    let mut bars = BTreeMap::new();

    for result in rdr.records() {
        let record = result.map_err(|e| TickfolioError::Data {
            reason: format!("CSV parse error in {}: {}", path.display(), e),
        })?;

        let timestamp = parse_timestamp(get_column(&record, 0, "timestamp", path)?)
            .ok_or_else(|| TickfolioError::Data {
                reason: format!(
                    "invalid timestamp {:?} in {}",
                    record.get(0).unwrap_or(""),
                    path.display()
                ),
            })?;

        let open = parse_price(&record, 1, "open", path)?;
        let high = parse_price(&record, 2, "high", path)?;
        let low = parse_price(&record, 3, "low", path)?;
        let close = parse_price(&record, 4, "close", path)?;
        let volume: i64 = get_column(&record, 5, "volume", path)?
            .parse()
            .map_err(|e| TickfolioError::Data {
                reason: format!("invalid volume value in {}: {}", path.display(), e),
            })?;

        bars.insert(
            timestamp,
            Bar {
                timestamp,
                open,
                high,
                low,
                close,
                volume,
            },
        );
    }

    Ok(bars)
}

fn get_column<'r>(
    record: &'r csv::StringRecord,
    index: usize,
    name: &str,
    path: &Path,
) -> Result<&'r str, TickfolioError> {
    record.get(index).ok_or_else(|| TickfolioError::Data {
        reason: format!("missing {} column in {}", name, path.display()),
    })
}

fn parse_price(
    record: &csv::StringRecord,
    index: usize,
    name: &str,
    path: &Path,
) -> Result<f64, TickfolioError> {
    get_column(record, index, name, path)?
        .parse()
        .map_err(|e| TickfolioError::Data {
            reason: format!("invalid {} value in {}: {}", name, path.display(), e),
        })
}

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    if let Ok(ts) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(ts);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN))
}
