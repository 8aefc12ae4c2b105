//! Concrete adapter implementations for ports.

pub mod csv_price_source;
pub mod ini_config;
