//! Core domain types and logic.

pub mod config;
pub mod error;
pub mod holding;
pub mod order;
pub mod portfolio;
pub mod quote;
pub mod simulation;
pub mod slippage;
pub mod transaction;
