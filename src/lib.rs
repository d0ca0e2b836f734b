//! poly-hedge: Dual-leg hedge backtester for Polymarket BTC up/down rounds
//!
//! This library provides the core components for:
//! - Round data model with tick cleaning and validation
//! - Deterministic per-round simulation of the two-leg hedge
//! - Outcome aggregation (profit, completion, drawdown)
//! - Parallel parameter grid search with ranked reports
//! - Round loading from the on-disk cache and result export
//! - Confidence-tier position sizing
//! - Logging and metrics

pub mod backtest;
pub mod cli;
pub mod config;
pub mod data;
pub mod optimizer;
pub mod risk;
pub mod round;
pub mod strategy;
pub mod telemetry;
