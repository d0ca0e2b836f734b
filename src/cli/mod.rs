//! CLI interface for poly-hedge
//!
//! Provides subcommands for:
//! - `optimize`: Sweep the parameter grid over cached rounds
//! - `simulate`: Backtest a single configuration
//! - `config`: Show the effective configuration

mod optimize;
mod simulate;

pub use optimize::{OptimizeArgs, OutputFormat};
pub use simulate::SimulateArgs;

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::Path;

use crate::config::Config;
use crate::data::{JsonCacheSource, RoundSource};
use crate::round::RoundSet;

#[derive(Parser, Debug)]
#[command(name = "poly-hedge")]
#[command(about = "Dual-leg hedge backtester and parameter optimizer for Polymarket BTC up/down rounds")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Grid search over strategy parameters
    Optimize(OptimizeArgs),
    /// Backtest one parameter set
    Simulate(SimulateArgs),
    /// Show configuration
    Config,
}

/// Load cached rounds and validate them once
async fn load_round_set(config: &Config, data_dir: &Path) -> anyhow::Result<RoundSet> {
    let source = JsonCacheSource::new(data_dir, config.strategy.round_duration());
    let raw = source
        .load_rounds()
        .await
        .with_context(|| format!("Failed to load rounds from {} source", source.name()))?;
    Ok(RoundSet::prepare(raw, config.strategy.min_ticks))
}
