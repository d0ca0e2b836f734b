//! Configuration types for poly-hedge

use chrono::Duration;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::PathBuf;

use crate::backtest::DEFAULT_SLIPPAGE;
use crate::optimizer::ParameterGrid;
use crate::risk::TierSizing;
use crate::round::DEFAULT_MIN_TICKS;
use crate::telemetry::LogFormat;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub strategy: StrategyConfig,
    #[serde(default)]
    pub grid: ParameterGrid,
    #[serde(default)]
    pub optimizer: OptimizerConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub sizing: TierSizing,
}

/// Simulation settings shared by every configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StrategyConfig {
    /// Added to the ask on every simulated fill
    #[serde(default = "default_slippage")]
    pub slippage: Decimal,

    /// Rounds with fewer usable ticks are excluded
    #[serde(default = "default_min_ticks")]
    pub min_ticks: usize,

    /// Length of every market round
    #[serde(default = "default_round_duration_minutes")]
    pub round_duration_minutes: u64,
}

fn default_slippage() -> Decimal {
    DEFAULT_SLIPPAGE
}
fn default_min_ticks() -> usize {
    DEFAULT_MIN_TICKS
}
fn default_round_duration_minutes() -> u64 {
    5
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            slippage: DEFAULT_SLIPPAGE,
            min_ticks: DEFAULT_MIN_TICKS,
            round_duration_minutes: 5,
        }
    }
}

impl StrategyConfig {
    /// Round length as a duration
    pub fn round_duration(&self) -> Duration {
        Duration::minutes(self.round_duration_minutes as i64)
    }
}

/// Sweep execution and reporting
#[derive(Debug, Clone, Deserialize)]
pub struct OptimizerConfig {
    /// Worker threads; 0 means available cores minus one
    #[serde(default)]
    pub workers: usize,

    /// Rows in the profitable table
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Rows in the worst-losses table
    #[serde(default = "default_bottom_n")]
    pub bottom_n: usize,

    /// Wall-clock budget for a whole sweep
    #[serde(default)]
    pub time_budget_secs: Option<u64>,
}

fn default_top_n() -> usize {
    10
}
fn default_bottom_n() -> usize {
    5
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            workers: 0,
            top_n: 10,
            bottom_n: 5,
            time_budget_secs: None,
        }
    }
}

/// Round cache and result locations
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Directory holding `markets.json` and `prices_*.json`
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    /// Directory for optimisation results
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("./data")
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./results")
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
            output_dir: default_output_dir(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
    /// Prometheus listener port; no exporter when unset
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            metrics_port: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the simulator cannot honor
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.strategy.slippage >= Decimal::ZERO,
            "strategy.slippage must be non-negative, got {}",
            self.strategy.slippage
        );
        anyhow::ensure!(
            self.strategy.round_duration_minutes > 0,
            "strategy.round_duration_minutes must be positive"
        );
        Ok(())
    }
}
