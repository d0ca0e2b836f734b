//! Data access module
//!
//! Supplies fully materialized rounds to the optimizer and persists its
//! results. Where rounds come from (fresh download or on-disk cache) is
//! invisible to simulation.

mod cache;
mod parquet;
mod writer;

pub use self::cache::{JsonCacheSource, MARKETS_FILE};
pub use self::parquet::{read_result_rows, result_schema, ResultRow};
pub use self::writer::{ResultWriter, JSON_FILE, PARQUET_FILE};

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use crate::round::MarketRound;

/// Data access errors
#[derive(Debug, Error)]
pub enum DataError {
    /// Filesystem failure
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Malformed JSON
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// No cache index in the configured directory
    #[error("No round cache at {0}")]
    MissingCache(PathBuf),
    /// Parquet encoding failure
    #[error("Parquet error: {0}")]
    Parquet(#[from] ::parquet::errors::ParquetError),
    /// Arrow batch construction failure
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

/// Source of historical rounds
#[async_trait]
pub trait RoundSource: Send + Sync {
    /// Load every available round
    async fn load_rounds(&self) -> Result<Vec<MarketRound>, DataError>;

    /// Short name for logs
    fn name(&self) -> &'static str;
}

/// Rounds already held in memory
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    rounds: Vec<MarketRound>,
}

impl StaticSource {
    /// Wrap a set of rounds
    pub fn new(rounds: Vec<MarketRound>) -> Self {
        Self { rounds }
    }
}

#[async_trait]
impl RoundSource for StaticSource {
    async fn load_rounds(&self) -> Result<Vec<MarketRound>, DataError> {
        Ok(self.rounds.clone())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}
