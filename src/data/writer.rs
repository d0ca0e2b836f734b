//! Sweep result persistence

use std::fs;
use std::path::{Path, PathBuf};

use super::parquet::{write_result_rows, ResultRow};
use super::DataError;
use crate::optimizer::OptimizationReport;

/// Full report file name
pub const JSON_FILE: &str = "optimisation_results.json";
/// Flat result table file name
pub const PARQUET_FILE: &str = "optimisation_results.parquet";

/// Writes optimization reports to an output directory
#[derive(Debug, Clone)]
pub struct ResultWriter {
    output_dir: PathBuf,
}

impl ResultWriter {
    /// Create a writer for the given directory
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Output directory
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn ensure_dir(&self) -> Result<(), DataError> {
        fs::create_dir_all(&self.output_dir).map_err(|source| DataError::Io {
            path: self.output_dir.clone(),
            source,
        })
    }

    /// Write the full report as pretty JSON
    pub fn write_json(&self, report: &OptimizationReport) -> Result<PathBuf, DataError> {
        self.ensure_dir()?;
        let path = self.output_dir.join(JSON_FILE);
        let json = serde_json::to_string_pretty(report).map_err(|source| DataError::Json {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, json).map_err(|source| DataError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = ?path, "Wrote JSON report");
        Ok(path)
    }

    /// Write one row per grid point as Parquet
    pub fn write_parquet(&self, report: &OptimizationReport) -> Result<PathBuf, DataError> {
        self.ensure_dir()?;
        let path = self.output_dir.join(PARQUET_FILE);
        write_result_rows(&path, &ResultRow::from_report(report))?;
        Ok(path)
    }

    /// Write both formats
    pub fn write_all(&self, report: &OptimizationReport) -> Result<Vec<PathBuf>, DataError> {
        let paths = vec![self.write_json(report)?, self.write_parquet(report)?];
        tracing::info!(run_id = %report.run_id, ?paths, "Saved optimization results");
        Ok(paths)
    }
}
