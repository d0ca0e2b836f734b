//! Optimize command implementation

use anyhow::Context;
use clap::{Args, ValueEnum};
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::time::Duration;

use crate::config::Config;
use crate::data::ResultWriter;
use crate::optimizer::{GridOptimizer, OptimizationReport, OptimizerSettings, ParameterGrid};
use crate::round::RoundSet;

/// Report rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Args, Debug)]
pub struct OptimizeArgs {
    /// Directory containing the round cache (defaults to data.cache_dir)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Output directory for results (defaults to data.output_dir)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Worker threads, 0 for all cores but one
    #[arg(long)]
    pub workers: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Skip writing result files
    #[arg(long)]
    pub no_save: bool,
}

impl OptimizeArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let data_dir = self.data_dir.as_ref().unwrap_or(&config.data.cache_dir);
        let round_set = super::load_round_set(config, data_dir).await?;

        let mut settings = OptimizerSettings::from_config(config);
        if let Some(workers) = self.workers {
            settings.workers = workers;
        }

        let report = run_with_budget(
            GridOptimizer::new(settings),
            config.grid.clone(),
            round_set,
            config.optimizer.time_budget_secs,
        )
        .await?;

        if !self.no_save {
            let output = self.output.as_ref().unwrap_or(&config.data.output_dir);
            ResultWriter::new(output)
                .write_all(&report)
                .context("Failed to save results")?;
        }

        match self.format {
            OutputFormat::Table => println!(
                "{}",
                report.format_table(config.optimizer.top_n, config.optimizer.bottom_n)
            ),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        }

        Ok(())
    }
}

/// Run the sweep off the async runtime, cancelling it if the budget elapses
///
/// On expiry the cancel flag is set and the worker is awaited, so the caller
/// sees [`crate::optimizer::OptimizerError::Cancelled`].
async fn run_with_budget(
    optimizer: GridOptimizer,
    grid: ParameterGrid,
    round_set: RoundSet,
    budget_secs: Option<u64>,
) -> anyhow::Result<OptimizationReport> {
    let cancel = optimizer.cancel_handle();
    let mut task = tokio::task::spawn_blocking(move || optimizer.run_prepared(&grid, &round_set));

    let result = match budget_secs {
        Some(secs) => match tokio::time::timeout(Duration::from_secs(secs), &mut task).await {
            Ok(joined) => joined?,
            Err(_) => {
                cancel.store(true, Ordering::Relaxed);
                tracing::error!(budget_secs = secs, "Time budget exceeded, cancelling grid search");
                task.await?
            }
        },
        None => task.await?,
    };

    Ok(result?)
}
