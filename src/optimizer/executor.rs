//! Parallel grid sweep using Rayon.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use chrono::{Duration, Utc};
use rayon::prelude::*;
use tracing::{debug, info};
use uuid::Uuid;

use super::error::OptimizerError;
use super::grid::ParameterGrid;
use super::result::{rank, GridResult, OptimizationReport};
use crate::backtest::{evaluate, RoundSimulator};
use crate::config::Config;
use crate::round::{MarketRound, RoundSet, DEFAULT_MIN_TICKS};
use crate::strategy::StrategyParams;
use crate::telemetry;

/// Settings shared by every grid point of a sweep
#[derive(Debug, Clone, Copy)]
pub struct OptimizerSettings {
    /// Worker threads; 0 means available cores minus one
    pub workers: usize,
    /// Fixed round length used to reject oversized windows
    pub round_duration: Duration,
    /// Minimum ticks for a round to be simulated
    pub min_ticks: usize,
    /// Simulator applied to every round
    pub simulator: RoundSimulator,
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        Self {
            workers: 0,
            round_duration: Duration::minutes(5),
            min_ticks: DEFAULT_MIN_TICKS,
            simulator: RoundSimulator::default(),
        }
    }
}

impl OptimizerSettings {
    /// Create from loaded configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            workers: config.optimizer.workers,
            round_duration: config.strategy.round_duration(),
            min_ticks: config.strategy.min_ticks,
            simulator: RoundSimulator::new(config.strategy.slippage),
        }
    }
}

/// Evaluates every point of a parameter grid against a fixed round set
///
/// Each grid point is an independent unit of work over shared read-only
/// rounds; results are ranked on the calling thread once all workers finish.
pub struct GridOptimizer {
    settings: OptimizerSettings,
    cancel: Arc<AtomicBool>,
}

impl GridOptimizer {
    /// Create a new optimizer
    pub fn new(settings: OptimizerSettings) -> Self {
        Self {
            settings,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag that stops the sweep when set; points already running finish
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Settings in use
    pub fn settings(&self) -> &OptimizerSettings {
        &self.settings
    }

    /// Get effective thread count
    pub fn worker_count(&self) -> usize {
        if self.settings.workers > 0 {
            return self.settings.workers;
        }
        std::thread::available_parallelism()
            .map(|n| n.get().saturating_sub(1))
            .unwrap_or(1)
            .max(1)
    }

    /// Validate raw rounds and sweep the grid over them
    pub fn run(
        &self,
        grid: &ParameterGrid,
        rounds: Vec<MarketRound>,
    ) -> Result<OptimizationReport, OptimizerError> {
        let round_set = RoundSet::prepare(rounds, self.settings.min_ticks);
        self.run_prepared(grid, &round_set)
    }

    /// Sweep the grid over an already validated round set
    pub fn run_prepared(
        &self,
        grid: &ParameterGrid,
        round_set: &RoundSet,
    ) -> Result<OptimizationReport, OptimizerError> {
        if grid.is_empty() {
            return Err(OptimizerError::EmptyGrid);
        }
        if round_set.is_empty() {
            return Err(OptimizerError::NoRounds {
                skipped: round_set.skipped().len(),
            });
        }

        let started_at = Utc::now();
        let start = Instant::now();
        let combinations = grid.combinations();
        let workers = self.worker_count();

        info!(
            combinations = combinations.len(),
            rounds = round_set.len(),
            skipped = round_set.skipped().len(),
            workers,
            "Starting grid search"
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("grid-worker-{i}"))
            .build()
            .map_err(|e| OptimizerError::ThreadPool(e.to_string()))?;

        let completed = AtomicUsize::new(0);
        let total = combinations.len();
        let rounds = round_set.rounds();

        let results: Vec<GridResult> = pool.install(|| {
            combinations
                .par_iter()
                .map(|params| {
                    if self.cancel.load(Ordering::Relaxed) {
                        return Err(OptimizerError::Cancelled {
                            completed: completed.load(Ordering::Relaxed),
                            total,
                        });
                    }
                    let result = self.evaluate_point(*params, rounds);
                    let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                    debug!(done, total, "Grid point complete");
                    Ok(result)
                })
                .collect::<Result<Vec<_>, _>>()
        })?;

        let results = rank(results);
        let elapsed = start.elapsed();

        let report = OptimizationReport {
            run_id: Uuid::new_v4(),
            started_at,
            elapsed_ms: elapsed.as_millis() as u64,
            rounds_used: round_set.len(),
            rounds_skipped: round_set.skipped().to_vec(),
            results,
        };

        info!(
            run_id = %report.run_id,
            evaluated = report.evaluated().count(),
            invalid = report.invalid().len(),
            profitable = report.profitable().len(),
            elapsed_ms = report.elapsed_ms,
            "Grid search complete"
        );

        Ok(report)
    }

    /// Validate and simulate one grid point
    pub fn evaluate_point(&self, params: StrategyParams, rounds: &[MarketRound]) -> GridResult {
        if let Err(e) = params.validate(self.settings.round_duration) {
            debug!(%params, reason = %e, "Skipping invalid configuration");
            metrics::counter!(telemetry::CONFIGS_INVALID).increment(1);
            return GridResult::Invalid {
                params,
                reason: e.to_string(),
            };
        }

        let start = Instant::now();
        let summary = evaluate(rounds, params, &self.settings.simulator);
        metrics::histogram!(telemetry::CONFIG_EVAL_MS)
            .record(start.elapsed().as_secs_f64() * 1000.0);
        metrics::counter!(telemetry::CONFIGS_EVALUATED).increment(1);

        GridResult::Evaluated(summary)
    }
}
