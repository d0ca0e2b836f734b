//! Error types for grid optimization

use thiserror::Error;

/// Errors that stop a sweep
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OptimizerError {
    /// No parameter combinations to evaluate
    #[error("Parameter grid is empty")]
    EmptyGrid,

    /// Every round was excluded or none were loaded
    #[error("No valid rounds to simulate ({skipped} skipped)")]
    NoRounds {
        /// Rounds excluded during validation
        skipped: usize,
    },

    /// Worker pool could not be built
    #[error("Failed to initialize thread pool: {0}")]
    ThreadPool(String),

    /// Sweep was cancelled before every point finished
    #[error("Grid search cancelled after {completed} of {total} configurations")]
    Cancelled {
        /// Points finished before cancellation
        completed: usize,
        /// Points in the grid
        total: usize,
    },
}
