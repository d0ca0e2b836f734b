//! Parameter grid optimizer
//!
//! Enumerates strategy configurations, evaluates each one over the full
//! round set in parallel and ranks them by realized profit

mod error;
mod executor;
mod grid;
mod result;

pub use error::OptimizerError;
pub use executor::{GridOptimizer, OptimizerSettings};
pub use grid::ParameterGrid;
pub use result::{rank, GridResult, OptimizationReport};
