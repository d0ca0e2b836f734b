//! Backtesting module
//!
//! Replays historical rounds through the hedge strategy and summarizes the
//! outcomes for one configuration

mod analytics;
mod execution_model;
mod replay;
mod simulator;

pub use analytics::{aggregate, equity_curve, max_drawdown, ConfigSummary};
pub use execution_model::{FillModel, DEFAULT_SLIPPAGE};
pub use replay::{evaluate, replay, OutcomeStream};
pub use simulator::RoundSimulator;
