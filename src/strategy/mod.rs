//! Strategy module
//!
//! Parameters of the dual-leg hedge and the outcome of one simulated round

mod outcome;
mod params;

pub use outcome::{LegFill, OutcomeStatus, TradeOutcome};
pub use params::{ParamsError, StrategyParams};
