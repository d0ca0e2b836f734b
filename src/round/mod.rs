//! Round data model
//!
//! Ticks, market rounds, cleaning and the validated round set

mod clean;
mod set;
mod types;

pub use clean::{CleaningReport, RoundError, DEFAULT_MIN_TICKS};
pub use set::{RoundSet, RoundSkip};
pub use types::{MarketRound, Side, Tick};
