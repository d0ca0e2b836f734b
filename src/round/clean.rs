//! Tick cleaning and round validation
//!
//! Historical price series arrive with gaps, repeated samples and the odd
//! garbage value. Cleaning brings a round back to its invariant: ticks inside
//! `[start_time, end_time]`, non-decreasing timestamps, one tick per timestamp
//! and both asks inside (0, 1). A round left with too few ticks is excluded
//! from simulation rather than treated as an error.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::{MarketRound, Tick};

/// Default minimum tick count for a round to be simulated
pub const DEFAULT_MIN_TICKS: usize = 3;

/// Reasons a round cannot be simulated
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoundError {
    /// Not enough usable ticks after cleaning
    #[error("Round {round_id} has {count} usable ticks (minimum {min})")]
    InsufficientTicks {
        round_id: String,
        count: usize,
        min: usize,
    },
    /// End time is not after start time
    #[error("Round {round_id} has an empty or inverted interval")]
    InvalidInterval { round_id: String },
}

/// Counts of ticks removed while cleaning a round
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningReport {
    /// Outside `[start_time, end_time]`
    pub out_of_interval: usize,
    /// Ask outside (0, 1)
    pub out_of_range: usize,
    /// Earlier than the previous kept tick
    pub non_monotonic: usize,
    /// Replaced by a later tick with the same timestamp
    pub overwritten: usize,
}

impl CleaningReport {
    /// Total ticks removed
    pub fn dropped(&self) -> usize {
        self.out_of_interval + self.out_of_range + self.non_monotonic + self.overwritten
    }
}

impl MarketRound {
    /// Return a copy with malformed ticks removed
    pub fn cleaned(&self) -> (MarketRound, CleaningReport) {
        let mut report = CleaningReport::default();
        let mut kept: Vec<Tick> = Vec::with_capacity(self.ticks.len());

        for tick in &self.ticks {
            if tick.timestamp < self.start_time || tick.timestamp > self.end_time {
                report.out_of_interval += 1;
                continue;
            }
            if !tick.has_valid_prices() {
                report.out_of_range += 1;
                continue;
            }
            match kept.last().map(|last| last.timestamp) {
                Some(last_ts) if tick.timestamp < last_ts => {
                    report.non_monotonic += 1;
                }
                Some(last_ts) if tick.timestamp == last_ts => {
                    // Latest observation at a timestamp wins
                    if let Some(last) = kept.last_mut() {
                        *last = *tick;
                    }
                    report.overwritten += 1;
                }
                _ => kept.push(*tick),
            }
        }

        if report.dropped() > 0 {
            tracing::debug!(
                round_id = %self.round_id,
                out_of_interval = report.out_of_interval,
                out_of_range = report.out_of_range,
                non_monotonic = report.non_monotonic,
                overwritten = report.overwritten,
                "Dropped malformed ticks"
            );
        }

        let round = MarketRound {
            round_id: self.round_id.clone(),
            start_time: self.start_time,
            end_time: self.end_time,
            ticks: kept,
        };
        (round, report)
    }

    /// Clean the round and check it has enough ticks to simulate
    pub fn validate(&self, min_ticks: usize) -> Result<MarketRound, RoundError> {
        if self.end_time <= self.start_time {
            return Err(RoundError::InvalidInterval {
                round_id: self.round_id.clone(),
            });
        }

        let (round, _) = self.cleaned();
        if round.ticks.len() < min_ticks {
            return Err(RoundError::InsufficientTicks {
                round_id: self.round_id.clone(),
                count: round.ticks.len(),
                min: min_ticks,
            });
        }
        Ok(round)
    }
}
