//! Validated collection of rounds shared by every simulation

use serde::{Deserialize, Serialize};

use super::types::MarketRound;
use crate::telemetry;

/// A round excluded from simulation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSkip {
    /// Round identifier
    pub round_id: String,
    /// Why it was excluded
    pub reason: String,
}

/// Valid rounds in chronological order plus the rounds that were excluded
///
/// Built once before a sweep and then only read, so it can be shared across
/// worker threads by reference.
#[derive(Debug, Clone, Default)]
pub struct RoundSet {
    rounds: Vec<MarketRound>,
    skipped: Vec<RoundSkip>,
}

impl RoundSet {
    /// Validate raw rounds and keep the ones that can be simulated
    pub fn prepare(raw: Vec<MarketRound>, min_ticks: usize) -> Self {
        let mut rounds = Vec::with_capacity(raw.len());
        let mut skipped = Vec::new();

        for round in raw {
            match round.validate(min_ticks) {
                Ok(valid) => rounds.push(valid),
                Err(e) => {
                    tracing::info!(round_id = %round.round_id, reason = %e, "Skipping round");
                    skipped.push(RoundSkip {
                        round_id: round.round_id.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        // Stable: rounds sharing a start keep their input order
        rounds.sort_by_key(|r| r.start_time);

        if !skipped.is_empty() {
            metrics::counter!(telemetry::ROUNDS_SKIPPED).increment(skipped.len() as u64);
        }

        Self { rounds, skipped }
    }

    /// Rounds that passed validation
    pub fn rounds(&self) -> &[MarketRound] {
        &self.rounds
    }

    /// Rounds excluded from simulation
    pub fn skipped(&self) -> &[RoundSkip] {
        &self.skipped
    }

    /// Number of valid rounds
    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    /// True when no round passed validation
    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }
}
