//! Confidence-tier position sizing
//!
//! Signal confidence maps to one of a small closed set of tiers, and each tier
//! maps to entry eligibility and a share count. Callers classify once and match
//! on the tier instead of re-deriving thresholds at every call site.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sizing tier derived from a confidence score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConfidenceTier {
    /// Not confident enough to enter
    Skip,
    /// Enter with the base size
    Standard,
    /// Enter with the maximum size
    Sized,
}

/// Thresholds and share counts for each tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TierSizing {
    /// Lowest score that enters at all
    #[serde(default = "default_min_score")]
    pub min_score: u32,
    /// Lowest score that enters with the maximum size
    #[serde(default = "default_sized_score")]
    pub sized_score: u32,
    /// Shares for a standard entry
    #[serde(default = "default_base_shares")]
    pub base_shares: Decimal,
    /// Shares for a sized entry
    #[serde(default = "default_max_shares")]
    pub max_shares: Decimal,
}

fn default_min_score() -> u32 {
    2
}
fn default_sized_score() -> u32 {
    5
}
fn default_base_shares() -> Decimal {
    Decimal::new(10, 0)
}
fn default_max_shares() -> Decimal {
    Decimal::new(15, 0)
}

impl Default for TierSizing {
    fn default() -> Self {
        Self {
            min_score: default_min_score(),
            sized_score: default_sized_score(),
            base_shares: default_base_shares(),
            max_shares: default_max_shares(),
        }
    }
}

impl ConfidenceTier {
    /// Classify a confidence score
    pub fn classify(score: u32, sizing: &TierSizing) -> Self {
        if score < sizing.min_score {
            ConfidenceTier::Skip
        } else if score < sizing.sized_score {
            ConfidenceTier::Standard
        } else {
            ConfidenceTier::Sized
        }
    }

    /// Whether a position may be opened
    pub fn is_eligible(&self) -> bool {
        !matches!(self, ConfidenceTier::Skip)
    }

    /// Shares to buy for this tier
    pub fn position_size(&self, sizing: &TierSizing) -> Decimal {
        match self {
            ConfidenceTier::Skip => Decimal::ZERO,
            ConfidenceTier::Standard => sizing.base_shares,
            ConfidenceTier::Sized => sizing.max_shares,
        }
    }
}
