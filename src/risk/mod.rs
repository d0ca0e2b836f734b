//! Risk management module
//!
//! Confidence tiers and the position size attached to each

mod sizing;

pub use sizing::{ConfidenceTier, TierSizing};
