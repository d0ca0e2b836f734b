//! Round and tick types

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One outcome of a binary up/down market
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Price ends above the open
    Up,
    /// Price ends below the open
    Down,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::Up => Side::Down,
            Side::Down => Side::Up,
        }
    }

    /// Both sides in tick-internal order
    pub const ALL: [Side; 2] = [Side::Up, Side::Down];
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Up => write!(f, "UP"),
            Side::Down => write!(f, "DOWN"),
        }
    }
}

/// A single best-ask snapshot for both sides of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tick {
    /// Observation time
    pub timestamp: DateTime<Utc>,
    /// Best ask for UP (implied probability)
    pub up_ask: Decimal,
    /// Best ask for DOWN (implied probability)
    pub down_ask: Decimal,
}

impl Tick {
    /// Create a new tick
    pub fn new(timestamp: DateTime<Utc>, up_ask: Decimal, down_ask: Decimal) -> Self {
        Self {
            timestamp,
            up_ask,
            down_ask,
        }
    }

    /// Ask price for a side
    pub fn ask(&self, side: Side) -> Decimal {
        match side {
            Side::Up => self.up_ask,
            Side::Down => self.down_ask,
        }
    }

    /// Both asks lie strictly inside (0, 1)
    pub fn has_valid_prices(&self) -> bool {
        Side::ALL
            .iter()
            .all(|side| self.ask(*side) > Decimal::ZERO && self.ask(*side) < Decimal::ONE)
    }
}

/// One market round and its observed ticks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketRound {
    /// Round identifier (condition id or slug)
    pub round_id: String,
    /// When the round opens
    pub start_time: DateTime<Utc>,
    /// When the round resolves
    pub end_time: DateTime<Utc>,
    /// Ticks ordered by timestamp
    pub ticks: Vec<Tick>,
}

impl MarketRound {
    /// Create a round from raw ticks
    ///
    /// Ticks are kept as given; call [`MarketRound::validate`] before
    /// simulating.
    pub fn new(
        round_id: impl Into<String>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        ticks: Vec<Tick>,
    ) -> Self {
        Self {
            round_id: round_id.into(),
            start_time,
            end_time,
            ticks,
        }
    }

    /// Length of the round
    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }

    /// Number of ticks
    pub fn tick_count(&self) -> usize {
        self.ticks.len()
    }
}
