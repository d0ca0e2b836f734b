//! Per-round trade outcomes

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::round::{MarketRound, Side};

/// Terminal state of one simulated round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutcomeStatus {
    /// Leg 1 never triggered inside the window
    NoTrigger,
    /// Both legs filled under the sum target
    Win,
    /// Leg 1 filled but the hedge never completed
    Loss,
}

impl OutcomeStatus {
    /// Leg 1 was entered
    pub fn is_triggered(&self) -> bool {
        !matches!(self, OutcomeStatus::NoTrigger)
    }
}

/// A simulated fill for one leg
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegFill {
    /// Side bought
    pub side: Side,
    /// Price paid including slippage
    pub entry_price: Decimal,
    /// Tick time of the fill
    pub filled_at: DateTime<Utc>,
}

/// Result of replaying one round under one parameter set
///
/// Constructed only through [`TradeOutcome::no_trigger`], [`TradeOutcome::win`]
/// and [`TradeOutcome::loss`], which fix the profit for each status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeOutcome {
    /// Round identifier
    pub round_id: String,
    /// Round open time
    pub round_start: DateTime<Utc>,
    /// Terminal state
    pub status: OutcomeStatus,
    /// Triggered leg
    pub leg1: Option<LegFill>,
    /// Hedging leg
    pub leg2: Option<LegFill>,
    /// Dollars per share, negative on loss
    pub profit: Decimal,
    /// When the position was closed out (hedge fill or round end)
    pub completion_time: Option<DateTime<Utc>>,
}

impl TradeOutcome {
    /// No position taken
    pub fn no_trigger(round: &MarketRound) -> Self {
        Self {
            round_id: round.round_id.clone(),
            round_start: round.start_time,
            status: OutcomeStatus::NoTrigger,
            leg1: None,
            leg2: None,
            profit: Decimal::ZERO,
            completion_time: None,
        }
    }

    /// Hedged pair: one side pays out 1.00
    pub fn win(round: &MarketRound, leg1: LegFill, leg2: LegFill) -> Self {
        Self {
            round_id: round.round_id.clone(),
            round_start: round.start_time,
            status: OutcomeStatus::Win,
            leg1: Some(leg1),
            leg2: Some(leg2),
            profit: Decimal::ONE - (leg1.entry_price + leg2.entry_price),
            completion_time: Some(leg2.filled_at),
        }
    }

    /// Unhedged at round end: the whole Leg 1 stake is scored as lost
    pub fn loss(round: &MarketRound, leg1: LegFill) -> Self {
        Self {
            round_id: round.round_id.clone(),
            round_start: round.start_time,
            status: OutcomeStatus::Loss,
            leg1: Some(leg1),
            leg2: None,
            profit: -leg1.entry_price,
            completion_time: Some(round.end_time),
        }
    }

    /// Side bought on trigger
    pub fn leg1_side(&self) -> Option<Side> {
        self.leg1.map(|l| l.side)
    }

    /// Leg 1 price paid
    pub fn leg1_entry_price(&self) -> Option<Decimal> {
        self.leg1.map(|l| l.entry_price)
    }

    /// Leg 2 price paid
    pub fn leg2_entry_price(&self) -> Option<Decimal> {
        self.leg2.map(|l| l.entry_price)
    }

    /// When Leg 1 triggered
    pub fn trigger_time(&self) -> Option<DateTime<Utc>> {
        self.leg1.map(|l| l.filled_at)
    }

    /// Chronological position used for equity curves
    pub fn sort_key(&self) -> DateTime<Utc> {
        self.trigger_time().unwrap_or(self.round_start)
    }
}
