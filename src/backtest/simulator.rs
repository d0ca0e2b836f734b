//! Per-round strategy replay
//!
//! Drives one cleaned round through the hedge state machine:
//!
//! - `Watching` from round start until `start + window` (or round end). Each
//!   tick is compared with the one before it; a drop of at least
//!   `move_threshold` on either side buys that side (Leg 1).
//! - `Leg1Filled` until round end. The first tick where
//!   `leg1 + opposite ask + slippage <= sum_target` buys the other side (Leg 2)
//!   and the round is a win.
//! - Still unhedged at round end: loss of the full Leg 1 stake. The round's
//!   actual resolution is deliberately not consulted.
//!
//! Historical ticks are roughly one minute apart while the live trigger looks
//! at a few seconds, so consecutive-tick drops undercount real triggers. Treat
//! trigger rates from here as a lower bound.

use rust_decimal::Decimal;

use super::execution_model::FillModel;
use crate::round::{MarketRound, Side, Tick};
use crate::strategy::{LegFill, StrategyParams, TradeOutcome};

#[derive(Debug, Clone, Copy)]
enum Phase {
    Watching,
    Leg1Filled(LegFill),
}

/// Replays rounds under a strategy configuration
///
/// Stateless between calls: the same round and parameters always produce the
/// same outcome, so one simulator can be shared across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoundSimulator {
    fill_model: FillModel,
}

impl RoundSimulator {
    /// Create a simulator with the given per-fill slippage
    pub fn new(slippage: Decimal) -> Self {
        Self {
            fill_model: FillModel::new(slippage),
        }
    }

    /// Fill model in use
    pub fn fill_model(&self) -> &FillModel {
        &self.fill_model
    }

    /// Simulate one round
    ///
    /// `round` is expected to be cleaned (see [`MarketRound::validate`]) and
    /// `params` validated against the round length.
    pub fn simulate(&self, round: &MarketRound, params: &StrategyParams) -> TradeOutcome {
        let watch_end = round
            .start_time
            .checked_add_signed(params.window())
            .map_or(round.end_time, |cutoff| cutoff.min(round.end_time));

        let mut phase = Phase::Watching;
        let mut prev: Option<&Tick> = None;

        for tick in &round.ticks {
            match phase {
                Phase::Watching => {
                    if tick.timestamp > watch_end {
                        break;
                    }
                    if let Some(side) =
                        prev.and_then(|p| triggered_side(p, tick, params.move_threshold))
                    {
                        let leg1 = LegFill {
                            side,
                            entry_price: self.fill_model.entry_price(tick.ask(side)),
                            filled_at: tick.timestamp,
                        };
                        tracing::trace!(
                            round_id = %round.round_id,
                            side = %side,
                            entry = %leg1.entry_price,
                            "Leg 1 triggered"
                        );
                        phase = Phase::Leg1Filled(leg1);
                    }
                }
                Phase::Leg1Filled(leg1) => {
                    let hedge_side = leg1.side.opposite();
                    if let Some(entry_price) = self.fill_model.hedge_price(
                        leg1.entry_price,
                        tick.ask(hedge_side),
                        params.sum_target,
                    ) {
                        let leg2 = LegFill {
                            side: hedge_side,
                            entry_price,
                            filled_at: tick.timestamp,
                        };
                        tracing::trace!(
                            round_id = %round.round_id,
                            entry = %entry_price,
                            "Leg 2 filled"
                        );
                        return TradeOutcome::win(round, leg1, leg2);
                    }
                }
            }
            prev = Some(tick);
        }

        match phase {
            Phase::Watching => TradeOutcome::no_trigger(round),
            Phase::Leg1Filled(leg1) => TradeOutcome::loss(round, leg1),
        }
    }
}

/// Fractional fall from `reference` to `current`; positive when price dropped
fn drop_fraction(reference: Decimal, current: Decimal) -> Decimal {
    if reference <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (reference - current) / reference
}

/// Side whose ask fell by at least `threshold` since the previous tick
///
/// The larger drop wins; an exact tie goes to UP.
fn triggered_side(prev: &Tick, current: &Tick, threshold: Decimal) -> Option<Side> {
    let mut best: Option<(Side, Decimal)> = None;
    for side in Side::ALL {
        let drop = drop_fraction(prev.ask(side), current.ask(side));
        if drop >= threshold && best.map_or(true, |(_, best_drop)| drop > best_drop) {
            best = Some((side, drop));
        }
    }
    best.map(|(side, _)| side)
}
