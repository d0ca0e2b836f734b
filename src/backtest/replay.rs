//! Replay of a round set under one configuration

use super::analytics::{aggregate, ConfigSummary};
use super::simulator::RoundSimulator;
use crate::round::MarketRound;
use crate::strategy::{StrategyParams, TradeOutcome};

/// Yields one outcome per round, simulating lazily in round order
pub struct OutcomeStream<'a> {
    rounds: std::slice::Iter<'a, MarketRound>,
    params: StrategyParams,
    simulator: &'a RoundSimulator,
}

impl<'a> OutcomeStream<'a> {
    /// Create a stream over validated rounds
    pub fn new(
        rounds: &'a [MarketRound],
        params: StrategyParams,
        simulator: &'a RoundSimulator,
    ) -> Self {
        Self {
            rounds: rounds.iter(),
            params,
            simulator,
        }
    }
}

impl Iterator for OutcomeStream<'_> {
    type Item = TradeOutcome;

    fn next(&mut self) -> Option<Self::Item> {
        let round = self.rounds.next()?;
        Some(self.simulator.simulate(round, &self.params))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rounds.size_hint()
    }
}

/// Simulate every round and return outcomes in chronological order
///
/// Ordered by trigger time, or round start for rounds that never triggered.
/// The sort is stable so equal keys keep round order.
pub fn replay(
    rounds: &[MarketRound],
    params: StrategyParams,
    simulator: &RoundSimulator,
) -> Vec<TradeOutcome> {
    let mut outcomes: Vec<TradeOutcome> = OutcomeStream::new(rounds, params, simulator).collect();
    outcomes.sort_by_key(TradeOutcome::sort_key);
    outcomes
}

/// Simulate every round and summarize the configuration
pub fn evaluate(
    rounds: &[MarketRound],
    params: StrategyParams,
    simulator: &RoundSimulator,
) -> ConfigSummary {
    let outcomes = replay(rounds, params, simulator);
    aggregate(params, &outcomes)
}
