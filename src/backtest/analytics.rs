//! Outcome aggregation and reporting

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::strategy::{OutcomeStatus, StrategyParams, TradeOutcome};

/// Summary statistics for one configuration across all rounds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigSummary {
    /// Configuration evaluated
    pub params: StrategyParams,
    /// Rounds simulated
    pub rounds: usize,
    /// Rounds where Leg 1 triggered
    pub trade_count: usize,
    /// Triggered rounds that hedged
    pub wins: usize,
    /// Triggered rounds left unhedged
    pub losses: usize,
    /// Sum of profit over triggered rounds (per share)
    pub total_profit: Decimal,
    /// Triggered rounds / rounds
    pub trigger_rate: Decimal,
    /// Wins / triggered rounds; `None` without triggers
    pub completion_rate: Option<Decimal>,
    /// Total profit / triggered rounds; `None` without triggers
    pub avg_profit_per_trade: Option<Decimal>,
    /// Largest peak-to-trough fall of cumulative profit
    pub max_drawdown: Decimal,
}

impl ConfigSummary {
    /// Ended with positive total profit
    pub fn profitable(&self) -> bool {
        self.total_profit > Decimal::ZERO
    }

    /// Completion rate with no-trigger configurations counted as zero
    pub fn completion_rate_or_zero(&self) -> Decimal {
        self.completion_rate.unwrap_or(Decimal::ZERO)
    }

    /// Format as table for CLI output
    pub fn format_table(&self) -> String {
        format!(
            r#"
══════════════════════════════════════════════════════
               BACKTEST RESULTS
══════════════════════════════════════════════════════

CONFIGURATION
───────────────────────────────────────────────────────
Move Threshold:   {}
Sum Target:       {}
Window:           {} min

PERFORMANCE
───────────────────────────────────────────────────────
Total Profit:     {:+.4}
Avg per Trade:    {}
Max Drawdown:     {:.4}
Completion Rate:  {}

ACTIVITY
───────────────────────────────────────────────────────
Rounds:           {}
Trades:           {} ({:.1}% triggered)
Wins / Losses:    {} / {}
══════════════════════════════════════════════════════
"#,
            self.params.move_threshold,
            self.params.sum_target,
            self.params.window_minutes,
            self.total_profit,
            fmt_optional(self.avg_profit_per_trade, dec!(1), 4),
            self.max_drawdown,
            fmt_optional(self.completion_rate, dec!(100), 1),
            self.rounds,
            self.trade_count,
            self.trigger_rate * dec!(100),
            self.wins,
            self.losses,
        )
    }
}

fn fmt_optional(value: Option<Decimal>, scale: Decimal, dp: u32) -> String {
    match value {
        Some(v) => (v * scale).round_dp(dp).to_string(),
        None => "n/a".to_string(),
    }
}

/// Cumulative profit after each outcome, starting from zero equity
pub fn equity_curve(outcomes: &[TradeOutcome]) -> Vec<Decimal> {
    outcomes
        .iter()
        .scan(Decimal::ZERO, |equity, outcome| {
            *equity += outcome.profit;
            Some(*equity)
        })
        .collect()
}

/// Largest fall from a running peak of the equity curve, never negative
pub fn max_drawdown(curve: &[Decimal]) -> Decimal {
    let mut peak = Decimal::ZERO;
    let mut worst = Decimal::ZERO;
    for &equity in curve {
        peak = peak.max(equity);
        worst = worst.max(peak - equity);
    }
    worst
}

/// Reduce chronologically ordered outcomes for one configuration
///
/// Pure: the same outcomes always produce an identical summary.
pub fn aggregate(params: StrategyParams, outcomes: &[TradeOutcome]) -> ConfigSummary {
    let rounds = outcomes.len();
    let triggered = || outcomes.iter().filter(|o| o.status.is_triggered());

    let trade_count = triggered().count();
    let wins = count_status(outcomes, OutcomeStatus::Win);
    let losses = count_status(outcomes, OutcomeStatus::Loss);
    let total_profit: Decimal = triggered().map(|o| o.profit).sum();

    let trigger_rate = ratio(trade_count, rounds).unwrap_or(Decimal::ZERO);
    let completion_rate = ratio(wins, trade_count);
    let avg_profit_per_trade =
        (trade_count > 0).then(|| total_profit / Decimal::from(trade_count));

    ConfigSummary {
        params,
        rounds,
        trade_count,
        wins,
        losses,
        total_profit,
        trigger_rate,
        completion_rate,
        avg_profit_per_trade,
        max_drawdown: max_drawdown(&equity_curve(outcomes)),
    }
}

fn count_status(outcomes: &[TradeOutcome], status: OutcomeStatus) -> usize {
    outcomes.iter().filter(|o| o.status == status).count()
}

fn ratio(numerator: usize, denominator: usize) -> Option<Decimal> {
    (denominator > 0).then(|| Decimal::from(numerator) / Decimal::from(denominator))
}
