//! Result types for grid optimization

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backtest::ConfigSummary;
use crate::round::RoundSkip;
use crate::strategy::StrategyParams;

/// Outcome of one grid point
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GridResult {
    /// Simulated over every valid round
    Evaluated(ConfigSummary),
    /// Rejected before simulation
    Invalid {
        /// Rejected combination
        params: StrategyParams,
        /// Why it was rejected
        reason: String,
    },
}

impl GridResult {
    /// Parameters of this grid point
    pub fn params(&self) -> &StrategyParams {
        match self {
            GridResult::Evaluated(summary) => &summary.params,
            GridResult::Invalid { params, .. } => params,
        }
    }

    /// Summary if the point was evaluated
    pub fn summary(&self) -> Option<&ConfigSummary> {
        match self {
            GridResult::Evaluated(summary) => Some(summary),
            GridResult::Invalid { .. } => None,
        }
    }

    /// True when the point was rejected
    pub fn is_invalid(&self) -> bool {
        matches!(self, GridResult::Invalid { .. })
    }
}

/// Ranking order: evaluated points by profit then completion rate, invalid last
fn compare(a: &GridResult, b: &GridResult) -> Ordering {
    match (a, b) {
        (GridResult::Evaluated(x), GridResult::Evaluated(y)) => y
            .total_profit
            .cmp(&x.total_profit)
            .then_with(|| y.completion_rate_or_zero().cmp(&x.completion_rate_or_zero())),
        (GridResult::Evaluated(_), GridResult::Invalid { .. }) => Ordering::Less,
        (GridResult::Invalid { .. }, GridResult::Evaluated(_)) => Ordering::Greater,
        (GridResult::Invalid { .. }, GridResult::Invalid { .. }) => Ordering::Equal,
    }
}

/// Sort grid-ordered results into ranking order
///
/// Stable, so full ties keep grid order.
pub fn rank(mut results: Vec<GridResult>) -> Vec<GridResult> {
    results.sort_by(compare);
    results
}

/// Complete output of one sweep
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationReport {
    /// Unique run identifier
    pub run_id: Uuid,
    /// When the sweep started
    pub started_at: DateTime<Utc>,
    /// Wall-clock duration in milliseconds
    pub elapsed_ms: u64,
    /// Rounds simulated for every configuration
    pub rounds_used: usize,
    /// Rounds excluded from the sweep
    pub rounds_skipped: Vec<RoundSkip>,
    /// Every grid point in ranking order
    pub results: Vec<GridResult>,
}

impl OptimizationReport {
    /// Evaluated summaries in ranking order
    pub fn evaluated(&self) -> impl DoubleEndedIterator<Item = &ConfigSummary> {
        self.results.iter().filter_map(GridResult::summary)
    }

    /// Rejected grid points
    pub fn invalid(&self) -> Vec<&GridResult> {
        self.results.iter().filter(|r| r.is_invalid()).collect()
    }

    /// Best configuration, if any was evaluated
    pub fn best(&self) -> Option<&ConfigSummary> {
        self.evaluated().next()
    }

    /// The `n` most profitable configurations, best first
    pub fn top_by_profit(&self, n: usize) -> Vec<&ConfigSummary> {
        self.evaluated().take(n).collect()
    }

    /// The `n` least profitable configurations, worst first
    pub fn bottom_by_profit(&self, n: usize) -> Vec<&ConfigSummary> {
        self.evaluated().rev().take(n).collect()
    }

    /// Configurations with positive total profit
    pub fn profitable(&self) -> Vec<&ConfigSummary> {
        self.evaluated().filter(|s| s.profitable()).collect()
    }

    /// Configurations with zero or negative total profit
    pub fn unprofitable(&self) -> Vec<&ConfigSummary> {
        self.evaluated().filter(|s| !s.profitable()).collect()
    }

    /// Format ranked tables for CLI output
    pub fn format_table(&self, top: usize, bottom: usize) -> String {
        let sep = "─".repeat(86);
        let header = format!(
            "{:>3}  {:>6}  {:>5}  {:>6}  {:>9}  {:>6}  {:>6}  {:>8}  {:>7}  {:>6}",
            "#", "move", "sum", "window", "profit", "win%", "trig%", "avg", "drawdn", "trades"
        );

        let profitable = self.profitable();
        let unprofitable = self.unprofitable();
        let mut out = String::new();

        out.push_str(&format!("\n{}\n", "═".repeat(86)));
        out.push_str(&format!(
            "  TOP {} PROFITABLE CONFIGS\n{sep}\n{header}\n{sep}\n",
            top.min(profitable.len())
        ));
        for (i, s) in profitable.iter().take(top).enumerate() {
            out.push_str(&format_row(i + 1, s));
        }

        out.push_str(&format!(
            "\n  BOTTOM {} CONFIGS (worst losses)\n{sep}\n{header}\n{sep}\n",
            bottom.min(unprofitable.len())
        ));
        for (i, s) in unprofitable.iter().rev().take(bottom).enumerate() {
            out.push_str(&format_row(i + 1, s));
        }

        out.push_str(&format!("{}\n", "═".repeat(86)));
        if let Some(best) = profitable.first() {
            out.push_str(&format_highlight("BEST CONFIG", best));
        }
        if let Some(worst) = unprofitable.last() {
            out.push_str(&format_highlight("WORST CONFIG (avoid)", worst));
        }
        out.push_str(&format!(
            "  Profitable: {}/{}  |  Unprofitable: {}/{}  |  Invalid: {}  |  Rounds: {} ({} skipped)\n",
            profitable.len(),
            self.results.len(),
            unprofitable.len(),
            self.results.len(),
            self.invalid().len(),
            self.rounds_used,
            self.rounds_skipped.len(),
        ));
        out.push_str(&format!("{}\n", "═".repeat(86)));
        out
    }
}

fn format_highlight(title: &str, s: &ConfigSummary) -> String {
    format!(
        "  [{title}] {}\n     Total profit : {:+.4}\n     Win rate     : {:.1}%\n     Trigger rate : {:.1}%\n     Max drawdown : {:.4}\n     Trades taken : {} / {} rounds\n\n",
        s.params,
        s.total_profit,
        s.completion_rate_or_zero() * dec!(100),
        s.trigger_rate * dec!(100),
        s.max_drawdown,
        s.trade_count,
        s.rounds,
    )
}

fn format_row(rank: usize, s: &ConfigSummary) -> String {
    format!(
        "{:>3}  {:>6.2}  {:>5.2}  {:>6.1}  {:>9.4}  {:>5.1}%  {:>5.1}%  {:>8}  {:>7.4}  {:>6}\n",
        rank,
        s.params.move_threshold,
        s.params.sum_target,
        s.params.window_minutes,
        s.total_profit,
        s.completion_rate_or_zero() * dec!(100),
        s.trigger_rate * dec!(100),
        s.avg_profit_per_trade
            .map_or_else(|| "n/a".to_string(), |v| format!("{v:.4}")),
        s.max_drawdown,
        s.trade_count,
    )
}
