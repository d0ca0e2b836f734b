//! Parameter grid for the sweep

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::strategy::StrategyParams;

/// Candidate values for each strategy parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterGrid {
    /// Leg 1 trigger drops
    #[serde(default = "default_move_thresholds")]
    pub move_thresholds: Vec<Decimal>,
    /// Combined cost caps
    #[serde(default = "default_sum_targets")]
    pub sum_targets: Vec<Decimal>,
    /// Observation windows in minutes
    #[serde(default = "default_window_minutes")]
    pub window_minutes: Vec<Decimal>,
}

fn default_move_thresholds() -> Vec<Decimal> {
    vec![
        dec!(0.10),
        dec!(0.12),
        dec!(0.15),
        dec!(0.18),
        dec!(0.20),
        dec!(0.25),
    ]
}
fn default_sum_targets() -> Vec<Decimal> {
    vec![dec!(0.90), dec!(0.92), dec!(0.93), dec!(0.95), dec!(0.97)]
}
fn default_window_minutes() -> Vec<Decimal> {
    vec![dec!(1.0), dec!(1.5), dec!(2.0), dec!(2.5), dec!(3.0)]
}

impl Default for ParameterGrid {
    fn default() -> Self {
        Self {
            move_thresholds: default_move_thresholds(),
            sum_targets: default_sum_targets(),
            window_minutes: default_window_minutes(),
        }
    }
}

impl ParameterGrid {
    /// Create a grid from explicit candidate lists
    pub fn new(
        move_thresholds: Vec<Decimal>,
        sum_targets: Vec<Decimal>,
        window_minutes: Vec<Decimal>,
    ) -> Self {
        Self {
            move_thresholds,
            sum_targets,
            window_minutes,
        }
    }

    /// Get the total number of parameter combinations
    pub fn total_combinations(&self) -> usize {
        self.move_thresholds.len() * self.sum_targets.len() * self.window_minutes.len()
    }

    /// Check if grid is empty
    pub fn is_empty(&self) -> bool {
        self.total_combinations() == 0
    }

    /// Cartesian product in move, sum, window order
    pub fn combinations(&self) -> Vec<StrategyParams> {
        let mut combos = Vec::with_capacity(self.total_combinations());
        for &move_threshold in &self.move_thresholds {
            for &sum_target in &self.sum_targets {
                for &window in &self.window_minutes {
                    combos.push(StrategyParams::new(move_threshold, sum_target, window));
                }
            }
        }
        combos
    }
}
