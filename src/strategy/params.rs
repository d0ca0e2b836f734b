//! Strategy parameters

use chrono::Duration;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a parameter combination cannot be simulated
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParamsError {
    /// Move threshold must be a fraction in (0, 1)
    #[error("move_threshold {0} outside (0, 1)")]
    MoveThresholdOutOfRange(Decimal),
    /// Sum target must be positive
    #[error("sum_target {0} must be positive")]
    SumTargetNotPositive(Decimal),
    /// A combined cost of 1.00 or more can never lock in a profit
    #[error("sum_target {0} >= 1.0 is degenerate")]
    DegenerateSumTarget(Decimal),
    /// Window must be positive and fit inside the round
    #[error("window_minutes {window} outside (0, {round_minutes}]")]
    WindowOutOfRange {
        window: Decimal,
        round_minutes: Decimal,
    },
}

/// One point of the strategy parameter space
///
/// Passed by value into every simulation; there is no process-wide
/// "current parameters" state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StrategyParams {
    /// Fractional drop between consecutive ticks that triggers Leg 1
    pub move_threshold: Decimal,
    /// Maximum combined cost of both legs
    pub sum_target: Decimal,
    /// Length of the Leg 1 observation window from round start
    pub window_minutes: Decimal,
}

impl StrategyParams {
    /// Create a parameter set (unchecked)
    pub fn new(move_threshold: Decimal, sum_target: Decimal, window_minutes: Decimal) -> Self {
        Self {
            move_threshold,
            sum_target,
            window_minutes,
        }
    }

    /// Check the combination can be simulated on rounds of the given length
    pub fn validate(&self, round_duration: Duration) -> Result<(), ParamsError> {
        if self.move_threshold <= Decimal::ZERO || self.move_threshold >= Decimal::ONE {
            return Err(ParamsError::MoveThresholdOutOfRange(self.move_threshold));
        }
        if self.sum_target <= Decimal::ZERO {
            return Err(ParamsError::SumTargetNotPositive(self.sum_target));
        }
        if self.sum_target >= Decimal::ONE {
            return Err(ParamsError::DegenerateSumTarget(self.sum_target));
        }

        let round_minutes = Decimal::from(round_duration.num_milliseconds()) / dec!(60000);
        if self.window_minutes <= Decimal::ZERO || self.window_minutes > round_minutes {
            return Err(ParamsError::WindowOutOfRange {
                window: self.window_minutes,
                round_minutes: round_minutes.normalize(),
            });
        }
        Ok(())
    }

    /// Observation window as a duration (millisecond resolution)
    pub fn window(&self) -> Duration {
        let millis = (self.window_minutes * dec!(60000))
            .round()
            .to_i64()
            .unwrap_or(i64::MAX);
        Duration::milliseconds(millis)
    }
}

impl Default for StrategyParams {
    /// Live bot defaults
    fn default() -> Self {
        Self {
            move_threshold: dec!(0.15),
            sum_target: dec!(0.95),
            window_minutes: dec!(2.0),
        }
    }
}

impl std::fmt::Display for StrategyParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "move={} sum={} window={}m",
            self.move_threshold, self.sum_target, self.window_minutes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn five_min() -> Duration {
        Duration::minutes(5)
    }

    #[test]
    fn test_default_params_valid() {
        assert!(StrategyParams::default().validate(five_min()).is_ok());
    }

    #[test]
    fn test_degenerate_sum_target() {
        let p = StrategyParams::new(dec!(0.15), dec!(1.0), dec!(2));
        assert_eq!(
            p.validate(five_min()),
            Err(ParamsError::DegenerateSumTarget(dec!(1.0)))
        );
        let p = StrategyParams::new(dec!(0.15), dec!(1.05), dec!(2));
        assert!(matches!(
            p.validate(five_min()),
            Err(ParamsError::DegenerateSumTarget(_))
        ));
    }

    #[test]
    fn test_move_threshold_range() {
        for bad in [dec!(0), dec!(1), dec!(-0.1)] {
            let p = StrategyParams::new(bad, dec!(0.95), dec!(2));
            assert!(matches!(
                p.validate(five_min()),
                Err(ParamsError::MoveThresholdOutOfRange(_))
            ));
        }
    }

    #[test]
    fn test_window_exceeds_round() {
        let p = StrategyParams::new(dec!(0.15), dec!(0.95), dec!(5.5));
        let err = p.validate(five_min()).unwrap_err();
        assert!(matches!(err, ParamsError::WindowOutOfRange { .. }));
        assert_eq!(err.to_string(), "window_minutes 5.5 outside (0, 5]");
    }

    #[test]
    fn test_window_equal_to_round_is_valid() {
        let p = StrategyParams::new(dec!(0.15), dec!(0.95), dec!(5));
        assert!(p.validate(five_min()).is_ok());
    }

    #[test]
    fn test_window_duration() {
        let p = StrategyParams::new(dec!(0.15), dec!(0.95), dec!(1.5));
        assert_eq!(p.window(), Duration::seconds(90));
        let p = StrategyParams::new(dec!(0.15), dec!(0.95), dec!(2.5));
        assert_eq!(p.window(), Duration::seconds(150));
    }

    #[test]
    fn test_display() {
        let p = StrategyParams::new(dec!(0.15), dec!(0.95), dec!(2.0));
        assert_eq!(p.to_string(), "move=0.15 sum=0.95 window=2.0m");
    }
}
