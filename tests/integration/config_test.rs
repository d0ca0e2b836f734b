//! Configuration loading

use poly_hedge::config::Config;
use poly_hedge::optimizer::{OptimizerSettings, ParameterGrid};
use poly_hedge::risk::ConfidenceTier;
use rust_decimal_macros::dec;
use std::path::Path;

#[test]
fn test_example_config_matches_defaults() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config.toml.example");
    let config = Config::load(&path).unwrap();

    assert_eq!(config.grid, ParameterGrid::default());
    assert_eq!(config.strategy.slippage, dec!(0.01));
    assert_eq!(config.strategy.min_ticks, 3);
    assert_eq!(config.optimizer.top_n, 10);
    assert_eq!(config.optimizer.bottom_n, 5);
    assert!(config.optimizer.time_budget_secs.is_none());
}

#[test]
fn test_partial_config_overrides() {
    let config: Config = toml::from_str(
        r#"
        [strategy]
        slippage = 0.02
        round_duration_minutes = 15

        [grid]
        move_thresholds = [0.2]
        sum_targets = [0.9]
        window_minutes = [10.0]

        [optimizer]
        workers = 2
        "#,
    )
    .unwrap();

    let settings = OptimizerSettings::from_config(&config);
    assert_eq!(settings.workers, 2);
    assert_eq!(settings.round_duration, chrono::Duration::minutes(15));
    assert_eq!(settings.simulator.fill_model().slippage, dec!(0.02));
    assert_eq!(config.grid.total_combinations(), 1);
    assert_eq!(config.strategy.min_ticks, 3);
}

#[test]
fn test_sizing_tiers_from_config() {
    let config: Config = toml::from_str("[sizing]\nmin_score = 3\nsized_score = 6\n").unwrap();
    assert_eq!(ConfidenceTier::classify(2, &config.sizing), ConfidenceTier::Skip);
    assert_eq!(ConfidenceTier::classify(5, &config.sizing), ConfidenceTier::Standard);
    assert_eq!(
        ConfidenceTier::Sized.position_size(&config.sizing),
        dec!(15)
    );
}
