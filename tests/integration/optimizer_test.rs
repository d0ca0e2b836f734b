//! Full grid sweeps

use poly_hedge::optimizer::{GridOptimizer, GridResult, OptimizerSettings, ParameterGrid};
use rust_decimal_macros::dec;

use crate::support::random_rounds;

fn optimizer(workers: usize) -> GridOptimizer {
    GridOptimizer::new(OptimizerSettings {
        workers,
        ..OptimizerSettings::default()
    })
}

#[test]
fn test_default_grid_ranked_by_profit() {
    let report = optimizer(2)
        .run(&ParameterGrid::default(), random_rounds(40, 11))
        .unwrap();

    assert_eq!(report.results.len(), 150);
    assert!(report.invalid().is_empty());
    assert_eq!(report.rounds_used, 40);

    let ranked: Vec<_> = report.evaluated().collect();
    for pair in ranked.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        assert!(a.total_profit >= b.total_profit);
        if a.total_profit == b.total_profit {
            assert!(a.completion_rate_or_zero() >= b.completion_rate_or_zero());
        }
    }

    assert!(report.top_by_profit(10).len() <= 10);
    assert_eq!(
        report.top_by_profit(1)[0].total_profit,
        report.best().unwrap().total_profit
    );
    let worst = report.bottom_by_profit(1)[0];
    assert!(ranked.iter().all(|s| s.total_profit >= worst.total_profit));
    assert_eq!(
        report.profitable().len() + report.unprofitable().len(),
        ranked.len()
    );
}

#[test]
fn test_degenerate_points_flagged_and_ranked_last() {
    let grid = ParameterGrid::new(
        vec![dec!(0.10), dec!(0.20)],
        vec![dec!(0.95), dec!(1.00)],
        vec![dec!(2), dec!(10)],
    );
    let report = optimizer(3).run(&grid, random_rounds(20, 3)).unwrap();

    assert_eq!(report.results.len(), 8);
    assert_eq!(report.invalid().len(), 6);

    let first_invalid = report
        .results
        .iter()
        .position(GridResult::is_invalid)
        .unwrap();
    assert_eq!(first_invalid, 2);
    assert!(report.results[first_invalid..].iter().all(GridResult::is_invalid));
}

#[test]
fn test_sweep_is_deterministic_across_worker_counts() {
    let rounds = random_rounds(30, 5);
    let grid = ParameterGrid::default();
    let a = optimizer(1).run(&grid, rounds.clone()).unwrap();
    let b = optimizer(4).run(&grid, rounds).unwrap();

    assert_eq!(a.results, b.results);
    assert_ne!(a.run_id, b.run_id);
}

#[test]
fn test_report_serializes_invalid_marker() {
    let grid = ParameterGrid::new(vec![dec!(0.15)], vec![dec!(1.0)], vec![dec!(2)]);
    let report = optimizer(1).run(&grid, random_rounds(5, 1)).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["results"][0]["status"], "invalid");
    assert!(json["results"][0]["reason"].is_string());
    assert!(report.best().is_none());
    assert_eq!(report.profitable().len(), 0);
    assert_eq!(report.results[0].params().sum_target, dec!(1.0));
}
