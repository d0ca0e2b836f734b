//! Worked single-round scenarios

use chrono::Duration;
use poly_hedge::backtest::{aggregate, RoundSimulator};
use poly_hedge::round::{RoundSet, Side};
use poly_hedge::strategy::{OutcomeStatus, StrategyParams};
use rust_decimal_macros::dec;

use crate::support::round;

fn params() -> StrategyParams {
    StrategyParams::new(dec!(0.15), dec!(0.95), dec!(2))
}

#[test]
fn scenario_a_leg1_triggers_on_up_drop() {
    let r = round(
        "a",
        0,
        &[
            (0, dec!(0.50), dec!(0.50)),
            (30, dec!(0.40), dec!(0.60)),
            (60, dec!(0.40), dec!(0.60)),
        ],
    );
    let outcome = RoundSimulator::default().simulate(&r, &params());

    assert_eq!(outcome.leg1_side(), Some(Side::Up));
    assert_eq!(outcome.leg1_entry_price(), Some(dec!(0.41)));
    assert_eq!(outcome.trigger_time(), Some(r.start_time + Duration::seconds(30)));
}

#[test]
fn scenario_b_hedge_completes() {
    let r = round(
        "b",
        0,
        &[
            (0, dec!(0.50), dec!(0.50)),
            (30, dec!(0.40), dec!(0.60)),
            (60, dec!(0.45), dec!(0.52)),
        ],
    );
    let outcome = RoundSimulator::default().simulate(&r, &params());

    assert_eq!(outcome.status, OutcomeStatus::Win);
    assert_eq!(outcome.leg2_entry_price(), Some(dec!(0.53)));
    assert_eq!(outcome.profit, dec!(0.06));
    assert_eq!(outcome.completion_time, Some(r.start_time + Duration::seconds(60)));
}

#[test]
fn scenario_c_unhedged_round_is_full_loss() {
    let r = round(
        "c",
        0,
        &[
            (0, dec!(0.50), dec!(0.50)),
            (30, dec!(0.40), dec!(0.60)),
            (90, dec!(0.42), dec!(0.58)),
            (240, dec!(0.38), dec!(0.55)),
        ],
    );
    let outcome = RoundSimulator::default().simulate(&r, &params());

    assert_eq!(outcome.status, OutcomeStatus::Loss);
    assert_eq!(outcome.profit, dec!(-0.41));
    assert!(outcome.leg2.is_none());
    assert_eq!(outcome.completion_time, Some(r.end_time));
}

#[test]
fn scenario_d_no_tick_inside_window() {
    let r = round(
        "d",
        0,
        &[
            (180, dec!(0.50), dec!(0.50)),
            (210, dec!(0.30), dec!(0.70)),
            (240, dec!(0.30), dec!(0.60)),
        ],
    );
    let outcome = RoundSimulator::default().simulate(&r, &params());

    assert_eq!(outcome.status, OutcomeStatus::NoTrigger);
    assert_eq!(outcome.profit, dec!(0));
    assert!(outcome.leg1.is_none());
}

#[test]
fn scenario_e_short_round_excluded_from_denominators() {
    let rounds = vec![
        round(
            "win",
            0,
            &[
                (0, dec!(0.50), dec!(0.50)),
                (30, dec!(0.40), dec!(0.60)),
                (60, dec!(0.45), dec!(0.52)),
            ],
        ),
        round(
            "flat",
            5,
            &[
                (0, dec!(0.50), dec!(0.50)),
                (30, dec!(0.50), dec!(0.50)),
                (60, dec!(0.50), dec!(0.50)),
            ],
        ),
        round("short", 10, &[(0, dec!(0.50), dec!(0.50)), (30, dec!(0.30), dec!(0.70))]),
    ];

    let set = RoundSet::prepare(rounds, 3);
    assert_eq!(set.len(), 2);
    assert_eq!(set.skipped()[0].round_id, "short");

    let sim = RoundSimulator::default();
    let outcomes: Vec<_> = set.rounds().iter().map(|r| sim.simulate(r, &params())).collect();
    let summary = aggregate(params(), &outcomes);

    assert_eq!(summary.rounds, 2);
    assert_eq!(summary.trigger_rate, dec!(0.5));
    assert_eq!(summary.completion_rate, Some(dec!(1)));
    assert_eq!(summary.total_profit, dec!(0.06));
}
