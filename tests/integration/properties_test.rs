//! Invariants over generated round sets

use poly_hedge::backtest::{aggregate, equity_curve, max_drawdown, replay, RoundSimulator};
use poly_hedge::round::RoundSet;
use poly_hedge::strategy::{OutcomeStatus, StrategyParams};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::support::random_rounds;

fn rounds() -> RoundSet {
    RoundSet::prepare(random_rounds(60, 7), 3)
}

fn configs() -> Vec<StrategyParams> {
    let mut out = Vec::new();
    for m in [dec!(0.05), dec!(0.10), dec!(0.15), dec!(0.25)] {
        for s in [dec!(0.90), dec!(0.95), dec!(0.99)] {
            out.push(StrategyParams::new(m, s, dec!(2.5)));
        }
    }
    out
}

#[test]
fn p1_win_profit_is_non_negative() {
    let set = rounds();
    let sim = RoundSimulator::default();
    for params in configs() {
        for o in replay(set.rounds(), params, &sim) {
            if o.status == OutcomeStatus::Win {
                let (l1, l2) = (o.leg1_entry_price().unwrap(), o.leg2_entry_price().unwrap());
                assert_eq!(o.profit, Decimal::ONE - (l1 + l2));
                assert!(o.profit >= Decimal::ZERO, "{params}: {o:?}");
            }
        }
    }
}

#[test]
fn p2_loss_is_full_leg1_stake() {
    let set = rounds();
    let sim = RoundSimulator::default();
    for params in configs() {
        for o in replay(set.rounds(), params, &sim) {
            if o.status == OutcomeStatus::Loss {
                assert_eq!(o.profit, -o.leg1_entry_price().unwrap());
                assert!(o.leg2.is_none());
            }
        }
    }
}

#[test]
fn p3_no_trigger_is_neutral() {
    let set = rounds();
    let sim = RoundSimulator::default();
    for params in configs() {
        for o in replay(set.rounds(), params, &sim) {
            if o.status == OutcomeStatus::NoTrigger {
                assert_eq!(o.profit, Decimal::ZERO);
                assert!(o.leg1.is_none() && o.leg2.is_none());
                assert!(o.completion_time.is_none());
            }
        }
    }
}

#[test]
fn p4_aggregation_is_idempotent() {
    let set = rounds();
    let sim = RoundSimulator::default();
    for params in configs() {
        let outcomes = replay(set.rounds(), params, &sim);
        let a = aggregate(params, &outcomes);
        let b = aggregate(params, &outcomes);
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}

#[test]
fn p5_drawdown_is_non_negative() {
    let set = rounds();
    let sim = RoundSimulator::default();
    for params in configs() {
        let outcomes = replay(set.rounds(), params, &sim);
        let curve = equity_curve(&outcomes);
        assert!(max_drawdown(&curve) >= Decimal::ZERO);
        assert!(aggregate(params, &outcomes).max_drawdown >= Decimal::ZERO);
    }
}

#[test]
fn p6_lower_threshold_never_lowers_trigger_rate() {
    let set = rounds();
    let sim = RoundSimulator::default();
    let thresholds = [
        dec!(0.02),
        dec!(0.05),
        dec!(0.10),
        dec!(0.12),
        dec!(0.15),
        dec!(0.18),
        dec!(0.20),
        dec!(0.25),
        dec!(0.40),
    ];

    for window in [dec!(1), dec!(2), dec!(3)] {
        let rates: Vec<Decimal> = thresholds
            .iter()
            .map(|&m| {
                let params = StrategyParams::new(m, dec!(0.95), window);
                aggregate(params, &replay(set.rounds(), params, &sim)).trigger_rate
            })
            .collect();

        for pair in rates.windows(2) {
            assert!(pair[0] >= pair[1], "window {window}: {rates:?}");
        }
    }
}
