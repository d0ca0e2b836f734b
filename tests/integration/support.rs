//! Shared round builders

use chrono::{DateTime, Duration, TimeZone, Utc};
use poly_hedge::round::{MarketRound, Tick};
use rust_decimal::Decimal;

pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 5, 12, 0, 0).unwrap()
}

/// Five-minute round starting `offset_min` after the epoch; ticks are (seconds, up, down)
pub fn round(id: &str, offset_min: i64, ticks: &[(i64, Decimal, Decimal)]) -> MarketRound {
    let start = epoch() + Duration::minutes(offset_min);
    let ticks = ticks
        .iter()
        .map(|&(secs, up, down)| Tick::new(start + Duration::seconds(secs), up, down))
        .collect();
    MarketRound::new(id, start, start + Duration::minutes(5), ticks)
}

/// Deterministic pseudo-random walk rounds
pub fn random_rounds(count: usize, seed: u64) -> Vec<MarketRound> {
    let mut state = seed;
    let mut next = move |bound: u64| {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (state >> 33) % bound
    };

    (0..count)
        .map(|i| {
            let mut up: i64 = 50;
            let ticks: Vec<(i64, Decimal, Decimal)> = (0..10)
                .map(|t| {
                    if t > 0 {
                        up = (up + next(21) as i64 - 10).clamp(3, 97);
                    }
                    let down = (100 - up + next(5) as i64 - 2).clamp(2, 98);
                    (t * 30, Decimal::new(up, 2), Decimal::new(down, 2))
                })
                .collect();
            round(&format!("rnd-{i}"), 5 * i as i64, &ticks)
        })
        .collect()
}
