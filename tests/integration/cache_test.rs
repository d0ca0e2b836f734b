//! Cache loading through to persisted results

use chrono::Duration;
use poly_hedge::data::{
    read_result_rows, JsonCacheSource, ResultWriter, RoundSource, StaticSource, MARKETS_FILE,
};
use poly_hedge::optimizer::{GridOptimizer, OptimizerSettings, ParameterGrid};
use poly_hedge::round::{RoundSet, Tick};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;
use std::path::Path;
use tempfile::TempDir;

use crate::support::random_rounds;

/// Condition id whose leading 16 characters differ per round
fn condition_id(i: usize) -> String {
    format!("0x{i:04x}{:036x}", 0)
}

/// Write rounds in the fetcher's cache layout
fn write_cache(dir: &Path, count: usize) {
    let rounds = random_rounds(count, 21);
    let source = JsonCacheSource::new(dir, Duration::minutes(5));
    let markets: Vec<_> = rounds
        .iter()
        .enumerate()
        .map(|(i, r)| {
            json!({
                "condition_id": condition_id(i),
                "market_slug": format!("btc-updown-5m-{}", r.end_time.timestamp()),
                "question": format!("Bitcoin Up or Down round {i}"),
            })
        })
        .collect();
    std::fs::write(dir.join(MARKETS_FILE), serde_json::to_string(&markets).unwrap()).unwrap();

    for (i, r) in rounds.iter().enumerate() {
        let series = |f: fn(&Tick) -> Decimal| {
            r.ticks
                .iter()
                .map(|t| {
                    let p: f64 = f(t).to_string().parse().unwrap();
                    json!({"t": t.timestamp.timestamp(), "p": p})
                })
                .collect::<Vec<_>>()
        };
        let prices = json!({"up": series(|t| t.up_ask), "down": series(|t| t.down_ask)});
        std::fs::write(source.price_path(&condition_id(i)), prices.to_string()).unwrap();
    }
}

#[tokio::test]
async fn test_cached_rounds_match_generated() {
    let dir = TempDir::new().unwrap();
    write_cache(dir.path(), 6);

    let source = JsonCacheSource::new(dir.path(), Duration::minutes(5));
    let loaded = source.load_rounds().await.unwrap();
    let expected = random_rounds(6, 21);

    assert_eq!(loaded.len(), 6);
    for (i, (got, want)) in loaded.iter().zip(&expected).enumerate() {
        assert_eq!(got.round_id, condition_id(i));
        assert_eq!(got.start_time, want.start_time);
        assert_eq!(got.end_time, want.end_time);
        assert_eq!(got.ticks, want.ticks);
    }
}

#[tokio::test]
async fn test_cache_to_parquet_pipeline() {
    let cache = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_cache(cache.path(), 12);

    let source = JsonCacheSource::new(cache.path(), Duration::minutes(5));
    let rounds = RoundSet::prepare(source.load_rounds().await.unwrap(), 3);
    assert_eq!(rounds.len(), 12);
    assert!(rounds.skipped().is_empty());
    let grid = ParameterGrid::new(
        vec![dec!(0.10), dec!(0.20)],
        vec![dec!(0.93), dec!(0.97)],
        vec![dec!(1.5), dec!(3)],
    );
    let report = GridOptimizer::new(OptimizerSettings::default())
        .run_prepared(&grid, &rounds)
        .unwrap();

    let paths = ResultWriter::new(output.path()).write_all(&report).unwrap();
    let rows = read_result_rows(&paths[1]).unwrap();

    assert_eq!(rows.len(), 8);
    assert!(rows.iter().all(|r| r.status == "evaluated"));
    assert_eq!(rows[0].total_profit, report.best().map(|b| b.total_profit));
    assert_eq!(rows.iter().map(|r| r.rank).collect::<Vec<_>>(), (1..=8).collect::<Vec<_>>());
}

#[test]
fn test_price_files_are_distinct_per_market() {
    let dir = TempDir::new().unwrap();
    write_cache(dir.path(), 12);

    let price_files = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().starts_with("prices_"))
        .count();
    assert_eq!(price_files, 12);
}

#[test]
fn test_static_source_is_transparent() {
    let rounds = random_rounds(3, 2);
    let source = StaticSource::new(rounds.clone());
    let loaded = tokio_test::block_on(source.load_rounds()).unwrap();
    assert_eq!(loaded, rounds);
}
