//! On-disk JSON round cache
//!
//! Layout written by the history fetcher:
//!
//! - `markets.json`: array of markets with `condition_id` and `market_slug`
//!   (`btc-updown-5m-<unix end timestamp>`)
//! - `prices_<first 16 chars of condition_id>.json`: `{"up": [{"t", "p"}], "down": [...]}`
//!   with `t` in unix seconds
//!
//! Up and down series are joined on common timestamps and each `p` is used as
//! that side's ask.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::{DataError, RoundSource};
use crate::round::{MarketRound, Tick};

/// Market index file name
pub const MARKETS_FILE: &str = "markets.json";

#[derive(Debug, Deserialize)]
struct CachedMarket {
    condition_id: String,
    market_slug: String,
    #[serde(default)]
    question: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CachedPrices {
    #[serde(default)]
    up: Vec<PricePoint>,
    #[serde(default)]
    down: Vec<PricePoint>,
}

#[derive(Debug, Deserialize)]
struct PricePoint {
    t: i64,
    p: Decimal,
}

/// Loads rounds from the JSON cache directory
#[derive(Debug, Clone)]
pub struct JsonCacheSource {
    cache_dir: PathBuf,
    round_duration: Duration,
}

impl JsonCacheSource {
    /// Create a source over `cache_dir` for rounds of the given length
    pub fn new(cache_dir: impl Into<PathBuf>, round_duration: Duration) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            round_duration,
        }
    }

    /// Price file for a market
    pub fn price_path(&self, condition_id: &str) -> PathBuf {
        let prefix: String = condition_id.chars().take(16).collect();
        self.cache_dir.join(format!("prices_{prefix}.json"))
    }

    async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, DataError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| DataError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        serde_json::from_str(&content).map_err(|source| DataError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    async fn load_market(&self, market: &CachedMarket) -> Option<MarketRound> {
        let Some(end_time) = slug_end_time(&market.market_slug) else {
            tracing::warn!(slug = %market.market_slug, "Unparseable market slug");
            return None;
        };

        let path = self.price_path(&market.condition_id);
        let prices: CachedPrices = match Self::read_json(&path).await {
            Ok(prices) => prices,
            Err(e) => {
                tracing::warn!(condition_id = %market.condition_id, error = %e, "No usable price history");
                return None;
            }
        };

        let ticks = align_series(&prices.up, &prices.down);
        tracing::debug!(
            condition_id = %market.condition_id,
            question = market.question.as_deref().unwrap_or("?"),
            ticks = ticks.len(),
            "Loaded round"
        );

        Some(MarketRound::new(
            market.condition_id.clone(),
            end_time - self.round_duration,
            end_time,
            ticks,
        ))
    }
}

#[async_trait]
impl RoundSource for JsonCacheSource {
    async fn load_rounds(&self) -> Result<Vec<MarketRound>, DataError> {
        let index = self.cache_dir.join(MARKETS_FILE);
        if !tokio::fs::try_exists(&index).await.unwrap_or(false) {
            return Err(DataError::MissingCache(self.cache_dir.clone()));
        }

        let markets: Vec<CachedMarket> = Self::read_json(&index).await?;
        let mut rounds = Vec::with_capacity(markets.len());
        for market in &markets {
            if let Some(round) = self.load_market(market).await {
                rounds.push(round);
            }
        }

        tracing::info!(
            cache_dir = ?self.cache_dir,
            markets = markets.len(),
            rounds = rounds.len(),
            "Loaded cached rounds"
        );
        Ok(rounds)
    }

    fn name(&self) -> &'static str {
        "json-cache"
    }
}

/// Round end time from the trailing unix timestamp of a slug
fn slug_end_time(slug: &str) -> Option<DateTime<Utc>> {
    let (_, suffix) = slug.rsplit_once('-')?;
    let ts: i64 = suffix.parse().ok()?;
    DateTime::from_timestamp(ts, 0)
}

/// Join both sides on timestamps present in each; later duplicates win
fn align_series(up: &[PricePoint], down: &[PricePoint]) -> Vec<Tick> {
    let down_by_t: BTreeMap<i64, Decimal> = down.iter().map(|pt| (pt.t, pt.p)).collect();
    let up_by_t: BTreeMap<i64, Decimal> = up.iter().map(|pt| (pt.t, pt.p)).collect();

    up_by_t
        .into_iter()
        .filter_map(|(t, up_ask)| {
            let down_ask = *down_by_t.get(&t)?;
            let timestamp = DateTime::from_timestamp(t, 0)?;
            Some(Tick::new(timestamp, up_ask, down_ask))
        })
        .collect()
}
