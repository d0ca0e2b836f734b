//! Simulate command implementation

use clap::Args;
use rust_decimal::Decimal;
use std::path::PathBuf;

use crate::backtest::{aggregate, replay, RoundSimulator};
use crate::config::Config;
use crate::strategy::{LegFill, StrategyParams, TradeOutcome};

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Directory containing the round cache (defaults to data.cache_dir)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Fractional single-tick drop that triggers leg 1
    #[arg(long = "move", default_value = "0.15")]
    pub move_threshold: Decimal,

    /// Maximum combined cost of both legs
    #[arg(long = "sum", default_value = "0.95")]
    pub sum_target: Decimal,

    /// Minutes after round start during which leg 1 may trigger
    #[arg(long = "window", default_value = "2")]
    pub window_minutes: Decimal,

    /// Print every triggered trade
    #[arg(long)]
    pub trades: bool,
}

impl SimulateArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let params = StrategyParams::new(self.move_threshold, self.sum_target, self.window_minutes);
        params.validate(config.strategy.round_duration())?;

        let data_dir = self.data_dir.as_ref().unwrap_or(&config.data.cache_dir);
        let round_set = super::load_round_set(config, data_dir).await?;
        if round_set.is_empty() {
            anyhow::bail!(
                "No valid rounds to simulate ({} skipped)",
                round_set.skipped().len()
            );
        }

        tracing::info!(%params, rounds = round_set.len(), "Running backtest");

        let simulator = RoundSimulator::new(config.strategy.slippage);
        let outcomes = replay(round_set.rounds(), params, &simulator);

        if self.trades {
            for outcome in outcomes.iter().filter(|o| o.status.is_triggered()) {
                println!("{}", format_trade(outcome));
            }
        }

        println!("{}", aggregate(params, &outcomes).format_table());
        Ok(())
    }
}

fn format_trade(outcome: &TradeOutcome) -> String {
    let leg = |fill: Option<&LegFill>| match fill {
        Some(f) => format!("{} @ {}", f.side, f.entry_price),
        None => "-".to_string(),
    };
    format!(
        "{}  {:<24}  {:<9}  leg1 {:<12}  leg2 {:<12}  {:+}",
        outcome.trigger_time().unwrap_or(outcome.round_start).format("%Y-%m-%d %H:%M:%S"),
        outcome.round_id,
        format!("{:?}", outcome.status),
        leg(outcome.leg1.as_ref()),
        leg(outcome.leg2.as_ref()),
        outcome.profit,
    )
}
