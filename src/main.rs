use clap::Parser;
use poly_hedge::cli::{Cli, Commands};
use poly_hedge::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        Config::default()
    });

    // Initialize telemetry
    poly_hedge::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Optimize(args) => {
            tracing::info!("Starting grid search");
            args.execute(&config).await?;
        }
        Commands::Simulate(args) => {
            tracing::info!("Starting backtest");
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!(
                "  Strategy: slippage={}, min_ticks={}, round={}m",
                config.strategy.slippage,
                config.strategy.min_ticks,
                config.strategy.round_duration_minutes
            );
            println!(
                "  Grid: {} moves x {} sums x {} windows = {} configs",
                config.grid.move_thresholds.len(),
                config.grid.sum_targets.len(),
                config.grid.window_minutes.len(),
                config.grid.total_combinations()
            );
            println!(
                "  Optimizer: workers={}, top={}, bottom={}, budget={}",
                config.optimizer.workers,
                config.optimizer.top_n,
                config.optimizer.bottom_n,
                config
                    .optimizer
                    .time_budget_secs
                    .map_or_else(|| "none".to_string(), |s| format!("{s}s"))
            );
            println!(
                "  Data: cache={:?}, output={:?}",
                config.data.cache_dir, config.data.output_dir
            );
            println!(
                "  Sizing: min_score={}, sized_score={}, shares={}/{}",
                config.sizing.min_score,
                config.sizing.sized_score,
                config.sizing.base_shares,
                config.sizing.max_shares
            );
        }
    }

    Ok(())
}
