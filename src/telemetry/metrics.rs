//! Prometheus metrics

use std::net::{Ipv4Addr, SocketAddr};

use metrics_exporter_prometheus::PrometheusBuilder;

/// Sweep metric names
pub const ROUNDS_SKIPPED: &str = "poly_hedge_rounds_skipped_total";
pub const CONFIGS_EVALUATED: &str = "poly_hedge_configs_evaluated_total";
pub const CONFIGS_INVALID: &str = "poly_hedge_configs_invalid_total";
pub const CONFIG_EVAL_MS: &str = "poly_hedge_config_eval_ms";

/// Install the Prometheus recorder and start its HTTP listener
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| anyhow::anyhow!("Failed to start metrics exporter: {}", e))?;

    metrics::describe_counter!(ROUNDS_SKIPPED, "Rounds excluded for insufficient data");
    metrics::describe_counter!(CONFIGS_EVALUATED, "Grid points simulated");
    metrics::describe_counter!(CONFIGS_INVALID, "Grid points rejected before simulation");
    metrics::describe_histogram!(CONFIG_EVAL_MS, "Time to evaluate one grid point");

    tracing::info!(%addr, "Prometheus exporter listening");
    Ok(())
}
