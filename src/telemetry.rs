use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ObservabilityConfig;

/// Initialize structured logging.
///
/// RUST_LOG wins when set; otherwise the configured log level applies.
/// Operator-facing status lines go to stdout separately via println.
pub fn init_telemetry(observability: &ObservabilityConfig) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&observability.log_level));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(filter)
        .init();

    tracing::debug!("migctl telemetry initialized");
    Ok(())
}
