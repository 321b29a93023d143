//! # Lumen-Bridge Runtime
//!
//! The main entry point for a bridge node.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging (`RUST_LOG` controls the filter)
//! 2. Load configuration (path from argv, defaults otherwise)
//! 3. Validate configuration before constructing anything
//! 4. Wire subsystems in dependency order (limiter → adapters → router → oracle)
//! 5. Spawn background tasks (reconciliation loop, window pruning)
//! 6. Signal ready; run until ctrl-c

mod config;
mod wiring;

use anyhow::Context;
use config::RuntimeConfig;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let path = PathBuf::from(path);
            info!(path = %path.display(), "loading configuration");
            RuntimeConfig::load(&path)?
        }
        None => {
            info!("no config path given, using defaults");
            RuntimeConfig::default()
        }
    };
    config.validate().context("invalid configuration")?;

    let node = wiring::build(&config)?;

    let reconcile_interval =
        Duration::from_secs(config.oracle.reconciliation_interval_secs);
    tokio::spawn(lb_04_supply_oracle::run_reconciliation_loop(
        Arc::clone(&node.oracle),
        reconcile_interval,
    ));
    tokio::spawn(lb_01_rate_limiter::run_pruning_loop(
        Arc::clone(&node.limiter),
        Duration::from_secs(config.prune_interval_secs),
    ));

    info!("bridge node ready");

    tokio::signal::ctrl_c()
        .await
        .context("listening for shutdown signal")?;
    info!("shutdown signal received, stopping");
    Ok(())
}
