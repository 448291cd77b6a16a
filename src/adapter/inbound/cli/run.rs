//! Handler for the `run` command.

use std::path::Path;

use tokio::sync::watch;
use tracing::{info, warn};

use crate::adapter::inbound::cli::output;
use crate::application::engine::StopReason;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// Load config, assemble the pipeline, and run until a terminal condition.
///
/// Ctrl-C flips the engine's shutdown watch, so the current handler finishes
/// before the loop exits.
pub async fn execute<P: AsRef<Path>>(config_path: P) -> Result<StopReason> {
    let config = Config::load(config_path)?;
    config.init_logging();

    output::header(env!("CARGO_PKG_VERSION"));
    info!("barflow starting");

    let platform = bootstrap::open_platform(&config)?;
    let mut engine = bootstrap::build_engine(&config, platform)?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            // Keep the sender alive; a dropped sender would stop the engine.
            warn!(error = %e, "Cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
        info!("Ctrl-C received, shutting down");
        let _ = shutdown_tx.send(true);
    });

    let reason = engine.run_with_shutdown(shutdown_rx).await?;
    let stats = engine.stats();

    output::section("Stopped");
    output::field("Reason", format!("{reason:?}"));
    output::field("Dispatched", stats.dispatched);
    output::field("Polls", stats.polls);
    output::field("Failures", stats.handler_failures);

    info!("barflow stopped");
    Ok(reason)
}
