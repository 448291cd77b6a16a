//! Handler for `barflow check config`.

use std::path::Path;

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Load and validate a configuration file without starting the engine.
pub fn execute_config<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let path = config_path.as_ref();
    let config = Config::load(path)?;
    let pairs = config.fx_pairs()?;
    let snapshot = config.snapshot_path()?;

    output::section("Configuration Check");
    output::field("Config", path.display());
    output::success("Configuration file is valid");

    let symbols: Vec<&str> = config.market.symbols.iter().map(|s| s.as_str()).collect();

    output::section("Summary");
    output::field("Symbols", symbols.join(", "));
    output::field("Timeframe", config.market.timeframe);
    output::field("Sizing", config.sizing.method());
    output::field(
        "Signal",
        format!(
            "ma_crossover fast={} slow={}",
            config.signal.fast_period, config.signal.slow_period
        ),
    );
    output::field("FX pairs", pairs.len());
    output::field("Poll interval", format!("{}ms", config.engine.poll_interval_ms));
    output::field(
        "On error",
        format!("{:?}", config.engine.on_handler_error).to_lowercase(),
    );
    output::field("Snapshot", snapshot.display());

    if snapshot.exists() {
        output::success("Snapshot file found");
    } else {
        output::warning("Snapshot file not found; `run` will fail until it exists");
    }

    Ok(())
}
