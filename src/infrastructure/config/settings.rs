//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all pipeline settings.
//! Configuration is loaded from a TOML file; the snapshot path may be
//! overridden through `BARFLOW_SNAPSHOT_PATH`.
//!
//! # Example
//!
//! ```no_run
//! use barflow::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;

use super::engine::EngineConfig;
use super::fx::FxConfig;
use super::logging::LoggingConfig;
use super::market::MarketConfig;
use super::platform::{PlatformConfig, SNAPSHOT_PATH_ENV};
use crate::application::signal::MaCrossoverConfig;
use crate::application::sizing::SizingConfig;
use crate::domain::FxPairs;
use crate::error::{ConfigError, Result};

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`]. Every section is optional except the symbol list
/// and the snapshot path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Event loop tuning.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Symbols and timeframe to poll.
    #[serde(default)]
    pub market: MarketConfig,

    /// Position sizing method.
    #[serde(default)]
    pub sizing: SizingConfig,

    /// Moving-average crossover parameters.
    #[serde(default)]
    pub signal: MaCrossoverConfig,

    /// FX pairs used to convert tick values into the account currency.
    #[serde(default)]
    pub fx: FxConfig,

    /// Where platform state is read from.
    #[serde(default)]
    pub platform: PlatformConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// Applies the `BARFLOW_SNAPSHOT_PATH` override before validating.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_snapshot_override(std::env::var(SNAPSHOT_PATH_ENV).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Initialize tracing from the `[logging]` section.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Validated FX pair table.
    pub fn fx_pairs(&self) -> Result<FxPairs> {
        self.fx.pairs().map_err(|e| {
            ConfigError::InvalidValue {
                field: "fx.pairs",
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Snapshot file path. Present on every validated config.
    pub fn snapshot_path(&self) -> Result<&Path> {
        self.platform
            .snapshot_path
            .as_deref()
            .ok_or_else(|| {
                ConfigError::MissingField {
                    field: "platform.snapshot_path",
                }
                .into()
            })
    }

    fn apply_snapshot_override(&mut self, value: Option<String>) {
        if let Some(path) = value.filter(|p| !p.trim().is_empty()) {
            self.platform.snapshot_path = Some(PathBuf::from(path));
        }
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        if self.engine.poll_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "engine.poll_interval_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if self.market.symbols.is_empty() {
            return Err(ConfigError::MissingField {
                field: "market.symbols",
            }
            .into());
        }
        let mut seen = HashSet::new();
        for symbol in &self.market.symbols {
            if symbol.as_str().trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "market.symbols",
                    reason: "symbol must not be empty".to_string(),
                }
                .into());
            }
            if !seen.insert(symbol) {
                return Err(ConfigError::InvalidValue {
                    field: "market.symbols",
                    reason: format!("{symbol} is listed more than once"),
                }
                .into());
            }
        }

        match &self.sizing {
            SizingConfig::Minimum => {}
            SizingConfig::Fixed { volume } => {
                if *volume <= Decimal::ZERO {
                    return Err(ConfigError::InvalidValue {
                        field: "sizing.volume",
                        reason: "must be greater than 0".to_string(),
                    }
                    .into());
                }
            }
            SizingConfig::RiskPct { risk_pct } => {
                if *risk_pct <= Decimal::ZERO || *risk_pct > Decimal::ONE {
                    return Err(ConfigError::InvalidValue {
                        field: "sizing.risk_pct",
                        reason: "must be a fraction in (0, 1]".to_string(),
                    }
                    .into());
                }
            }
        }

        if self.signal.fast_period == 0 || self.signal.fast_period >= self.signal.slow_period {
            return Err(ConfigError::InvalidValue {
                field: "signal.fast_period",
                reason: "must satisfy 0 < fast_period < slow_period".to_string(),
            }
            .into());
        }

        if let SizingConfig::RiskPct { .. } = self.sizing {
            if self.signal.stop_loss_points == 0 {
                return Err(ConfigError::InvalidValue {
                    field: "signal.stop_loss_points",
                    reason: "must be greater than 0 when sizing.method is risk_pct".to_string(),
                }
                .into());
            }
        }

        self.fx_pairs()?;
        if let Some(secs) = self.fx.max_quote_age_secs {
            if secs == 0 || self.fx.max_quote_age().is_none() {
                return Err(ConfigError::InvalidValue {
                    field: "fx.max_quote_age_secs",
                    reason: "must be a positive number of seconds".to_string(),
                }
                .into());
            }
        }
        self.snapshot_path()?;

        if !LoggingConfig::FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("expected one of {:?}", LoggingConfig::FORMATS),
            }
            .into());
        }

        Ok(())
    }
}
