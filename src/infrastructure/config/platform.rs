//! Platform connection configuration.

use std::path::PathBuf;

use serde::Deserialize;

/// Environment variable that overrides `[platform] snapshot_path`.
pub const SNAPSHOT_PATH_ENV: &str = "BARFLOW_SNAPSHOT_PATH";

/// `[platform]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlatformConfig {
    /// JSON state file written by the terminal bridge.
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,
}
