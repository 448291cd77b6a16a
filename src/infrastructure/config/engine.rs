//! Engine loop configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::application::engine::{EngineSettings, HandlerFailurePolicy};

/// `[engine]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Idle delay after polling an empty queue, in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// `isolate` keeps running after a handler error; `halt` stops the engine.
    #[serde(default)]
    pub on_handler_error: HandlerFailurePolicy,
}

const fn default_poll_interval_ms() -> u64 {
    10
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            on_handler_error: HandlerFailurePolicy::default(),
        }
    }
}

impl From<&EngineConfig> for EngineSettings {
    fn from(config: &EngineConfig) -> Self {
        Self {
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            failure_policy: config.on_handler_error,
        }
    }
}
