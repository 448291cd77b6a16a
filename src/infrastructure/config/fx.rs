//! Supported FX pairs for currency conversion.

use chrono::Duration;
use serde::Deserialize;

use crate::domain::error::DomainError;
use crate::domain::FxPairs;

/// `[fx]` section.
///
/// Omitting `pairs` selects the built-in table of 30 major and cross pairs.
/// Omitting `max_quote_age_secs` accepts quotes of any age.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FxConfig {
    #[serde(default)]
    pub pairs: Option<Vec<String>>,
    #[serde(default)]
    pub max_quote_age_secs: Option<u64>,
}

impl FxConfig {
    /// Build the validated pair table.
    pub fn pairs(&self) -> Result<FxPairs, DomainError> {
        match &self.pairs {
            Some(symbols) => FxPairs::new(symbols),
            None => Ok(FxPairs::default()),
        }
    }

    /// Maximum accepted quote age, if one is configured and representable.
    #[must_use]
    pub fn max_quote_age(&self) -> Option<Duration> {
        self.max_quote_age_secs
            .and_then(|secs| i64::try_from(secs).ok())
            .and_then(Duration::try_seconds)
    }
}
