//! Tracked instruments.

use serde::Deserialize;

use crate::domain::{Symbol, Timeframe};

/// `[market]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarketConfig {
    /// Symbols polled for new bars, in polling order.
    #[serde(default)]
    pub symbols: Vec<Symbol>,
    /// Bar timeframe, e.g. `"1min"` or `"4h"`.
    #[serde(default)]
    pub timeframe: Timeframe,
}
