//! Market and account data as seen by the pipeline.
//!
//! These are plain value types. The platform adapters fill them in and the
//! application layer only ever reads them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::Symbol;
use super::money::{Amount, Currency, Price, Volume};

/// Bar aggregation window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Timeframe {
    #[default]
    M1,
    M2,
    M3,
    M4,
    M5,
    M6,
    M10,
    M12,
    M15,
    M20,
    M30,
    H1,
    H2,
    H3,
    H4,
    H6,
    H8,
    H12,
    D1,
    W1,
    MN1,
}

impl Timeframe {
    const LABELS: [(Timeframe, &'static str); 21] = [
        (Timeframe::M1, "1min"),
        (Timeframe::M2, "2min"),
        (Timeframe::M3, "3min"),
        (Timeframe::M4, "4min"),
        (Timeframe::M5, "5min"),
        (Timeframe::M6, "6min"),
        (Timeframe::M10, "10min"),
        (Timeframe::M12, "12min"),
        (Timeframe::M15, "15min"),
        (Timeframe::M20, "20min"),
        (Timeframe::M30, "30min"),
        (Timeframe::H1, "1h"),
        (Timeframe::H2, "2h"),
        (Timeframe::H3, "3h"),
        (Timeframe::H4, "4h"),
        (Timeframe::H6, "6h"),
        (Timeframe::H8, "8h"),
        (Timeframe::H12, "12h"),
        (Timeframe::D1, "1d"),
        (Timeframe::W1, "1w"),
        (Timeframe::MN1, "1M"),
    ];

    /// Configuration label, e.g. `"1min"` or `"4h"`.
    #[must_use]
    pub fn label(self) -> &'static str {
        Self::LABELS
            .iter()
            .find(|(tf, _)| *tf == self)
            .map_or("?", |(_, label)| label)
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Timeframe {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::LABELS
            .iter()
            .find(|(_, label)| *label == s)
            .map(|(tf, _)| *tf)
            .ok_or_else(|| DomainError::InvalidTimeframe {
                label: s.to_string(),
            })
    }
}

impl TryFrom<String> for Timeframe {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Timeframe> for String {
    fn from(tf: Timeframe) -> Self {
        tf.label().to_string()
    }
}

/// A closed OHLC bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bar {
    /// Bar open time.
    pub time: DateTime<Utc>,
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
    #[serde(default)]
    pub tick_volume: u64,
    #[serde(default)]
    pub real_volume: u64,
    /// Spread in points.
    #[serde(default)]
    pub spread: u32,
}

/// Most recent bid/ask quote for an instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tick {
    pub time: DateTime<Utc>,
    pub bid: Price,
    pub ask: Price,
}

/// Broker-declared trading properties of an instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentSpec {
    pub symbol: Symbol,
    /// Smallest tradeable volume.
    pub volume_min: Volume,
    pub volume_max: Volume,
    /// Volume increment.
    pub volume_step: Volume,
    /// Minimum price change.
    pub tick_size: Price,
    /// Units per lot.
    pub contract_size: Amount,
    /// Currency in which profit and loss accrue.
    pub profit_currency: Currency,
}

/// Account-level state used for sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub equity: Amount,
    pub balance: Amount,
    pub currency: Currency,
}
