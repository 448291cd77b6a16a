use thiserror::Error;

use crate::domain::error::DomainError;
use crate::domain::{Currency, EventKind, Price, Symbol, Volume};

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Event queue errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    #[error("event queue closed: consumer dropped")]
    Closed,
}

/// Currency conversion failures.
///
/// Each of these means "no usable amount"; callers treat them as a
/// rejection of whatever calculation needed the conversion.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("no supported FX pair converts {from} to {to}")]
    UnsupportedPair { from: Currency, to: Currency },

    #[error("no quote available for {symbol}")]
    QuoteUnavailable { symbol: Symbol },

    #[error("invalid bid {bid} for {symbol}")]
    InvalidQuote { symbol: Symbol, bid: Price },

    #[error("quote for {symbol} is {age_secs}s old")]
    StaleQuote { symbol: Symbol, age_secs: i64 },

    #[error("arithmetic overflow converting {from} to {to}")]
    Arithmetic { from: Currency, to: Currency },
}

/// Reasons a position size could not be produced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SizingError {
    #[error("risk fraction {risk_pct} is not positive")]
    InvalidRiskFraction { risk_pct: rust_decimal::Decimal },

    #[error("stop loss {stop_loss} is not positive")]
    InvalidStopLoss { stop_loss: Price },

    #[error("no tick available for {symbol}")]
    TickUnavailable { symbol: Symbol },

    #[error("account information unavailable")]
    AccountUnavailable,

    #[error("instrument information unavailable for {symbol}")]
    InstrumentUnavailable { symbol: Symbol },

    #[error("invalid instrument data for {symbol}: {reason}")]
    InvalidInstrument { symbol: Symbol, reason: &'static str },

    #[error("tick value conversion failed: {0}")]
    Conversion(#[from] ConversionError),

    #[error("entry {entry} and stop loss {stop_loss} are less than one tick apart")]
    ZeroTickDistance { entry: Price, stop_loss: Price },

    #[error("arithmetic failure: {0}")]
    Arithmetic(&'static str),

    #[error("volume {volume} is below the minimum {volume_min} for {symbol}")]
    BelowMinimum {
        symbol: Symbol,
        volume: Volume,
        volume_min: Volume,
    },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Queue(#[from] QueueError),

    #[error(transparent)]
    Sizing(#[from] SizingError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error("handler for {kind} events failed: {reason}")]
    Handler { kind: EventKind, reason: String },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
