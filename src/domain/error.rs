//! Domain validation errors for core domain types.
//!
//! These errors are returned by constructors that validate inputs, such as
//! [`Currency::new`](crate::domain::Currency::new) or
//! [`SizingEvent::new`](crate::domain::SizingEvent::new).
//!
//! # Examples
//!
//! ```
//! use barflow::domain::error::DomainError;
//! use barflow::domain::Currency;
//!
//! let result = Currency::new("EURO");
//! assert!(matches!(result, Err(DomainError::InvalidCurrency { .. })));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Currency codes are exactly three ASCII letters.
    #[error("invalid currency code '{code}'")]
    InvalidCurrency {
        /// The rejected input.
        code: String,
    },

    /// FX symbols are two concatenated currency codes with distinct legs.
    #[error("invalid FX symbol '{symbol}'")]
    InvalidFxSymbol {
        /// The rejected input.
        symbol: String,
    },

    /// The same currency pair appears more than once (directly or inverted).
    #[error("FX pair '{symbol}' conflicts with '{existing}'")]
    AmbiguousFxPair {
        /// The pair being added.
        symbol: String,
        /// The pair already present.
        existing: String,
    },

    /// Unknown timeframe label.
    #[error("invalid timeframe '{label}'")]
    InvalidTimeframe {
        /// The rejected input.
        label: String,
    },

    /// Sized volumes are never negative.
    #[error("volume must not be negative, got {volume}")]
    NegativeVolume {
        /// The invalid volume that was provided.
        volume: rust_decimal::Decimal,
    },
}
