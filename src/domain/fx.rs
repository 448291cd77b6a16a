//! Supported FX pairs and pair lookup.
//!
//! A pair is identified by a six-letter symbol: base currency followed by
//! quote currency, e.g. `EURUSD` quotes USD per EUR. The table rejects any
//! configuration in which two entries cover the same two currencies, so a
//! lookup has at most one answer.

use std::fmt;

use super::error::DomainError;
use super::id::Symbol;
use super::money::Currency;

/// Default pair list offered by most retail FX brokers.
pub const DEFAULT_FX_SYMBOLS: [&str; 30] = [
    "AUDCAD", "AUDCHF", "AUDJPY", "AUDNZD", "AUDUSD", "CADCHF", "CADJPY", "CHFJPY", "EURAUD",
    "EURCAD", "EURCHF", "EURGBP", "EURJPY", "EURNZD", "EURUSD", "GBPAUD", "GBPCAD", "GBPCHF",
    "GBPJPY", "GBPNZD", "GBPUSD", "NZDCAD", "NZDCHF", "NZDJPY", "NZDUSD", "USDCAD", "USDCHF",
    "USDJPY", "USDSEK", "USDNOK",
];

/// A tradeable currency pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FxPair {
    symbol: Symbol,
    base: Currency,
    quote: Currency,
}

impl FxPair {
    /// Parse a six-letter pair symbol such as `"EURUSD"`.
    pub fn parse(symbol: &str) -> Result<Self, DomainError> {
        let invalid = || DomainError::InvalidFxSymbol {
            symbol: symbol.to_string(),
        };
        if symbol.len() != 6 || !symbol.is_ascii() {
            return Err(invalid());
        }
        let base = Currency::new(&symbol[..3]).map_err(|_| invalid())?;
        let quote = Currency::new(&symbol[3..]).map_err(|_| invalid())?;
        if base == quote {
            return Err(invalid());
        }
        Ok(Self {
            symbol: Symbol::new(format!("{base}{quote}")),
            base,
            quote,
        })
    }

    #[must_use]
    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    #[must_use]
    pub const fn base(&self) -> Currency {
        self.base
    }

    #[must_use]
    pub const fn quote(&self) -> Currency {
        self.quote
    }

    /// True when this pair's two legs are exactly `a` and `b`, in either order.
    #[must_use]
    pub fn connects(&self, a: Currency, b: Currency) -> bool {
        (self.base == a && self.quote == b) || (self.base == b && self.quote == a)
    }
}

impl fmt::Display for FxPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

/// Validated set of supported pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FxPairs {
    pairs: Vec<FxPair>,
}

impl FxPairs {
    /// Build a table from pair symbols.
    ///
    /// Fails on a malformed symbol, a duplicate, or a pair listed alongside
    /// its inverse.
    pub fn new<I, S>(symbols: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut pairs: Vec<FxPair> = Vec::new();
        for symbol in symbols {
            let pair = FxPair::parse(symbol.as_ref())?;
            if let Some(existing) = pairs.iter().find(|p| p.connects(pair.base, pair.quote)) {
                return Err(DomainError::AmbiguousFxPair {
                    symbol: pair.symbol.to_string(),
                    existing: existing.symbol.to_string(),
                });
            }
            pairs.push(pair);
        }
        Ok(Self { pairs })
    }

    /// The pair that converts between `a` and `b`, if supported.
    #[must_use]
    pub fn find(&self, a: Currency, b: Currency) -> Option<&FxPair> {
        self.pairs.iter().find(|p| p.connects(a, b))
    }

    pub fn iter(&self) -> impl Iterator<Item = &FxPair> {
        self.pairs.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl Default for FxPairs {
    fn default() -> Self {
        let pairs = DEFAULT_FX_SYMBOLS
            .iter()
            .filter_map(|s| FxPair::parse(s).ok())
            .collect();
        Self { pairs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ccy(code: &str) -> Currency {
        Currency::new(code).unwrap()
    }

    #[test]
    fn parse_splits_base_and_quote() {
        let pair = FxPair::parse("eurusd").unwrap();
        assert_eq!(pair.base(), ccy("EUR"));
        assert_eq!(pair.quote(), ccy("USD"));
        assert_eq!(pair.symbol().as_str(), "EURUSD");
    }

    #[test]
    fn parse_rejects_malformed_symbols() {
        for symbol in ["EURUS", "EURUSDX", "EUREUR", "EUR/US", "ÉURUSD"] {
            assert!(
                matches!(FxPair::parse(symbol), Err(DomainError::InvalidFxSymbol { .. })),
                "{symbol} should be rejected"
            );
        }
    }

    #[test]
    fn default_table_holds_every_pair_once() {
        let table = FxPairs::default();
        assert_eq!(table.len(), DEFAULT_FX_SYMBOLS.len());
        // The default list must itself pass validation.
        assert_eq!(FxPairs::new(DEFAULT_FX_SYMBOLS).unwrap(), table);
    }

    #[test]
    fn find_matches_either_direction() {
        let table = FxPairs::default();
        let direct = table.find(ccy("USD"), ccy("JPY")).unwrap();
        let inverse = table.find(ccy("JPY"), ccy("USD")).unwrap();
        assert_eq!(direct.symbol().as_str(), "USDJPY");
        assert_eq!(direct, inverse);
    }

    #[test]
    fn find_requires_exact_legs() {
        let table = FxPairs::default();
        // NOK is only quoted against USD.
        assert!(table.find(ccy("EUR"), ccy("NOK")).is_none());
        assert!(table.find(ccy("USD"), ccy("NOK")).is_some());
    }

    #[test]
    fn new_rejects_inverse_duplicates() {
        let result = FxPairs::new(["EURUSD", "USDEUR"]);
        assert_eq!(
            result,
            Err(DomainError::AmbiguousFxPair {
                symbol: "USDEUR".into(),
                existing: "EURUSD".into(),
            })
        );
    }

    #[test]
    fn new_rejects_exact_duplicates() {
        assert!(matches!(
            FxPairs::new(["GBPUSD", "gbpusd"]),
            Err(DomainError::AmbiguousFxPair { .. })
        ));
    }
}
