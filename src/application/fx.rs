//! Currency conversion through live FX quotes.
//!
//! A conversion between two different currencies needs the one supported FX
//! pair whose base and quote are exactly those currencies. The amount is
//! divided by the pair's bid when converting into the base currency and
//! multiplied by it when converting into the quote currency.
//!
//! With a maximum quote age set, a quote older than that age counts as
//! unavailable.

use chrono::{Duration, Utc};
use tracing::warn;

use crate::domain::{Amount, Currency, FxPairs};
use crate::error::ConversionError;
use crate::port::MarketData;

/// Converts amounts between currencies using a validated pair table.
#[derive(Debug, Clone, Default)]
pub struct CurrencyConverter {
    pairs: FxPairs,
    max_quote_age: Option<Duration>,
}

impl CurrencyConverter {
    #[must_use]
    pub fn new(pairs: FxPairs) -> Self {
        Self {
            pairs,
            max_quote_age: None,
        }
    }

    /// Reject quotes whose timestamp is older than `max_age`.
    #[must_use]
    pub fn with_max_quote_age(mut self, max_age: Duration) -> Self {
        self.max_quote_age = Some(max_age);
        self
    }

    #[must_use]
    pub fn pairs(&self) -> &FxPairs {
        &self.pairs
    }

    /// Convert `amount` from `from` into `to` at the current bid.
    ///
    /// Same-currency conversion is the identity and needs no quote.
    pub fn convert<M: MarketData + ?Sized>(
        &self,
        market: &M,
        amount: Amount,
        from: Currency,
        to: Currency,
    ) -> Result<Amount, ConversionError> {
        if from == to {
            return Ok(amount);
        }

        let result = self.convert_via_pair(market, amount, from, to);
        if let Err(e) = &result {
            warn!(%amount, %from, %to, error = %e, "Currency conversion failed");
        }
        result
    }

    fn convert_via_pair<M: MarketData + ?Sized>(
        &self,
        market: &M,
        amount: Amount,
        from: Currency,
        to: Currency,
    ) -> Result<Amount, ConversionError> {
        let pair = self
            .pairs
            .find(from, to)
            .ok_or(ConversionError::UnsupportedPair { from, to })?;

        let tick = market
            .latest_tick(pair.symbol())
            .ok_or_else(|| ConversionError::QuoteUnavailable {
                symbol: pair.symbol().clone(),
            })?;

        if let Some(max_age) = self.max_quote_age {
            let age = Utc::now().signed_duration_since(tick.time);
            if age > max_age {
                return Err(ConversionError::StaleQuote {
                    symbol: pair.symbol().clone(),
                    age_secs: age.num_seconds(),
                });
            }
        }

        if tick.bid <= Amount::ZERO {
            return Err(ConversionError::InvalidQuote {
                symbol: pair.symbol().clone(),
                bid: tick.bid,
            });
        }

        let converted = if to == pair.base() {
            amount.checked_div(tick.bid)
        } else {
            amount.checked_mul(tick.bid)
        };
        converted.ok_or(ConversionError::Arithmetic { from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::memory::MemoryPlatform;
    use crate::domain::{Symbol, Tick};
    use chrono::DateTime;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn ccy(code: &str) -> Currency {
        Currency::new(code).unwrap()
    }

    fn quote(platform: &MemoryPlatform, symbol: &str, bid: Decimal) {
        quote_at(platform, symbol, bid, Utc::now());
    }

    fn quote_at(platform: &MemoryPlatform, symbol: &str, bid: Decimal, time: DateTime<Utc>) {
        platform.set_tick(
            &Symbol::new(symbol),
            Tick {
                time,
                bid,
                ask: bid + dec!(0.0002),
            },
        );
    }

    #[test]
    fn same_currency_is_identity_without_quotes() {
        let converter = CurrencyConverter::default();
        let platform = MemoryPlatform::new();

        for amount in [dec!(0), dec!(1), dec!(123.456), dec!(-5)] {
            let out = converter.convert(&platform, amount, ccy("EUR"), ccy("EUR"));
            assert_eq!(out, Ok(amount));
        }
    }

    #[test]
    fn converting_into_quote_multiplies_by_bid() {
        let converter = CurrencyConverter::default();
        let platform = MemoryPlatform::new();
        quote(&platform, "EURUSD", dec!(1.10));

        let out = converter.convert(&platform, dec!(100), ccy("EUR"), ccy("USD"));
        assert_eq!(out, Ok(dec!(110.00)));
    }

    #[test]
    fn converting_into_base_divides_by_bid() {
        let converter = CurrencyConverter::default();
        let platform = MemoryPlatform::new();
        quote(&platform, "USDJPY", dec!(150));

        let out = converter.convert(&platform, dec!(1500), ccy("JPY"), ccy("USD"));
        assert_eq!(out, Ok(dec!(10)));
    }

    #[test]
    fn round_trip_returns_close_to_original() {
        let converter = CurrencyConverter::default();
        let platform = MemoryPlatform::new();
        quote(&platform, "GBPUSD", dec!(1.27345));

        let usd = converter
            .convert(&platform, dec!(2500), ccy("GBP"), ccy("USD"))
            .unwrap();
        let back = converter
            .convert(&platform, usd, ccy("USD"), ccy("GBP"))
            .unwrap();
        assert!((back - dec!(2500)).abs() < dec!(0.0000001));
    }

    #[test]
    fn unsupported_pair_is_an_error() {
        let converter = CurrencyConverter::default();
        let platform = MemoryPlatform::new();

        let out = converter.convert(&platform, dec!(1), ccy("SEK"), ccy("NOK"));
        assert_eq!(
            out,
            Err(ConversionError::UnsupportedPair {
                from: ccy("SEK"),
                to: ccy("NOK"),
            })
        );
    }

    #[test]
    fn missing_quote_is_an_error() {
        let converter = CurrencyConverter::default();
        let platform = MemoryPlatform::new();

        let out = converter.convert(&platform, dec!(1), ccy("EUR"), ccy("USD"));
        assert_eq!(
            out,
            Err(ConversionError::QuoteUnavailable {
                symbol: Symbol::new("EURUSD"),
            })
        );
    }

    #[test]
    fn non_positive_bid_is_rejected() {
        let converter = CurrencyConverter::default();
        let platform = MemoryPlatform::new();
        quote(&platform, "EURUSD", dec!(0));

        let out = converter.convert(&platform, dec!(1), ccy("USD"), ccy("EUR"));
        assert!(matches!(out, Err(ConversionError::InvalidQuote { .. })));
    }

    #[test]
    fn custom_table_limits_conversions() {
        let pairs = FxPairs::new(["EURUSD"]).unwrap();
        let converter = CurrencyConverter::new(pairs);
        let platform = MemoryPlatform::new();
        quote(&platform, "USDJPY", dec!(150));

        let out = converter.convert(&platform, dec!(1), ccy("USD"), ccy("JPY"));
        assert!(matches!(out, Err(ConversionError::UnsupportedPair { .. })));
    }

    #[test]
    fn quote_older_than_max_age_is_stale() {
        let converter = CurrencyConverter::default().with_max_quote_age(Duration::seconds(60));
        let platform = MemoryPlatform::new();
        quote_at(
            &platform,
            "EURUSD",
            dec!(1.10),
            Utc::now() - Duration::minutes(10),
        );

        let out = converter.convert(&platform, dec!(100), ccy("EUR"), ccy("USD"));
        match out {
            Err(ConversionError::StaleQuote { symbol, age_secs }) => {
                assert_eq!(symbol, Symbol::new("EURUSD"));
                assert!(age_secs >= 600);
            }
            other => panic!("expected stale quote, got {other:?}"),
        }
    }

    #[test]
    fn fresh_quote_passes_age_check() {
        let converter = CurrencyConverter::default().with_max_quote_age(Duration::seconds(60));
        let platform = MemoryPlatform::new();
        quote(&platform, "EURUSD", dec!(1.10));

        let out = converter.convert(&platform, dec!(100), ccy("EUR"), ccy("USD"));
        assert_eq!(out, Ok(dec!(110.00)));
    }

    #[test]
    fn quote_age_is_unchecked_by_default() {
        let converter = CurrencyConverter::default();
        let platform = MemoryPlatform::new();
        quote_at(
            &platform,
            "EURUSD",
            dec!(1.10),
            Utc::now() - Duration::days(30),
        );

        let out = converter.convert(&platform, dec!(100), ccy("EUR"), ccy("USD"));
        assert_eq!(out, Ok(dec!(110.00)));
    }
}
