//! Fixed-fractional risk sizing.
//!
//! Sizes a position so that being stopped out loses `risk_pct` of account
//! equity:
//!
//! ```text
//! tick_value  = contract_size × tick_size            (profit currency)
//!             → converted into the account currency
//! ticks       = floor(|entry − stop_loss| / tick_size)
//! volume      = equity × risk_pct / (ticks × tick_value)
//! ```
//!
//! The result is rounded to the instrument's volume step. Entry is the
//! current ask (buy) or bid (sell) for market orders and the signal's target
//! price for pending orders.

use rust_decimal::Decimal;

use super::strategy::{round_to_step, SizingStrategy};
use crate::application::fx::CurrencyConverter;
use crate::domain::{Price, SignalEvent, Side, Volume};
use crate::error::SizingError;
use crate::port::Platform;

/// Risks a fixed fraction of equity per trade.
#[derive(Debug, Clone)]
pub struct RiskPctSizer {
    risk_pct: Decimal,
    converter: CurrencyConverter,
}

impl RiskPctSizer {
    /// `risk_pct` is a fraction: `0.01` risks one percent of equity.
    #[must_use]
    pub fn new(risk_pct: Decimal, converter: CurrencyConverter) -> Self {
        Self {
            risk_pct,
            converter,
        }
    }

    fn entry_price(signal: &SignalEvent, platform: &dyn Platform) -> Result<Price, SizingError> {
        if signal.target_order.is_pending() {
            return Ok(signal.target_price);
        }
        let tick = platform
            .latest_tick(&signal.symbol)
            .ok_or_else(|| SizingError::TickUnavailable {
                symbol: signal.symbol.clone(),
            })?;
        Ok(match signal.signal {
            Side::Buy => tick.ask,
            Side::Sell => tick.bid,
        })
    }
}

impl SizingStrategy for RiskPctSizer {
    fn name(&self) -> &'static str {
        "risk_pct"
    }

    fn size(&self, signal: &SignalEvent, platform: &dyn Platform) -> Result<Volume, SizingError> {
        if self.risk_pct <= Decimal::ZERO {
            return Err(SizingError::InvalidRiskFraction {
                risk_pct: self.risk_pct,
            });
        }
        if signal.stop_loss <= Price::ZERO {
            return Err(SizingError::InvalidStopLoss {
                stop_loss: signal.stop_loss,
            });
        }

        let entry = Self::entry_price(signal, platform)?;
        let account = platform.account().ok_or(SizingError::AccountUnavailable)?;
        let spec = platform
            .instrument(&signal.symbol)
            .ok_or_else(|| SizingError::InstrumentUnavailable {
                symbol: signal.symbol.clone(),
            })?;
        if spec.tick_size <= Decimal::ZERO {
            return Err(SizingError::InvalidInstrument {
                symbol: signal.symbol.clone(),
                reason: "tick size is not positive",
            });
        }
        if spec.contract_size <= Decimal::ZERO {
            return Err(SizingError::InvalidInstrument {
                symbol: signal.symbol.clone(),
                reason: "contract size is not positive",
            });
        }

        let tick_value_profit_ccy = spec
            .contract_size
            .checked_mul(spec.tick_size)
            .ok_or(SizingError::Arithmetic("tick value overflowed"))?;
        let tick_value = self.converter.convert(
            platform,
            tick_value_profit_ccy,
            spec.profit_currency,
            account.currency,
        )?;

        let distance = entry
            .checked_sub(signal.stop_loss)
            .ok_or(SizingError::Arithmetic("price distance overflowed"))?
            .abs();
        let ticks = distance
            .checked_div(spec.tick_size)
            .ok_or(SizingError::Arithmetic("tick distance overflowed"))?
            .floor();
        if ticks.is_zero() {
            return Err(SizingError::ZeroTickDistance {
                entry,
                stop_loss: signal.stop_loss,
            });
        }

        let monetary_risk = account
            .equity
            .checked_mul(self.risk_pct)
            .ok_or(SizingError::Arithmetic("monetary risk overflowed"))?;
        let risk_per_lot = ticks
            .checked_mul(tick_value)
            .ok_or(SizingError::Arithmetic("risk per lot overflowed"))?;
        let raw_volume = monetary_risk
            .checked_div(risk_per_lot)
            .ok_or(SizingError::Arithmetic("tick value is zero"))?;

        round_to_step(raw_volume, spec.volume_step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::memory::MemoryPlatform;
    use crate::domain::{
        AccountSnapshot, Currency, InstrumentSpec, MagicNumber, OrderType, Symbol, Tick,
    };
    use crate::error::ConversionError;
    use crate::port::AccountData;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn ccy(code: &str) -> Currency {
        Currency::new(code).unwrap()
    }

    fn eurusd_platform(account_ccy: &str) -> MemoryPlatform {
        let platform = MemoryPlatform::new();
        platform.set_account(AccountSnapshot {
            equity: dec!(10000),
            balance: dec!(10000),
            currency: ccy(account_ccy),
        });
        platform.set_instrument(InstrumentSpec {
            symbol: Symbol::new("EURUSD"),
            volume_min: dec!(0.01),
            volume_max: dec!(100),
            volume_step: dec!(0.01),
            tick_size: dec!(0.00001),
            contract_size: dec!(100000),
            profit_currency: ccy("USD"),
        });
        platform.set_tick(
            &Symbol::new("EURUSD"),
            Tick {
                time: Utc::now(),
                bid: dec!(1.10480),
                ask: dec!(1.10500),
            },
        );
        platform
    }

    fn buy_market(stop_loss: Price) -> SignalEvent {
        SignalEvent {
            symbol: Symbol::new("EURUSD"),
            signal: Side::Buy,
            target_order: OrderType::Market,
            target_price: dec!(0),
            magic_number: MagicNumber::new(12345),
            stop_loss,
            take_profit: dec!(0),
        }
    }

    fn sizer(risk_pct: Decimal) -> RiskPctSizer {
        RiskPctSizer::new(risk_pct, CurrencyConverter::default())
    }

    #[test]
    fn one_percent_over_500_ticks_is_point_two_lots() {
        let platform = eurusd_platform("USD");
        let volume = sizer(dec!(0.01)).size(&buy_market(dec!(1.1000)), &platform);
        assert_eq!(volume, Ok(dec!(0.20)));
    }

    #[test]
    fn sell_market_enters_at_bid() {
        let platform = eurusd_platform("USD");
        let mut signal = buy_market(dec!(1.10980));
        signal.signal = Side::Sell;

        // |1.10480 - 1.10980| = 500 ticks.
        assert_eq!(sizer(dec!(0.01)).size(&signal, &platform), Ok(dec!(0.20)));
    }

    #[test]
    fn pending_order_uses_target_price() {
        let platform = eurusd_platform("USD");
        platform.clear_tick(&Symbol::new("EURUSD"));
        let signal = SignalEvent {
            target_order: OrderType::Limit,
            target_price: dec!(1.1100),
            ..buy_market(dec!(1.1000))
        };

        // 1000 ticks → 100 / 1000 = 0.1 lots.
        assert_eq!(sizer(dec!(0.01)).size(&signal, &platform), Ok(dec!(0.10)));
    }

    #[test]
    fn partial_ticks_are_truncated() {
        let platform = eurusd_platform("USD");
        // 0.005004 / 0.00001 = 500.4 → 500 ticks.
        let volume = sizer(dec!(0.01)).size(&buy_market(dec!(1.099996)), &platform);
        assert_eq!(volume, Ok(dec!(0.20)));
    }

    #[test]
    fn tick_value_is_converted_into_account_currency() {
        let platform = eurusd_platform("EUR");
        // USD → EUR: EURUSD base is EUR, so 1.0 USD / 1.25 = 0.8 EUR per tick.
        platform.set_tick(
            &Symbol::new("EURUSD"),
            Tick {
                time: Utc::now(),
                bid: dec!(1.25),
                ask: dec!(1.1050),
            },
        );

        // 100 / (500 × 0.8) = 0.25
        let volume = sizer(dec!(0.01)).size(&buy_market(dec!(1.1000)), &platform);
        assert_eq!(volume, Ok(dec!(0.25)));
    }

    #[test]
    fn non_positive_risk_is_rejected() {
        let platform = eurusd_platform("USD");
        for risk in [dec!(0), dec!(-0.01)] {
            assert_eq!(
                sizer(risk).size(&buy_market(dec!(1.1000)), &platform),
                Err(SizingError::InvalidRiskFraction { risk_pct: risk })
            );
        }
    }

    #[test]
    fn non_positive_stop_loss_is_rejected() {
        let platform = eurusd_platform("USD");
        assert_eq!(
            sizer(dec!(0.01)).size(&buy_market(dec!(0)), &platform),
            Err(SizingError::InvalidStopLoss {
                stop_loss: dec!(0)
            })
        );
    }

    #[test]
    fn stop_inside_one_tick_is_rejected() {
        let platform = eurusd_platform("USD");
        let result = sizer(dec!(0.01)).size(&buy_market(dec!(1.104995)), &platform);
        assert!(matches!(result, Err(SizingError::ZeroTickDistance { .. })));
    }

    #[test]
    fn missing_market_data_is_rejected() {
        let platform = MemoryPlatform::new();
        assert!(matches!(
            sizer(dec!(0.01)).size(&buy_market(dec!(1.1000)), &platform),
            Err(SizingError::TickUnavailable { .. })
        ));

        let platform = eurusd_platform("USD");
        platform.set_instrument(InstrumentSpec {
            tick_size: dec!(0),
            ..platform.instrument(&Symbol::new("EURUSD")).unwrap()
        });
        assert!(matches!(
            sizer(dec!(0.01)).size(&buy_market(dec!(1.1000)), &platform),
            Err(SizingError::InvalidInstrument { .. })
        ));
    }

    #[test]
    fn negative_tick_size_is_rejected() {
        let platform = eurusd_platform("USD");
        platform.set_instrument(InstrumentSpec {
            tick_size: dec!(-0.00003),
            ..platform.instrument(&Symbol::new("EURUSD")).unwrap()
        });
        let signal = SignalEvent {
            target_order: OrderType::Limit,
            target_price: dec!(1.1050),
            ..buy_market(dec!(1.1000))
        };

        assert_eq!(
            sizer(dec!(0.01)).size(&signal, &platform),
            Err(SizingError::InvalidInstrument {
                symbol: Symbol::new("EURUSD"),
                reason: "tick size is not positive",
            })
        );
    }

    #[test]
    fn non_positive_contract_size_is_rejected() {
        let platform = eurusd_platform("USD");
        for contract_size in [dec!(0), dec!(-100000)] {
            platform.set_instrument(InstrumentSpec {
                contract_size,
                ..platform.instrument(&Symbol::new("EURUSD")).unwrap()
            });
            assert_eq!(
                sizer(dec!(0.01)).size(&buy_market(dec!(1.1000)), &platform),
                Err(SizingError::InvalidInstrument {
                    symbol: Symbol::new("EURUSD"),
                    reason: "contract size is not positive",
                })
            );
        }
    }

    #[test]
    fn failed_conversion_is_rejected() {
        let platform = eurusd_platform("SEK");
        assert_eq!(
            sizer(dec!(0.01)).size(&buy_market(dec!(1.1000)), &platform),
            Err(SizingError::Conversion(ConversionError::QuoteUnavailable {
                symbol: Symbol::new("USDSEK"),
            }))
        );
    }
}
