//! Market fixtures: bars, quotes, instruments and a primed in-memory platform.

use std::sync::Arc;

use barflow::adapter::outbound::memory::MemoryPlatform;
use barflow::domain::{
    AccountSnapshot, Bar, Currency, DataEvent, InstrumentSpec, MagicNumber, OrderType, Price,
    SignalEvent, Side, Symbol, Tick, Timeframe,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub fn ccy(code: &str) -> Currency {
    Currency::new(code).expect("valid currency code")
}

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
}

/// Flat bar opening `minute` minutes after [`t0`].
pub fn bar(minute: i64, close: Price) -> Bar {
    Bar {
        time: t0() + Duration::minutes(minute),
        open: close,
        high: close,
        low: close,
        close,
        tick_volume: 100,
        real_volume: 0,
        spread: 2,
    }
}

pub fn data_event(symbol: &str) -> DataEvent {
    DataEvent {
        symbol: Symbol::new(symbol),
        bar: bar(0, dec!(1.1)),
    }
}

pub fn market_signal(symbol: &str, side: Side, stop_loss: Price) -> SignalEvent {
    SignalEvent {
        symbol: Symbol::new(symbol),
        signal: side,
        target_order: OrderType::Market,
        target_price: Decimal::ZERO,
        magic_number: MagicNumber::new(12345),
        stop_loss,
        take_profit: Decimal::ZERO,
    }
}

pub fn eurusd_spec(volume_min: Decimal) -> InstrumentSpec {
    InstrumentSpec {
        symbol: Symbol::new("EURUSD"),
        volume_min,
        volume_max: dec!(100),
        volume_step: dec!(0.01),
        tick_size: dec!(0.00001),
        contract_size: dec!(100000),
        profit_currency: ccy("USD"),
    }
}

pub fn account(equity: Decimal, currency: &str) -> AccountSnapshot {
    AccountSnapshot {
        equity,
        balance: equity,
        currency: ccy(currency),
    }
}

pub fn tick(bid: Price, ask: Price) -> Tick {
    Tick {
        time: t0(),
        bid,
        ask,
    }
}

/// A USD account of 10 000 trading EURUSD at 1.10480 / 1.10500.
pub fn eurusd_platform(volume_min: Decimal) -> Arc<MemoryPlatform> {
    let platform = Arc::new(MemoryPlatform::new());
    platform.set_account(account(dec!(10000), "USD"));
    platform.set_instrument(eurusd_spec(volume_min));
    platform.set_tick(&Symbol::new("EURUSD"), tick(dec!(1.10480), dec!(1.10500)));
    platform
}

/// Push closed M1 bars with the given closes, one minute apart.
pub fn push_closes(platform: &MemoryPlatform, symbol: &str, closes: &[Price]) {
    let symbol = Symbol::new(symbol);
    for (i, close) in closes.iter().enumerate() {
        platform.push_bar(&symbol, Timeframe::M1, bar(i as i64, *close));
    }
}
