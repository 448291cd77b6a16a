//! In-memory platform.
//!
//! Holds quotes, closed bars, instrument specs and account state behind
//! `RwLock`s. Tests populate it directly; [`SnapshotPlatform`] uses it as
//! its backing store.
//!
//! [`SnapshotPlatform`]: super::snapshot::SnapshotPlatform

use std::collections::HashMap;

use parking_lot::RwLock;

use super::snapshot::PlatformSnapshot;
use crate::domain::{AccountSnapshot, Bar, InstrumentSpec, Symbol, Tick, Timeframe};
use crate::port::{AccountData, MarketData};

/// Platform state held in process memory.
#[derive(Default)]
pub struct MemoryPlatform {
    ticks: RwLock<HashMap<Symbol, Tick>>,
    bars: RwLock<HashMap<(Symbol, Timeframe), Vec<Bar>>>,
    instruments: RwLock<HashMap<Symbol, InstrumentSpec>>,
    account: RwLock<Option<AccountSnapshot>>,
}

impl MemoryPlatform {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_tick(&self, symbol: &Symbol, tick: Tick) {
        self.ticks.write().insert(symbol.clone(), tick);
    }

    /// Record a closed bar. A bar with the same open time replaces the old one.
    pub fn push_bar(&self, symbol: &Symbol, timeframe: Timeframe, bar: Bar) {
        let mut bars = self.bars.write();
        let series = bars.entry((symbol.clone(), timeframe)).or_default();
        match series.binary_search_by(|b| b.time.cmp(&bar.time)) {
            Ok(i) => series[i] = bar,
            Err(i) => series.insert(i, bar),
        }
    }

    pub fn set_instrument(&self, spec: InstrumentSpec) {
        self.instruments.write().insert(spec.symbol.clone(), spec);
    }

    pub fn set_account(&self, account: AccountSnapshot) {
        *self.account.write() = Some(account);
    }

    pub fn clear_tick(&self, symbol: &Symbol) {
        self.ticks.write().remove(symbol);
    }

    /// Replace all state with the contents of `snapshot`.
    pub fn load(&self, snapshot: PlatformSnapshot) {
        let PlatformSnapshot {
            account,
            instruments,
            ticks,
            bars,
        } = snapshot;

        *self.account.write() = account;
        *self.instruments.write() = instruments
            .into_iter()
            .map(|spec| (spec.symbol.clone(), spec))
            .collect();
        *self.ticks.write() = ticks;

        let mut series_map = HashMap::new();
        for series in bars {
            let mut sorted = series.bars;
            sorted.sort_by(|a, b| a.time.cmp(&b.time));
            sorted.dedup_by(|a, b| a.time == b.time);
            series_map.insert((series.symbol, series.timeframe), sorted);
        }
        *self.bars.write() = series_map;
    }
}

impl MarketData for MemoryPlatform {
    fn latest_tick(&self, symbol: &Symbol) -> Option<Tick> {
        self.ticks.read().get(symbol).copied()
    }

    fn latest_closed_bars(&self, symbol: &Symbol, timeframe: Timeframe, count: usize) -> Vec<Bar> {
        let bars = self.bars.read();
        let Some(series) = bars.get(&(symbol.clone(), timeframe)) else {
            return Vec::new();
        };
        let start = series.len().saturating_sub(count);
        series[start..].to_vec()
    }
}

impl AccountData for MemoryPlatform {
    fn account(&self) -> Option<AccountSnapshot> {
        *self.account.read()
    }

    fn instrument(&self, symbol: &Symbol) -> Option<InstrumentSpec> {
        self.instruments.read().get(symbol).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::snapshot::BarSeries;
    use crate::domain::Currency;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn bar(minute: u32, close: Decimal) -> Bar {
        Bar {
            time: Utc.with_ymd_and_hms(2024, 3, 1, 9, minute, 0).unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            tick_volume: 0,
            real_volume: 0,
            spread: 0,
        }
    }

    #[test]
    fn bars_are_kept_in_time_order() {
        let platform = MemoryPlatform::new();
        let symbol = Symbol::new("EURUSD");
        platform.push_bar(&symbol, Timeframe::M1, bar(2, dec!(3)));
        platform.push_bar(&symbol, Timeframe::M1, bar(0, dec!(1)));
        platform.push_bar(&symbol, Timeframe::M1, bar(1, dec!(2)));

        let closes: Vec<_> = platform
            .latest_closed_bars(&symbol, Timeframe::M1, 10)
            .iter()
            .map(|b| b.close)
            .collect();
        assert_eq!(closes, vec![dec!(1), dec!(2), dec!(3)]);
    }

    #[test]
    fn latest_closed_bars_returns_the_tail() {
        let platform = MemoryPlatform::new();
        let symbol = Symbol::new("EURUSD");
        for minute in 0..5 {
            platform.push_bar(&symbol, Timeframe::M1, bar(minute, Decimal::from(minute)));
        }

        let tail = platform.latest_closed_bars(&symbol, Timeframe::M1, 2);
        assert_eq!(tail.len(), 2);
        assert_eq!(tail[1].close, dec!(4));
        assert_eq!(
            platform.latest_closed_bar(&symbol, Timeframe::M1).map(|b| b.close),
            Some(dec!(4))
        );
    }

    #[test]
    fn same_time_bar_replaces_previous() {
        let platform = MemoryPlatform::new();
        let symbol = Symbol::new("EURUSD");
        platform.push_bar(&symbol, Timeframe::M1, bar(0, dec!(1)));
        platform.push_bar(&symbol, Timeframe::M1, bar(0, dec!(9)));

        let bars = platform.latest_closed_bars(&symbol, Timeframe::M1, 10);
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].close, dec!(9));
    }

    #[test]
    fn load_replaces_previous_state() {
        let platform = MemoryPlatform::new();
        let symbol = Symbol::new("EURUSD");
        platform.push_bar(&symbol, Timeframe::M1, bar(0, dec!(1)));

        platform.load(PlatformSnapshot {
            account: Some(AccountSnapshot {
                equity: dec!(10000),
                balance: dec!(10000),
                currency: Currency::new("USD").unwrap(),
            }),
            instruments: Vec::new(),
            ticks: HashMap::new(),
            bars: vec![BarSeries {
                symbol: symbol.clone(),
                timeframe: Timeframe::M5,
                bars: vec![bar(5, dec!(2)), bar(0, dec!(1))],
            }],
        });

        assert!(platform.latest_closed_bar(&symbol, Timeframe::M1).is_none());
        let m5 = platform.latest_closed_bars(&symbol, Timeframe::M5, 10);
        assert_eq!(m5.len(), 2);
        assert_eq!(m5[1].close, dec!(2));
        assert_eq!(platform.account().map(|a| a.equity), Some(dec!(10000)));
    }
}
