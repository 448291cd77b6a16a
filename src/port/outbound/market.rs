//! Market and account data ports.
//!
//! Adapters for a concrete trading terminal implement these traits. Every
//! accessor returns `Option`/empty on missing data; callers decide whether
//! absence is a rejection.

use crate::domain::{AccountSnapshot, Bar, InstrumentSpec, Symbol, Tick, Timeframe};

/// Read access to live quotes and closed bars.
pub trait MarketData: Send + Sync {
    /// Most recent bid/ask quote for `symbol`.
    fn latest_tick(&self, symbol: &Symbol) -> Option<Tick>;

    /// Up to `count` most recent closed bars, oldest first.
    ///
    /// The bar currently forming is never included.
    fn latest_closed_bars(&self, symbol: &Symbol, timeframe: Timeframe, count: usize) -> Vec<Bar>;

    /// Most recent closed bar.
    fn latest_closed_bar(&self, symbol: &Symbol, timeframe: Timeframe) -> Option<Bar> {
        self.latest_closed_bars(symbol, timeframe, 1).pop()
    }

    /// Pull fresh state from the platform, if the adapter caches it.
    ///
    /// Called once per poll cycle before new bars are checked.
    fn refresh(&self) {}
}

/// Read access to account state and instrument specifications.
pub trait AccountData: Send + Sync {
    /// Current account equity and currency.
    fn account(&self) -> Option<AccountSnapshot>;

    /// Broker-declared specification for `symbol`.
    fn instrument(&self, symbol: &Symbol) -> Option<InstrumentSpec>;
}

/// A full platform connection: market data plus account data.
pub trait Platform: MarketData + AccountData {}

impl<T: MarketData + AccountData + ?Sized> Platform for T {}
