//! Simple moving-average crossover.
//!
//! On every new bar the fast and slow SMAs of closes are compared for the
//! latest window and the window one bar earlier. A fast average moving from
//! at-or-below the slow one to above it is a BUY; the reverse is a SELL.
//! Signals are market orders with stops placed a fixed number of ticks from
//! the entry quote.

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, warn};

use super::SignalGenerator;
use crate::domain::{
    Bar, DataEvent, MagicNumber, OrderType, Price, SignalEvent, Side, Timeframe,
};
use crate::port::Platform;

fn default_fast_period() -> usize {
    5
}

fn default_slow_period() -> usize {
    10
}

fn default_magic_number() -> MagicNumber {
    MagicNumber::new(12345)
}

/// `[signal]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct MaCrossoverConfig {
    #[serde(default = "default_fast_period")]
    pub fast_period: usize,
    #[serde(default = "default_slow_period")]
    pub slow_period: usize,
    #[serde(default = "default_magic_number")]
    pub magic_number: MagicNumber,
    /// Stop-loss distance in ticks. Zero places no stop.
    #[serde(default)]
    pub stop_loss_points: u32,
    /// Take-profit distance in ticks. Zero places no target.
    #[serde(default)]
    pub take_profit_points: u32,
}

impl Default for MaCrossoverConfig {
    fn default() -> Self {
        Self {
            fast_period: default_fast_period(),
            slow_period: default_slow_period(),
            magic_number: default_magic_number(),
            stop_loss_points: 0,
            take_profit_points: 0,
        }
    }
}

/// Moving-average crossover generator for one timeframe.
#[derive(Debug, Clone)]
pub struct MaCrossover {
    config: MaCrossoverConfig,
    timeframe: Timeframe,
}

impl MaCrossover {
    #[must_use]
    pub fn new(config: MaCrossoverConfig, timeframe: Timeframe) -> Self {
        Self { config, timeframe }
    }

    #[must_use]
    pub const fn config(&self) -> &MaCrossoverConfig {
        &self.config
    }

    /// Direction of a crossover on the last bar of `bars`, if one happened.
    ///
    /// Needs `slow_period + 1` bars; fewer yields `None`.
    #[must_use]
    pub fn crossover(&self, bars: &[Bar]) -> Option<Side> {
        let slow = self.config.slow_period;
        let fast = self.config.fast_period;
        if fast == 0 || slow == 0 || bars.len() < slow + 1 {
            return None;
        }

        let closes: Vec<Price> = bars[bars.len() - (slow + 1)..]
            .iter()
            .map(|b| b.close)
            .collect();
        let previous = &closes[..slow];
        let current = &closes[1..];

        let prev_fast = sma(&previous[slow - fast.min(slow)..])?;
        let prev_slow = sma(previous)?;
        let cur_fast = sma(&current[slow - fast.min(slow)..])?;
        let cur_slow = sma(current)?;

        if prev_fast <= prev_slow && cur_fast > cur_slow {
            Some(Side::Buy)
        } else if prev_fast >= prev_slow && cur_fast < cur_slow {
            Some(Side::Sell)
        } else {
            None
        }
    }

    fn offset(points: u32, tick_size: Price) -> Option<Price> {
        Decimal::from(points).checked_mul(tick_size)
    }
}

fn sma(values: &[Price]) -> Option<Price> {
    if values.is_empty() {
        return None;
    }
    let sum = values
        .iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(*v))?;
    sum.checked_div(Decimal::from(values.len()))
}

impl SignalGenerator for MaCrossover {
    fn name(&self) -> &'static str {
        "ma_crossover"
    }

    fn generate(&mut self, data: &DataEvent, platform: &dyn Platform) -> Option<SignalEvent> {
        let bars = platform.latest_closed_bars(
            &data.symbol,
            self.timeframe,
            self.config.slow_period + 1,
        );
        let side = self.crossover(&bars)?;

        let Some(tick) = platform.latest_tick(&data.symbol) else {
            warn!(symbol = %data.symbol, "Crossover detected but no tick available");
            return None;
        };
        let Some(spec) = platform.instrument(&data.symbol) else {
            warn!(symbol = %data.symbol, "Crossover detected but instrument unknown");
            return None;
        };

        let sl_offset = Self::offset(self.config.stop_loss_points, spec.tick_size)?;
        let tp_offset = Self::offset(self.config.take_profit_points, spec.tick_size)?;
        let (entry, stop_loss, take_profit) = match side {
            Side::Buy => (tick.ask, tick.ask - sl_offset, tick.ask + tp_offset),
            Side::Sell => (tick.bid, tick.bid + sl_offset, tick.bid - tp_offset),
        };

        debug!(symbol = %data.symbol, side = %side, entry = %entry, "MA crossover");

        Some(SignalEvent {
            symbol: data.symbol.clone(),
            signal: side,
            target_order: OrderType::Market,
            target_price: Price::ZERO,
            magic_number: self.config.magic_number,
            stop_loss: if sl_offset.is_zero() { Price::ZERO } else { stop_loss },
            take_profit: if tp_offset.is_zero() { Price::ZERO } else { take_profit },
        })
    }
}
