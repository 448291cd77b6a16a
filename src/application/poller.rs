//! New-bar detection.
//!
//! [`BarPoller`] owns the last-seen-bar registry: for each tracked symbol, the
//! open time of the newest bar already published. A bar is new iff its time
//! is strictly later than the registry entry. The entry only advances after
//! the DATA event was accepted by the queue, so a failed enqueue is retried
//! on the next poll.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, trace, warn};

use crate::application::queue::EventSender;
use crate::domain::{DataEvent, Symbol, Timeframe};
use crate::port::{DataPoller, MarketData};

/// Polls the platform for new closed bars and publishes DATA events.
pub struct BarPoller {
    market: Arc<dyn MarketData>,
    events: EventSender,
    symbols: Vec<Symbol>,
    timeframe: Timeframe,
    last_seen: HashMap<Symbol, DateTime<Utc>>,
}

impl BarPoller {
    /// Track `symbols` on `timeframe`. Every symbol starts at the minimum
    /// timestamp, so the first closed bar seen for it is always new.
    pub fn new(
        market: Arc<dyn MarketData>,
        events: EventSender,
        symbols: Vec<Symbol>,
        timeframe: Timeframe,
    ) -> Self {
        let last_seen = symbols
            .iter()
            .map(|s| (s.clone(), DateTime::<Utc>::MIN_UTC))
            .collect();
        Self {
            market,
            events,
            symbols,
            timeframe,
            last_seen,
        }
    }

    /// Time of the newest bar published for `symbol`.
    #[must_use]
    pub fn last_seen(&self, symbol: &Symbol) -> Option<DateTime<Utc>> {
        self.last_seen.get(symbol).copied()
    }

    #[must_use]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    #[must_use]
    pub const fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    fn poll_symbol(&mut self, symbol: &Symbol) {
        let Some(bar) = self.market.latest_closed_bar(symbol, self.timeframe) else {
            debug!(symbol = %symbol, timeframe = %self.timeframe, "No closed bar available");
            return;
        };

        let last = self
            .last_seen
            .get(symbol)
            .copied()
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        if bar.time <= last {
            trace!(symbol = %symbol, bar_time = %bar.time, "No new bar");
            return;
        }

        let bar_time = bar.time;
        let event = DataEvent {
            symbol: symbol.clone(),
            bar,
        };
        match self.events.send(event) {
            Ok(()) => {
                debug!(symbol = %symbol, bar_time = %bar_time, "New bar published");
                self.last_seen.insert(symbol.clone(), bar_time);
            }
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "Failed to enqueue DATA event");
            }
        }
    }
}

impl DataPoller for BarPoller {
    fn check_for_new_data(&mut self) {
        self.market.refresh();
        // Clone the list so the registry can be updated while iterating.
        let symbols = self.symbols.clone();
        for symbol in &symbols {
            self.poll_symbol(symbol);
        }
    }
}
