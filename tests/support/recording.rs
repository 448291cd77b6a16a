//! Recording handlers and pollers for engine tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use barflow::domain::Event;
use barflow::error::Result;
use barflow::port::{DataPoller, EventHandler};
use parking_lot::Mutex;

/// Shared log of `"KIND:SYMBOL"` entries, in handling order.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    entries: Arc<Mutex<Vec<String>>>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, event: &Event) {
        self.entries
            .lock()
            .push(format!("{}:{}", event.kind(), event.symbol()));
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().clone()
    }

    /// Handler that records every event and succeeds.
    pub fn handler(&self) -> impl EventHandler + 'static {
        let journal = self.clone();
        move |event: Event| -> Result<()> {
            journal.record(&event);
            Ok(())
        }
    }
}

/// Poller that does nothing but count calls.
#[derive(Debug, Clone, Default)]
pub struct CountingPoller {
    calls: Arc<AtomicUsize>,
}

impl CountingPoller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DataPoller for CountingPoller {
    fn check_for_new_data(&mut self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}
