//! File-backed platform bridge.
//!
//! An external terminal bridge writes the platform state (account,
//! instrument specs, latest ticks, closed bars) to a JSON file. This adapter
//! reloads the file whenever its modification time changes. A file that
//! fails to read or parse is logged and the previous state is kept.
//!
//! ```json
//! {
//!   "account": { "equity": "10000", "balance": "10000", "currency": "USD" },
//!   "instruments": [{ "symbol": "EURUSD", "volume_min": "0.01", ... }],
//!   "ticks": { "EURUSD": { "time": "2024-03-01T09:00:00Z", "bid": "1.1", "ask": "1.1001" } },
//!   "bars": [{ "symbol": "EURUSD", "timeframe": "1min", "bars": [ ... ] }]
//! }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::memory::MemoryPlatform;
use crate::domain::{AccountSnapshot, Bar, InstrumentSpec, Symbol, Tick, Timeframe};
use crate::error::Result;
use crate::port::{AccountData, MarketData};

/// Serialized platform state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformSnapshot {
    pub account: Option<AccountSnapshot>,
    pub instruments: Vec<InstrumentSpec>,
    pub ticks: HashMap<Symbol, Tick>,
    pub bars: Vec<BarSeries>,
}

/// Closed bars for one symbol and timeframe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarSeries {
    pub symbol: Symbol,
    pub timeframe: Timeframe,
    pub bars: Vec<Bar>,
}

impl PlatformSnapshot {
    /// Read and parse a snapshot file.
    pub fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Platform backed by a snapshot file.
pub struct SnapshotPlatform {
    path: PathBuf,
    store: MemoryPlatform,
    loaded_at: Mutex<Option<SystemTime>>,
}

impl SnapshotPlatform {
    /// Open `path` and load it once. Fails if the initial load fails.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let modified = fs::metadata(&path)?.modified().ok();
        let snapshot = PlatformSnapshot::read(&path)?;

        let store = MemoryPlatform::new();
        info!(
            path = %path.display(),
            instruments = snapshot.instruments.len(),
            series = snapshot.bars.len(),
            "Platform snapshot loaded"
        );
        store.load(snapshot);

        Ok(Self {
            path,
            store,
            loaded_at: Mutex::new(modified),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn reload_if_changed(&self) {
        let modified = match fs::metadata(&self.path).and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Cannot stat platform snapshot");
                return;
            }
        };

        let mut loaded_at = self.loaded_at.lock();
        if *loaded_at == Some(modified) {
            return;
        }

        match PlatformSnapshot::read(&self.path) {
            Ok(snapshot) => {
                debug!(path = %self.path.display(), "Platform snapshot reloaded");
                self.store.load(snapshot);
                *loaded_at = Some(modified);
            }
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to reload platform snapshot; keeping previous state"
                );
            }
        }
    }
}

impl MarketData for SnapshotPlatform {
    fn latest_tick(&self, symbol: &Symbol) -> Option<Tick> {
        self.store.latest_tick(symbol)
    }

    fn latest_closed_bars(&self, symbol: &Symbol, timeframe: Timeframe, count: usize) -> Vec<Bar> {
        self.store.latest_closed_bars(symbol, timeframe, count)
    }

    fn refresh(&self) {
        self.reload_if_changed();
    }
}

impl AccountData for SnapshotPlatform {
    fn account(&self) -> Option<AccountSnapshot> {
        self.store.account()
    }

    fn instrument(&self, symbol: &Symbol) -> Option<InstrumentSpec> {
        self.store.instrument(symbol)
    }
}
