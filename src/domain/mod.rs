//! Platform-agnostic domain types.

pub mod error;
pub mod event;
pub mod fx;
mod id;
mod market;
mod money;

// Core domain types
pub use id::{MagicNumber, Symbol};
pub use market::{AccountSnapshot, Bar, InstrumentSpec, Tick, Timeframe};
pub use money::{Amount, Currency, Price, Volume};

// Events
pub use event::{
    DataEvent, Event, EventKind, ExecutionEvent, OrderEvent, OrderType, PendingOrderEvent, Side,
    SignalEvent, SizingEvent,
};

// FX
pub use fx::{FxPair, FxPairs};
