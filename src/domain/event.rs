//! Typed events flowing through the pipeline.
//!
//! Every stage communicates by enqueuing one of these values. Events are
//! immutable once built and are moved into the queue, so a producer never
//! shares state with the consumer.
//!
//! The flow is DATA → SIGNAL → SIZING → ORDER → EXECUTION / PENDING.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::{MagicNumber, Symbol};
use super::market::Bar;
use super::money::{Price, Volume};

/// Discriminant used to route an event to its handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    Data,
    Signal,
    Sizing,
    Order,
    Execution,
    Pending,
}

impl EventKind {
    /// All kinds, in pipeline order.
    pub const ALL: [EventKind; 6] = [
        EventKind::Data,
        EventKind::Signal,
        EventKind::Sizing,
        EventKind::Order,
        EventKind::Execution,
        EventKind::Pending,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            EventKind::Data => "DATA",
            EventKind::Signal => "SIGNAL",
            EventKind::Sizing => "SIZING",
            EventKind::Order => "ORDER",
            EventKind::Execution => "EXECUTION",
            EventKind::Pending => "PENDING",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trade direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Side {
    Buy,
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => f.write_str("BUY"),
            Side::Sell => f.write_str("SELL"),
        }
    }
}

/// How an order should be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// Fill immediately at the current quote.
    Market,
    Limit,
    Stop,
}

impl OrderType {
    /// True for orders resting at `target_price` rather than filling now.
    #[must_use]
    pub const fn is_pending(self) -> bool {
        !matches!(self, OrderType::Market)
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderType::Market => f.write_str("MARKET"),
            OrderType::Limit => f.write_str("LIMIT"),
            OrderType::Stop => f.write_str("STOP"),
        }
    }
}

/// A new closed bar for a symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataEvent {
    pub symbol: Symbol,
    pub bar: Bar,
}

/// A trading intent produced by a signal generator.
///
/// `target_price` is only meaningful for pending orders. A `stop_loss` or
/// `take_profit` of zero means "none".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalEvent {
    pub symbol: Symbol,
    pub signal: Side,
    pub target_order: OrderType,
    pub target_price: Price,
    pub magic_number: MagicNumber,
    pub stop_loss: Price,
    pub take_profit: Price,
}

/// A signal with a position size attached.
///
/// Fields are private so the non-negative volume invariant holds for every
/// instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizingEvent {
    symbol: Symbol,
    signal: Side,
    target_order: OrderType,
    target_price: Price,
    magic_number: MagicNumber,
    stop_loss: Price,
    take_profit: Price,
    volume: Volume,
}

impl SizingEvent {
    /// Copy every field of `signal` and attach `volume`.
    pub fn new(signal: &SignalEvent, volume: Volume) -> Result<Self, DomainError> {
        if volume < Volume::ZERO {
            return Err(DomainError::NegativeVolume { volume });
        }
        Ok(Self {
            symbol: signal.symbol.clone(),
            signal: signal.signal,
            target_order: signal.target_order,
            target_price: signal.target_price,
            magic_number: signal.magic_number,
            stop_loss: signal.stop_loss,
            take_profit: signal.take_profit,
            volume,
        })
    }

    #[must_use]
    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    #[must_use]
    pub const fn signal(&self) -> Side {
        self.signal
    }

    #[must_use]
    pub const fn target_order(&self) -> OrderType {
        self.target_order
    }

    #[must_use]
    pub const fn target_price(&self) -> Price {
        self.target_price
    }

    #[must_use]
    pub const fn magic_number(&self) -> MagicNumber {
        self.magic_number
    }

    #[must_use]
    pub const fn stop_loss(&self) -> Price {
        self.stop_loss
    }

    #[must_use]
    pub const fn take_profit(&self) -> Price {
        self.take_profit
    }

    #[must_use]
    pub const fn volume(&self) -> Volume {
        self.volume
    }
}

/// A sized intent that passed risk assessment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderEvent {
    pub symbol: Symbol,
    pub signal: Side,
    pub target_order: OrderType,
    pub target_price: Price,
    pub magic_number: MagicNumber,
    pub stop_loss: Price,
    pub take_profit: Price,
    pub volume: Volume,
}

impl OrderEvent {
    #[must_use]
    pub fn from_sizing(sizing: &SizingEvent) -> Self {
        Self {
            symbol: sizing.symbol.clone(),
            signal: sizing.signal,
            target_order: sizing.target_order,
            target_price: sizing.target_price,
            magic_number: sizing.magic_number,
            stop_loss: sizing.stop_loss,
            take_profit: sizing.take_profit,
            volume: sizing.volume,
        }
    }
}

/// A market order was filled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionEvent {
    pub symbol: Symbol,
    pub signal: Side,
    pub fill_price: Price,
    pub fill_time: DateTime<Utc>,
    pub volume: Volume,
}

/// A pending order was placed on the book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingOrderEvent {
    pub symbol: Symbol,
    pub signal: Side,
    pub target_order: OrderType,
    pub target_price: Price,
    pub magic_number: MagicNumber,
    pub stop_loss: Price,
    pub take_profit: Price,
    pub volume: Volume,
}

/// Tagged union over every event kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Data(DataEvent),
    Signal(SignalEvent),
    Sizing(SizingEvent),
    Order(OrderEvent),
    Execution(ExecutionEvent),
    Pending(PendingOrderEvent),
}

impl Event {
    /// Dispatch tag for this event.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Event::Data(_) => EventKind::Data,
            Event::Signal(_) => EventKind::Signal,
            Event::Sizing(_) => EventKind::Sizing,
            Event::Order(_) => EventKind::Order,
            Event::Execution(_) => EventKind::Execution,
            Event::Pending(_) => EventKind::Pending,
        }
    }

    /// Instrument the event refers to.
    #[must_use]
    pub fn symbol(&self) -> &Symbol {
        match self {
            Event::Data(e) => &e.symbol,
            Event::Signal(e) => &e.symbol,
            Event::Sizing(e) => e.symbol(),
            Event::Order(e) => &e.symbol,
            Event::Execution(e) => &e.symbol,
            Event::Pending(e) => &e.symbol,
        }
    }
}

impl From<DataEvent> for Event {
    fn from(e: DataEvent) -> Self {
        Event::Data(e)
    }
}

impl From<SignalEvent> for Event {
    fn from(e: SignalEvent) -> Self {
        Event::Signal(e)
    }
}

impl From<SizingEvent> for Event {
    fn from(e: SizingEvent) -> Self {
        Event::Sizing(e)
    }
}

impl From<OrderEvent> for Event {
    fn from(e: OrderEvent) -> Self {
        Event::Order(e)
    }
}

impl From<ExecutionEvent> for Event {
    fn from(e: ExecutionEvent) -> Self {
        Event::Execution(e)
    }
}

impl From<PendingOrderEvent> for Event {
    fn from(e: PendingOrderEvent) -> Self {
        Event::Pending(e)
    }
}
