//! The pipeline's event queue.
//!
//! An unbounded multi-producer, single-consumer FIFO. Producers (the poller
//! and the stage handlers) hold cloned [`EventSender`]s; the engine owns the
//! only [`EventReceiver`] and polls it without blocking.
//!
//! Besides events, producers may enqueue a sentinel. The engine treats a
//! sentinel as "producer shut down" and stops. A channel whose producers have
//! all been dropped reads as a sentinel too.

use tokio::sync::mpsc::{self, error::TryRecvError};

use crate::domain::Event;
use crate::error::QueueError;

/// Create a connected sender/receiver pair.
#[must_use]
pub fn event_channel() -> (EventSender, EventReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventSender { tx }, EventReceiver { rx })
}

/// Result of a non-blocking dequeue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dequeued {
    /// The next event in enqueue order.
    Event(Event),
    /// A producer signalled shutdown, or every producer is gone.
    Sentinel,
    /// Nothing queued right now.
    Empty,
}

/// Producer handle. Cheap to clone.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<Option<Event>>,
}

impl EventSender {
    /// Append an event to the queue.
    pub fn send(&self, event: impl Into<Event>) -> Result<(), QueueError> {
        self.tx
            .send(Some(event.into()))
            .map_err(|_| QueueError::Closed)
    }

    /// Append the shutdown sentinel.
    pub fn send_sentinel(&self) -> Result<(), QueueError> {
        self.tx.send(None).map_err(|_| QueueError::Closed)
    }

    /// True once the receiver has been dropped.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Consumer handle, owned by the engine.
#[derive(Debug)]
pub struct EventReceiver {
    rx: mpsc::UnboundedReceiver<Option<Event>>,
}

impl EventReceiver {
    /// Take the next queued item without waiting.
    pub fn try_dequeue(&mut self) -> Dequeued {
        match self.rx.try_recv() {
            Ok(Some(event)) => Dequeued::Event(event),
            Ok(None) | Err(TryRecvError::Disconnected) => Dequeued::Sentinel,
            Err(TryRecvError::Empty) => Dequeued::Empty,
        }
    }
}
