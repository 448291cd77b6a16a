//! Event handler port.
//!
//! The engine owns one handler per event kind and calls it synchronously with
//! each dequeued event. A handler may enqueue follow-up events through its own
//! [`EventSender`](crate::application::queue::EventSender).

use crate::domain::Event;
use crate::error::Result;

/// Handles one kind of pipeline event.
pub trait EventHandler: Send {
    /// Process `event`.
    ///
    /// Returning `Err` reports a handler failure; the engine's failure policy
    /// decides whether the loop continues.
    fn handle(&mut self, event: Event) -> Result<()>;
}

impl<F> EventHandler for F
where
    F: FnMut(Event) -> Result<()> + Send,
{
    fn handle(&mut self, event: Event) -> Result<()> {
        self(event)
    }
}
