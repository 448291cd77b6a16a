//! The event-driven trading engine.
//!
//! A single-threaded cooperative scheduler. Each iteration takes the next
//! queued event without blocking and hands it to the handler registered for
//! its kind. When the queue is empty the engine asks the data poller for new
//! bars and idles for the poll interval before looking again.
//!
//! Events are processed strictly in enqueue order and each handler runs to
//! completion before the next dequeue. Handlers may enqueue follow-up events;
//! those are processed in later iterations.
//!
//! The loop ends when:
//! - the shutdown watch flips to `true` (or its sender is dropped),
//! - a sentinel is dequeued,
//! - an event arrives whose kind has no registered handler, or
//! - a handler fails under [`HandlerFailurePolicy::Halt`].

mod dispatch;

pub use dispatch::{HandlerTable, HandlerTableBuilder, Resolved};

use std::time::Duration;

use serde::Deserialize;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::application::queue::{Dequeued, EventReceiver};
use crate::domain::{Event, EventKind};
use crate::error::Result;
use crate::port::DataPoller;

/// What to do when a handler returns an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandlerFailurePolicy {
    /// Log the failure and keep processing. One bad signal should not stop
    /// market-data polling for every other instrument.
    #[default]
    Isolate,
    /// Log the failure, stop the loop, and return the error from `run`.
    Halt,
}

/// Engine tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    /// Idle delay after polling an empty queue.
    pub poll_interval: Duration,
    pub failure_policy: HandlerFailurePolicy,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(10),
            failure_policy: HandlerFailurePolicy::default(),
        }
    }
}

/// Why the engine stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// External shutdown signal.
    Shutdown,
    /// A sentinel was dequeued or every producer is gone.
    Sentinel,
    /// No handler registered for this kind.
    UnhandledKind(EventKind),
    /// The handler for this kind failed under the halt policy.
    HandlerFailed(EventKind),
}

/// Counters for one engine run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineStats {
    /// Events handed to a registered handler.
    pub dispatched: u64,
    /// Calls to the data poller.
    pub polls: u64,
    /// Handler calls that returned an error.
    pub handler_failures: u64,
}

/// Drives the pipeline until a terminal condition.
pub struct TradingEngine {
    events: EventReceiver,
    poller: Box<dyn DataPoller>,
    handlers: HandlerTable,
    settings: EngineSettings,
    continue_trading: bool,
    stop_reason: Option<StopReason>,
    stats: EngineStats,
}

impl TradingEngine {
    #[must_use]
    pub fn new(
        events: EventReceiver,
        poller: Box<dyn DataPoller>,
        handlers: HandlerTable,
        settings: EngineSettings,
    ) -> Self {
        Self {
            events,
            poller,
            handlers,
            settings,
            continue_trading: true,
            stop_reason: None,
            stats: EngineStats::default(),
        }
    }

    /// Run until a sentinel or unhandled event stops the loop.
    pub async fn run(&mut self) -> Result<StopReason> {
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        self.run_with_shutdown(shutdown_rx).await
    }

    /// Run with an externally controlled shutdown signal.
    ///
    /// The signal is checked at the top of every iteration and also wakes the
    /// idle delay, so shutdown never waits out a full poll interval.
    pub async fn run_with_shutdown(
        &mut self,
        mut shutdown: watch::Receiver<bool>,
    ) -> Result<StopReason> {
        info!(
            handlers = ?self.handlers.registered(),
            poll_interval_ms = self.settings.poll_interval.as_millis() as u64,
            policy = ?self.settings.failure_policy,
            "Engine started"
        );

        let mut failure = None;
        while self.continue_trading {
            if *shutdown.borrow() {
                info!("Shutdown signal received");
                self.stop(StopReason::Shutdown);
                break;
            }

            match self.events.try_dequeue() {
                Dequeued::Event(event) => {
                    if let Err(e) = self.dispatch(event) {
                        failure = Some(e);
                    }
                }
                Dequeued::Sentinel => self.handle_none_event(),
                Dequeued::Empty => {
                    self.poller.check_for_new_data();
                    self.stats.polls += 1;
                    if !self.idle(&mut shutdown).await {
                        info!("Shutdown channel closed");
                        self.stop(StopReason::Shutdown);
                    }
                }
            }
        }

        let reason = self.stop_reason.unwrap_or(StopReason::Shutdown);
        info!(
            reason = ?reason,
            dispatched = self.stats.dispatched,
            polls = self.stats.polls,
            handler_failures = self.stats.handler_failures,
            "Engine stopped"
        );
        match failure {
            Some(e) => Err(e),
            None => Ok(reason),
        }
    }

    /// True until a terminal condition has been observed.
    #[must_use]
    pub const fn continue_trading(&self) -> bool {
        self.continue_trading
    }

    #[must_use]
    pub const fn stats(&self) -> EngineStats {
        self.stats
    }

    #[must_use]
    pub const fn stop_reason(&self) -> Option<StopReason> {
        self.stop_reason
    }

    /// Sleep for the poll interval. Returns `false` if the shutdown channel
    /// closed while waiting.
    async fn idle(&self, shutdown: &mut watch::Receiver<bool>) -> bool {
        tokio::select! {
            () = tokio::time::sleep(self.settings.poll_interval) => true,
            changed = shutdown.changed() => changed.is_ok(),
        }
    }

    fn dispatch(&mut self, event: Event) -> Result<()> {
        let kind = event.kind();
        debug!(kind = %kind, symbol = %event.symbol(), "Dispatching event");

        match self.handlers.resolve(kind) {
            Resolved::Handler(handler) => {
                let outcome = handler.handle(event);
                self.stats.dispatched += 1;
                self.after_handled(kind, outcome)
            }
            Resolved::Fallback => {
                self.handle_unknown_event(&event);
                Ok(())
            }
        }
    }

    fn after_handled(&mut self, kind: EventKind, outcome: Result<()>) -> Result<()> {
        let Err(e) = outcome else {
            return Ok(());
        };
        self.stats.handler_failures += 1;
        match self.settings.failure_policy {
            HandlerFailurePolicy::Isolate => {
                error!(kind = %kind, error = %e, "Handler failed; continuing");
                Ok(())
            }
            HandlerFailurePolicy::Halt => {
                error!(kind = %kind, error = %e, "Handler failed; terminating");
                self.stop(StopReason::HandlerFailed(kind));
                Err(e)
            }
        }
    }

    fn handle_unknown_event(&mut self, event: &Event) {
        error!(
            kind = %event.kind(),
            symbol = %event.symbol(),
            "Unknown event received; terminating"
        );
        self.stop(StopReason::UnhandledKind(event.kind()));
    }

    fn handle_none_event(&mut self) {
        warn!("Null event received; terminating");
        self.stop(StopReason::Sentinel);
    }

    fn stop(&mut self, reason: StopReason) {
        self.continue_trading = false;
        self.stop_reason.get_or_insert(reason);
    }
}
