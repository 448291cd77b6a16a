//! Stage handlers registered with the engine.
//!
//! Each handler owns what its stage needs and forwards its output through
//! its own [`EventSender`].

use std::sync::Arc;

use tracing::info;

use crate::application::queue::EventSender;
use crate::application::signal::SignalGenerator;
use crate::application::sizing::PositionSizer;
use crate::domain::{Event, EventKind};
use crate::error::{Error, Result};
use crate::port::{EventHandler, Platform};

fn unexpected(expected: EventKind, event: &Event) -> Error {
    Error::Handler {
        kind: expected,
        reason: format!("received {} event", event.kind()),
    }
}

/// DATA → SIGNAL.
pub struct DataHandler {
    events: EventSender,
    platform: Arc<dyn Platform>,
    generator: Box<dyn SignalGenerator>,
}

impl DataHandler {
    #[must_use]
    pub fn new(
        events: EventSender,
        platform: Arc<dyn Platform>,
        generator: Box<dyn SignalGenerator>,
    ) -> Self {
        Self {
            events,
            platform,
            generator,
        }
    }
}

impl EventHandler for DataHandler {
    fn handle(&mut self, event: Event) -> Result<()> {
        let data = match event {
            Event::Data(data) => data,
            other => return Err(unexpected(EventKind::Data, &other)),
        };

        info!(
            symbol = %data.symbol,
            bar_time = %data.bar.time,
            close = %data.bar.close,
            "New bar"
        );

        if let Some(signal) = self.generator.generate(&data, self.platform.as_ref()) {
            info!(
                symbol = %signal.symbol,
                side = %signal.signal,
                order = %signal.target_order,
                generator = self.generator.name(),
                "Signal generated"
            );
            self.events.send(signal)?;
        }
        Ok(())
    }
}

/// SIGNAL → SIZING.
pub struct SignalHandler {
    sizer: PositionSizer,
}

impl SignalHandler {
    #[must_use]
    pub fn new(sizer: PositionSizer) -> Self {
        Self { sizer }
    }
}

impl EventHandler for SignalHandler {
    fn handle(&mut self, event: Event) -> Result<()> {
        let signal = match event {
            Event::Signal(signal) => signal,
            other => return Err(unexpected(EventKind::Signal, &other)),
        };
        info!(
            symbol = %signal.symbol,
            side = %signal.signal,
            stop_loss = %signal.stop_loss,
            "Sizing signal"
        );
        self.sizer.size_signal(&signal)?;
        Ok(())
    }
}

/// Terminal stage: records the event and does nothing else.
///
/// Registered for kinds whose downstream stages run outside this process.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogHandler;

impl EventHandler for LogHandler {
    fn handle(&mut self, event: Event) -> Result<()> {
        match &event {
            Event::Sizing(e) => info!(
                symbol = %e.symbol(),
                side = %e.signal(),
                order = %e.target_order(),
                volume = %e.volume(),
                stop_loss = %e.stop_loss(),
                take_profit = %e.take_profit(),
                magic = %e.magic_number(),
                "Sizing event"
            ),
            Event::Order(e) => info!(
                symbol = %e.symbol,
                side = %e.signal,
                order = %e.target_order,
                volume = %e.volume,
                "Order event"
            ),
            Event::Execution(e) => info!(
                symbol = %e.symbol,
                side = %e.signal,
                fill_price = %e.fill_price,
                fill_time = %e.fill_time,
                volume = %e.volume,
                "Execution event"
            ),
            Event::Pending(e) => info!(
                symbol = %e.symbol,
                side = %e.signal,
                order = %e.target_order,
                price = %e.target_price,
                volume = %e.volume,
                "Pending order event"
            ),
            Event::Data(_) | Event::Signal(_) => info!(
                kind = %event.kind(),
                symbol = %event.symbol(),
                "Event"
            ),
        }
        Ok(())
    }
}
