//! Position sizing.
//!
//! [`PositionSizer`] turns a SIGNAL into at most one SIZING event. The volume
//! comes from the configured [`SizingStrategy`]; whatever the strategy
//! returns must still reach the instrument's minimum tradeable volume.
//! A signal that cannot be sized is logged and dropped.

mod fixed;
mod minimum;
mod risk_pct;
mod strategy;

pub use fixed::FixedSizer;
pub use minimum::MinimumSizer;
pub use risk_pct::RiskPctSizer;
pub use strategy::{round_to_step, SizingConfig, SizingStrategy};

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::fx::CurrencyConverter;
use crate::application::queue::EventSender;
use crate::domain::{SignalEvent, SizingEvent, Volume};
use crate::error::{Result, SizingError};
use crate::port::Platform;

/// Sizes signals and publishes SIZING events.
pub struct PositionSizer {
    events: EventSender,
    platform: Arc<dyn Platform>,
    strategy: Box<dyn SizingStrategy>,
}

impl PositionSizer {
    /// Build the strategy selected by `config`.
    #[must_use]
    pub fn new(
        events: EventSender,
        platform: Arc<dyn Platform>,
        config: &SizingConfig,
        converter: CurrencyConverter,
    ) -> Self {
        Self::with_strategy(events, platform, config.build(converter))
    }

    #[must_use]
    pub fn with_strategy(
        events: EventSender,
        platform: Arc<dyn Platform>,
        strategy: Box<dyn SizingStrategy>,
    ) -> Self {
        Self {
            events,
            platform,
            strategy,
        }
    }

    #[must_use]
    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Volume for `signal` after the minimum-volume floor.
    pub fn volume_for(&self, signal: &SignalEvent) -> std::result::Result<Volume, SizingError> {
        let volume = self.strategy.size(signal, self.platform.as_ref())?;

        let spec = self
            .platform
            .instrument(&signal.symbol)
            .ok_or_else(|| SizingError::InstrumentUnavailable {
                symbol: signal.symbol.clone(),
            })?;
        if volume < spec.volume_min {
            return Err(SizingError::BelowMinimum {
                symbol: signal.symbol.clone(),
                volume,
                volume_min: spec.volume_min,
            });
        }
        Ok(volume)
    }

    /// Size `signal` and enqueue the resulting SIZING event.
    ///
    /// A rejected signal is logged and produces nothing; that is not an
    /// error. Only a closed queue is reported as `Err`.
    pub fn size_signal(&self, signal: &SignalEvent) -> Result<Option<SizingEvent>> {
        let volume = match self.volume_for(signal) {
            Ok(volume) => volume,
            Err(e) => {
                warn!(
                    symbol = %signal.symbol,
                    side = %signal.signal,
                    strategy = self.strategy.name(),
                    reason = %e,
                    "Signal rejected by position sizer"
                );
                return Ok(None);
            }
        };

        let event = SizingEvent::new(signal, volume)?;
        self.events.send(event.clone())?;
        info!(
            symbol = %event.symbol(),
            side = %event.signal(),
            volume = %event.volume(),
            strategy = self.strategy.name(),
            "Position sized"
        );
        Ok(Some(event))
    }
}
