//! Sizing strategy contract and configuration.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;

use super::fixed::FixedSizer;
use super::minimum::MinimumSizer;
use super::risk_pct::RiskPctSizer;
use crate::application::fx::CurrencyConverter;
use crate::domain::{SignalEvent, Volume};
use crate::error::SizingError;
use crate::port::Platform;

/// Computes a position volume for a signal.
///
/// An `Err` means the signal cannot be sized and must not produce an order.
/// The caller logs the reason; strategies do not.
pub trait SizingStrategy: Send + Sync {
    /// Identifier used in logs and configuration.
    fn name(&self) -> &'static str;

    /// Volume for `signal`, in lots.
    fn size(&self, signal: &SignalEvent, platform: &dyn Platform) -> Result<Volume, SizingError>;
}

/// Which sizing strategy to run, selected by `method` in the `[sizing]`
/// section.
///
/// ```toml
/// [sizing]
/// method = "risk_pct"
/// risk_pct = 0.01
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum SizingConfig {
    /// The instrument's minimum tradeable volume.
    #[default]
    Minimum,
    /// A constant volume.
    Fixed { volume: Volume },
    /// Risk a fraction of equity between entry and stop loss.
    RiskPct { risk_pct: Decimal },
}

impl SizingConfig {
    /// Instantiate the configured strategy.
    #[must_use]
    pub fn build(&self, converter: CurrencyConverter) -> Box<dyn SizingStrategy> {
        match self {
            Self::Minimum => Box::new(MinimumSizer),
            Self::Fixed { volume } => Box::new(FixedSizer::new(*volume)),
            Self::RiskPct { risk_pct } => Box::new(RiskPctSizer::new(*risk_pct, converter)),
        }
    }

    #[must_use]
    pub const fn method(&self) -> &'static str {
        match self {
            Self::Minimum => "minimum",
            Self::Fixed { .. } => "fixed",
            Self::RiskPct { .. } => "risk_pct",
        }
    }
}

/// Round `volume` to the nearest multiple of `step`.
///
/// Ties go to the even multiple (banker's rounding): with a step of 0.01,
/// 0.125 lots becomes 0.12 and 0.135 becomes 0.14.
pub fn round_to_step(volume: Volume, step: Volume) -> Result<Volume, SizingError> {
    if step <= Volume::ZERO {
        return Err(SizingError::Arithmetic("volume step is not positive"));
    }
    let steps = volume
        .checked_div(step)
        .ok_or(SizingError::Arithmetic("volume step division overflowed"))?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven);
    steps
        .checked_mul(step)
        .ok_or(SizingError::Arithmetic("volume step multiplication overflowed"))
}
