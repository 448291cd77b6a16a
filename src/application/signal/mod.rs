//! Signal generation.
//!
//! A [`SignalGenerator`] looks at each new bar and decides whether to trade.

mod ma_crossover;

pub use ma_crossover::{MaCrossover, MaCrossoverConfig};

use crate::domain::{DataEvent, SignalEvent};
use crate::port::Platform;

/// Turns new bars into trading intents.
pub trait SignalGenerator: Send {
    /// Identifier used in logs.
    fn name(&self) -> &'static str;

    /// Signal for the bar in `data`, if any.
    fn generate(&mut self, data: &DataEvent, platform: &dyn Platform) -> Option<SignalEvent>;
}
