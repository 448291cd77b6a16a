use super::strategy::SizingStrategy;
use crate::domain::{SignalEvent, Volume};
use crate::error::SizingError;
use crate::port::Platform;

/// Trades a configured constant volume.
#[derive(Debug, Clone, Copy)]
pub struct FixedSizer {
    volume: Volume,
}

impl FixedSizer {
    #[must_use]
    pub const fn new(volume: Volume) -> Self {
        Self { volume }
    }
}

impl SizingStrategy for FixedSizer {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn size(&self, _signal: &SignalEvent, _platform: &dyn Platform) -> Result<Volume, SizingError> {
        Ok(self.volume)
    }
}
