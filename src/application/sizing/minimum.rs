use super::strategy::SizingStrategy;
use crate::domain::{SignalEvent, Volume};
use crate::error::SizingError;
use crate::port::Platform;

/// Always trades the instrument's minimum volume.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinimumSizer;

impl SizingStrategy for MinimumSizer {
    fn name(&self) -> &'static str {
        "minimum"
    }

    fn size(&self, signal: &SignalEvent, platform: &dyn Platform) -> Result<Volume, SizingError> {
        platform
            .instrument(&signal.symbol)
            .map(|spec| spec.volume_min)
            .ok_or_else(|| SizingError::InstrumentUnavailable {
                symbol: signal.symbol.clone(),
            })
    }
}
