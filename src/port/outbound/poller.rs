//! Data polling port.

/// The "check for new data" capability the engine calls when its queue is
/// empty.
///
/// Implementations enqueue zero or more DATA events as a side effect and must
/// return promptly; the engine never waits on them.
pub trait DataPoller: Send {
    fn check_for_new_data(&mut self);
}
