//! Inbound (driving) ports.
//!
//! - [`handler`]: the per-event-kind handler contract the engine dispatches to

pub mod handler;
