//! Outbound adapters for the platform ports.

pub mod memory;
pub mod snapshot;
