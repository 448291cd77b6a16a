//! Implementations of ports (hexagonal adapters).
//!
//! - [`inbound`] - Driving adapters (the command line)
//! - [`outbound`] - Driven adapters (platform state)

pub mod inbound;
pub mod outbound;
