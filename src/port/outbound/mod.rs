//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the trading platform the pipeline reads from.

pub mod market;
pub mod poller;
