//! Application services (use cases).
//!
//! These services drive the pipeline: the engine loop, the event queue, bar
//! polling, signal generation, position sizing, and currency conversion.

pub mod engine;
pub mod fx;
pub mod handler;
pub mod poller;
pub mod queue;
pub mod signal;
pub mod sizing;
