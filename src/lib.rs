//! Barflow - an event-driven trading pipeline.
//!
//! New closed bars are polled from a trading platform and flow through a
//! single FIFO event queue: DATA → SIGNAL → SIZING → ORDER → EXECUTION /
//! PENDING. A single-threaded engine dispatches each event to the handler
//! registered for its kind.
//!
//! # Architecture
//!
//! - [`domain`] - Events, market data types, currencies, FX pairs
//! - [`port`] - Traits at the seams: market/account data, data polling, handlers
//! - [`application`] - Engine, queue, bar poller, signal generation, sizing, FX conversion
//! - [`adapter`] - In-memory and snapshot-file platforms, the CLI
//! - [`infrastructure`] - Configuration and wiring
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use barflow::infrastructure::{bootstrap, config::Config};
//!
//! # async fn run() -> barflow::error::Result<()> {
//! let config = Config::load("config.toml")?;
//! let platform = bootstrap::open_platform(&config)?;
//! let mut engine = bootstrap::build_engine(&config, platform)?;
//! let reason = engine.run().await?;
//! println!("stopped: {reason:?}");
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;
