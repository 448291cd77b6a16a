//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the extension points in the hexagonal architecture.
//! The trading platform sits behind the outbound ports; the engine drives
//! the application through the inbound handler port.
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!     ┌──────────────┤  engine, sizer, signals ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     ▼                         ▼                             ▼
//! ┌──────────┐           ┌─────────────┐              ┌──────────────┐
//! │ Platform │           │ DataPoller  │              │ EventHandler │
//! │ Adapter  │           │ (bar poll)  │              │ (per kind)   │
//! └──────────┘           └─────────────┘              └──────────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`MarketData`], [`AccountData`], [`Platform`] - Quotes, bars, account and instrument specs
//! - [`DataPoller`] - "Check for new data" capability driven by the engine
//! - [`EventHandler`] - Per-kind event handling registered in the dispatch table

pub mod inbound;
pub mod outbound;

pub use inbound::handler::EventHandler;
pub use outbound::market::{AccountData, MarketData, Platform};
pub use outbound::poller::DataPoller;
