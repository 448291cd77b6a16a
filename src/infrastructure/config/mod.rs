//! Configuration sections and loading.

pub mod engine;
pub mod fx;
pub mod logging;
pub mod market;
pub mod platform;
pub mod settings;

pub use settings::Config;
