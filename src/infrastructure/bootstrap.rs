//! Composition root: wires config, platform, stages, and engine together.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::snapshot::SnapshotPlatform;
use crate::application::engine::{EngineSettings, HandlerTable, TradingEngine};
use crate::application::fx::CurrencyConverter;
use crate::application::handler::{DataHandler, LogHandler, SignalHandler};
use crate::application::poller::BarPoller;
use crate::application::queue::event_channel;
use crate::application::signal::MaCrossover;
use crate::application::sizing::PositionSizer;
use crate::domain::EventKind;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::{MarketData, Platform};

/// Open the platform adapter named by `[platform]`.
pub fn open_platform(config: &Config) -> Result<Arc<SnapshotPlatform>> {
    let path = config.snapshot_path()?;
    Ok(Arc::new(SnapshotPlatform::open(path)?))
}

/// Build a ready-to-run engine over `platform`.
///
/// DATA and SIGNAL get the crossover generator and the position sizer. The
/// remaining kinds are logged; their stages live outside this process.
pub fn build_engine<P>(config: &Config, platform: Arc<P>) -> Result<TradingEngine>
where
    P: Platform + 'static,
{
    let (events, receiver) = event_channel();
    let market: Arc<dyn MarketData> = platform.clone();
    let platform: Arc<dyn Platform> = platform;

    let mut converter = CurrencyConverter::new(config.fx_pairs()?);
    if let Some(max_age) = config.fx.max_quote_age() {
        converter = converter.with_max_quote_age(max_age);
    }
    let sizer = PositionSizer::new(
        events.clone(),
        Arc::clone(&platform),
        &config.sizing,
        converter,
    );
    let generator = MaCrossover::new(config.signal, config.market.timeframe);

    let handlers = HandlerTable::builder()
        .on(
            EventKind::Data,
            DataHandler::new(events.clone(), Arc::clone(&platform), Box::new(generator)),
        )
        .on(EventKind::Signal, SignalHandler::new(sizer))
        .on(EventKind::Sizing, LogHandler)
        .on(EventKind::Order, LogHandler)
        .on(EventKind::Execution, LogHandler)
        .on(EventKind::Pending, LogHandler)
        .build();

    let poller = BarPoller::new(
        market,
        events,
        config.market.symbols.clone(),
        config.market.timeframe,
    );

    info!(
        symbols = ?config.market.symbols,
        timeframe = %config.market.timeframe,
        sizing = config.sizing.method(),
        fast = config.signal.fast_period,
        slow = config.signal.slow_period,
        "Pipeline assembled"
    );

    Ok(TradingEngine::new(
        receiver,
        Box::new(poller),
        handlers,
        EngineSettings::from(&config.engine),
    ))
}
