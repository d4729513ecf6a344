mod analyzer;
mod collectors;
mod config;
mod engine;
mod executors;
mod types;

use crate::analyzer::set::SymbolAnalyzerSet;
use crate::collectors::replay_collector::ReplayCollector;
use crate::config::constants::ENGINE_MESSAGE_CHANNEL_CAPACITY;
use crate::config::settings::Settings;
use crate::engine::Engine;
use crate::executors::jsonl_writer::JsonlWriter;
use crate::executors::log_notifier::LogNotifier;
use crate::types::analysis::AnalysisRecord;
use crate::types::events::MarketEvent;
use anyhow::{anyhow, Result};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load settings from config.toml; nothing useful can run without them.
    let settings = Settings::new("config").map_err(|e| anyhow!("invalid configuration: {e}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&settings.logger.level).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    info!("Starting market signal bot with settings: {settings:?}");

    info!("Initializing engine..");
    let mut engine: Engine<MarketEvent, AnalysisRecord> = Engine::new()
        .with_event_channel_capacity(ENGINE_MESSAGE_CHANNEL_CAPACITY)
        .with_action_channel_capacity(ENGINE_MESSAGE_CHANNEL_CAPACITY);

    engine.add_collector(Box::new(ReplayCollector::new(&settings.collector)));
    engine.add_analyzer(Box::new(SymbolAnalyzerSet::new(settings.analyzer.clone())));
    engine.add_executor(Arc::new(LogNotifier));
    if let Some(path) = &settings.executor.records_path {
        engine.add_executor(Arc::new(JsonlWriter::create(path).await?));
    }

    let mut set = engine
        .run()
        .await
        .map_err(|e| anyhow!("engine failed to start: {e}"))?;
    while let Some(result) = set.join_next().await {
        if let Err(e) = result {
            error!("engine task failed: {e}");
        }
    }
    info!("all engine tasks finished, shutting down");
    Ok(())
}
