use std::collections::HashMap;
use tracing::{debug, warn};

use crate::analyzer::symbol::SymbolAnalyzer;
use crate::config::settings::AnalyzerConfig;
use crate::types::analysis::AnalysisRecord;
use crate::types::engine::Analyzer;
use crate::types::events::{MarketEvent, StreamKey};

/// Routes market events to per-(instrument, source) analyzers, creating them
/// lazily on first sight of a stream. Rejected updates are logged and
/// skipped; they never take the stage down.
pub struct SymbolAnalyzerSet {
    config: AnalyzerConfig,
    analyzers: HashMap<StreamKey, SymbolAnalyzer>,
}

impl SymbolAnalyzerSet {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            config,
            analyzers: HashMap::new(),
        }
    }

    fn analyzer(&mut self, key: &StreamKey) -> &mut SymbolAnalyzer {
        let config = &self.config;
        self.analyzers.entry(key.clone()).or_insert_with(|| {
            debug!(instrument = %key.instrument, source = %key.source, "creating analyzer");
            SymbolAnalyzer::new(key.instrument.clone(), key.source.clone(), config.clone())
        })
    }
}

impl Analyzer<MarketEvent, AnalysisRecord> for SymbolAnalyzerSet {
    fn process_event(&mut self, event: MarketEvent) -> Vec<AnalysisRecord> {
        match event {
            MarketEvent::Candle { key, candle } => {
                match self.analyzer(&key).on_candle_update(candle) {
                    Ok(Some(record)) => vec![record],
                    Ok(None) => vec![],
                    Err(e) => {
                        warn!(
                            instrument = %key.instrument,
                            source = %key.source,
                            "rejected candle update: {}", e
                        );
                        vec![]
                    }
                }
            }
            MarketEvent::OrderBook { key, book } => {
                self.analyzer(&key).on_orderbook_update(book);
                vec![]
            }
        }
    }
}
