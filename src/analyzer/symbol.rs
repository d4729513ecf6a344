use chrono::{DateTime, Utc};
use tracing::info;

use crate::analyzer::window::CandleWindow;
use crate::analyzer::{indicators, orderbook, patterns, signals};
use crate::config::settings::AnalyzerConfig;
use crate::types::analysis::AnalysisRecord;
use crate::types::candle::{Candle, InvalidCandleError};
use crate::types::orderbook::OrderBookSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyzerState {
    /// Fewer candles than the longest configured indicator lookback.
    WarmingUp,
    /// Full history; all indicators can produce values.
    Ready,
}

/// Per-(instrument, source) analysis state: one rolling candle window plus
/// the latest depth snapshot. Updates must be applied strictly in arrival
/// order, one at a time; the engine enforces this by driving each analyzer
/// set from a single task.
pub struct SymbolAnalyzer {
    instrument: String,
    source: String,
    config: AnalyzerConfig,
    window: CandleWindow,
    book: OrderBookSnapshot,
    last_analyzed: Option<DateTime<Utc>>,
}

impl SymbolAnalyzer {
    pub fn new(
        instrument: impl Into<String>,
        source: impl Into<String>,
        config: AnalyzerConfig,
    ) -> Self {
        let window = CandleWindow::new(config.candle_limit);
        Self {
            instrument: instrument.into(),
            source: source.into(),
            config,
            window,
            book: OrderBookSnapshot::default(),
            last_analyzed: None,
        }
    }

    /// Longest lookback any configured indicator needs. RSI consumes
    /// close-to-close deltas, hence the extra candle.
    fn warmup_candles(&self) -> usize {
        (self.config.rsi_period as usize + 1)
            .max(self.config.body_sma_period as usize)
            .max(self.config.atr_period as usize)
    }

    pub fn state(&self) -> AnalyzerState {
        if self.window.len() >= self.warmup_candles() {
            AnalyzerState::Ready
        } else {
            AnalyzerState::WarmingUp
        }
    }

    /// Bulk-loads historical candles fetched at startup. The newest closed
    /// candle becomes the analysis watermark, so replaying history on
    /// reconnect stays quiet.
    pub fn seed_history(&mut self, candles: Vec<Candle>) -> Result<(), InvalidCandleError> {
        for candle in candles {
            self.window.apply_update(candle)?;
        }
        self.last_analyzed = self
            .window
            .snapshot()
            .iter()
            .rev()
            .find(|candle| candle.is_closed)
            .map(|candle| candle.open_time);
        Ok(())
    }

    /// Applies one streamed candle update. Runs the analysis pipeline only
    /// when the update is a closed candle newer than the last analyzed one;
    /// forming ticks and duplicate closes return `None`.
    pub fn on_candle_update(
        &mut self,
        candle: Candle,
    ) -> Result<Option<AnalysisRecord>, InvalidCandleError> {
        let was_warming = self.state() == AnalyzerState::WarmingUp;
        self.window.apply_update(candle)?;
        if was_warming && self.state() == AnalyzerState::Ready {
            info!(
                instrument = %self.instrument,
                source = %self.source,
                "analyzer ready: window covers the full indicator lookback"
            );
        }

        let due = candle.is_closed
            && self
                .last_analyzed
                .map_or(true, |watermark| candle.open_time > watermark);
        if !due {
            return Ok(None);
        }
        self.last_analyzed = Some(candle.open_time);
        Ok(Some(self.run_analysis(candle)))
    }

    /// Replaces the stored depth snapshot, truncated to the configured depth.
    /// Book updates never trigger analysis on their own; they are folded into
    /// the next candle-close run to avoid signal storms.
    pub fn on_orderbook_update(&mut self, mut book: OrderBookSnapshot) {
        book.truncate(self.config.orderbook_depth);
        self.book = book;
    }

    /// On-demand analysis of the current state, without the candle-close
    /// gating. Does not move the analysis watermark.
    pub fn analyze_now(&self) -> Option<AnalysisRecord> {
        let last = *self.window.last()?;
        Some(self.run_analysis(last))
    }

    fn run_analysis(&self, last: Candle) -> AnalysisRecord {
        let candles = self.window.snapshot();
        let indicators = indicators::compute(candles, &self.config);
        let detected = patterns::detect(candles);
        // an unusable book degrades to "analysis unavailable", never an error
        let book_analysis = orderbook::analyze(&self.book, self.config.wall_threshold_base).ok();
        let signals = signals::compose(
            &last,
            &indicators,
            book_analysis.as_ref(),
            &detected,
            self.config.body_spike_multiplier,
        );
        AnalysisRecord {
            instrument: self.instrument.clone(),
            source: self.source.clone(),
            // keyed to the candle, not the wall clock: identical state must
            // produce an identical record
            timestamp: last.close_time,
            candle: last,
            indicators,
            orderbook: book_analysis,
            patterns: detected,
            signals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::orderbook::OrderBookLevel;
    use chrono::DateTime;

    fn config() -> AnalyzerConfig {
        AnalyzerConfig {
            candle_limit: 50,
            orderbook_depth: 20,
            rsi_period: 14,
            body_sma_period: 5,
            atr_period: 5,
            body_spike_multiplier: 2.0,
            wall_threshold_base: 10.0,
        }
    }

    fn candle(minute: i64, close: f64, is_closed: bool) -> Candle {
        let ms = minute * 60_000;
        let open = close + 0.5;
        Candle {
            open_time: DateTime::from_timestamp_millis(ms).unwrap(),
            open,
            high: open,
            low: close,
            close,
            volume: 1.0,
            close_time: DateTime::from_timestamp_millis(ms + 59_999).unwrap(),
            is_closed,
        }
    }

    /// Strictly declining closes: 99.5, 99.0, 98.5, ...
    fn declining(count: i64) -> Vec<Candle> {
        (0..count)
            .map(|i| candle(i, 100.0 - (i + 1) as f64 * 0.5, true))
            .collect()
    }

    fn book_with_bid_wall() -> OrderBookSnapshot {
        OrderBookSnapshot {
            bids: vec![OrderBookLevel::from((100.0, 1_000.0))],
            asks: vec![OrderBookLevel::from((101.0, 1.0))],
        }
    }

    #[test]
    fn test_forming_tick_produces_no_record() {
        let mut analyzer = SymbolAnalyzer::new("BTCUSDT", "binance", config());
        let record = analyzer.on_candle_update(candle(1, 100.0, false)).unwrap();
        assert!(record.is_none());
    }

    #[test]
    fn test_closed_candle_produces_one_record() {
        let mut analyzer = SymbolAnalyzer::new("BTCUSDT", "binance", config());
        let last = declining(20).into_iter().fold(None, |_, c| {
            analyzer.on_candle_update(c).unwrap()
        });
        let record = last.expect("closed candle should produce a record");
        assert_eq!(record.instrument, "BTCUSDT");
        assert_eq!(record.source, "binance");
        assert!(record.indicators.rsi.unwrap() <= 30.0);
    }

    #[test]
    fn test_duplicate_closed_candle_is_idempotent() {
        let mut analyzer = SymbolAnalyzer::new("BTCUSDT", "binance", config());
        for c in declining(20) {
            analyzer.on_candle_update(c).unwrap();
        }
        let duplicate = candle(19, 100.0 - 20.0 * 0.5, true);
        assert!(analyzer.on_candle_update(duplicate).unwrap().is_none());
    }

    #[test]
    fn test_oversold_with_bid_wall_fires_composite_signal() {
        let mut analyzer = SymbolAnalyzer::new("BTCUSDT", "binance", config());
        analyzer.on_orderbook_update(book_with_bid_wall());
        let mut record = None;
        for c in declining(20) {
            record = analyzer.on_candle_update(c).unwrap();
        }
        let record = record.unwrap();
        assert!(record
            .signals
            .contains(&"Bullish: RSI Oversold + Large Bid Wall".to_string()));
    }

    #[test]
    fn test_warming_up_record_has_no_signals() {
        let mut analyzer = SymbolAnalyzer::new("BTCUSDT", "binance", config());
        analyzer.on_orderbook_update(book_with_bid_wall());
        assert_eq!(analyzer.state(), AnalyzerState::WarmingUp);
        let record = analyzer
            .on_candle_update(candle(1, 99.5, true))
            .unwrap()
            .unwrap();
        assert_eq!(record.indicators.rsi, None);
        assert!(record.signals.is_empty());
    }

    #[test]
    fn test_state_transitions_to_ready() {
        let mut analyzer = SymbolAnalyzer::new("BTCUSDT", "binance", config());
        for c in declining(15) {
            analyzer.on_candle_update(c).unwrap();
        }
        assert_eq!(analyzer.state(), AnalyzerState::Ready);
    }

    #[test]
    fn test_seed_history_sets_the_watermark() {
        let mut analyzer = SymbolAnalyzer::new("BTCUSDT", "binance", config());
        analyzer.seed_history(declining(20)).unwrap();
        // the newest seeded candle was already analyzed upstream
        let duplicate = candle(19, 100.0 - 20.0 * 0.5, true);
        assert!(analyzer.on_candle_update(duplicate).unwrap().is_none());
        // a genuinely new close still produces a record
        let next = candle(20, 89.0, true);
        assert!(analyzer.on_candle_update(next).unwrap().is_some());
    }

    #[test]
    fn test_analyze_now_ignores_gating() {
        let mut analyzer = SymbolAnalyzer::new("BTCUSDT", "binance", config());
        assert!(analyzer.analyze_now().is_none());
        analyzer.seed_history(declining(20)).unwrap();
        assert!(analyzer.analyze_now().is_some());
    }

    #[test]
    fn test_orderbook_depth_truncation_drops_deep_walls() {
        let mut cfg = config();
        cfg.orderbook_depth = 1;
        let mut analyzer = SymbolAnalyzer::new("BTCUSDT", "binance", cfg);
        analyzer.seed_history(declining(20)).unwrap();
        analyzer.on_orderbook_update(OrderBookSnapshot {
            bids: vec![
                OrderBookLevel::from((100.0, 1.0)),
                OrderBookLevel::from((99.0, 1_000.0)),
            ],
            asks: vec![OrderBookLevel::from((101.0, 1.0))],
        });
        let record = analyzer.analyze_now().unwrap();
        assert_eq!(record.orderbook.unwrap().large_bid_wall, None);
    }
}
