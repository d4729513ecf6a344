use config::{Config, ConfigError, File};
use serde_derive::Deserialize;
use yata::core::PeriodType;

/// Tunables of the per-symbol analysis core.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzerConfig {
    /// Rolling candle history retained per stream.
    pub candle_limit: usize,
    /// Depth levels retained per order book side.
    pub orderbook_depth: usize,
    pub rsi_period: PeriodType,
    pub body_sma_period: PeriodType,
    pub atr_period: PeriodType,
    /// A candle body larger than this multiple of the body average is a spike.
    pub body_spike_multiplier: f64,
    /// Resting order size, in base-asset units, above which a level counts as
    /// a wall. Converted to quote value via the mid price at analysis time.
    pub wall_threshold_base: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            candle_limit: 500,
            orderbook_depth: 20,
            rsi_period: 14,
            body_sma_period: 20,
            atr_period: 14,
            body_spike_multiplier: 2.0,
            wall_threshold_base: 10.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectorConfig {
    /// JSONL file of recorded market events to replay.
    pub replay_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExecutorConfig {
    /// When set, every analysis record is appended here as one JSON line.
    pub records_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggerConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub analyzer: AnalyzerConfig,
    pub collector: CollectorConfig,
    pub executor: ExecutorConfig,
    pub logger: LoggerConfig,
}

impl Settings {
    pub fn new(config_filename: &str) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name(config_filename))
            .build()?;
        s.try_deserialize()
    }
}
