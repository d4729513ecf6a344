use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use yata::core::ValueType;

use crate::types::candle::Candle;
use crate::types::orderbook::OrderBookLevel;

/// Latest indicator values for one window. `None` means the window does not
/// yet hold enough candles for that indicator's lookback.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IndicatorSet {
    pub rsi: Option<ValueType>,
    pub body: Option<ValueType>,
    pub body_sma: Option<ValueType>,
    pub atr: Option<ValueType>,
}

/// Candlestick shape classifications for the most recent bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Pattern {
    Doji,
    HammerHangingMan,
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Doji => write!(f, "Doji"),
            Pattern::HammerHangingMan => write!(f, "Hammer/Hanging Man"),
        }
    }
}

/// Order book read: bid/ask value imbalance plus the first oversized resting
/// order per side. `imbalance_ratio` is `None` when the ask value is zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderBookAnalysis {
    pub imbalance_ratio: Option<ValueType>,
    pub large_bid_wall: Option<OrderBookLevel>,
    pub large_ask_wall: Option<OrderBookLevel>,
}

/// Composite result of one analysis run. Immutable once produced; consumed
/// directly by the delivery executors.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisRecord {
    pub instrument: String,
    pub source: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    pub candle: Candle,
    pub indicators: IndicatorSet,
    pub orderbook: Option<OrderBookAnalysis>,
    pub patterns: Vec<Pattern>,
    pub signals: Vec<String>,
}
