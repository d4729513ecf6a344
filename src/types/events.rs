use serde::{Deserialize, Serialize};

use crate::types::candle::Candle;
use crate::types::orderbook::OrderBookSnapshot;

/// Identifies one analyzed stream: an instrument on a given data source.
/// Streams with distinct keys share no state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StreamKey {
    pub instrument: String,
    pub source: String,
}

/// Convenience enum containing all the events collectors can emit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MarketEvent {
    Candle {
        #[serde(flatten)]
        key: StreamKey,
        candle: Candle,
    },
    OrderBook {
        #[serde(flatten)]
        key: StreamKey,
        book: OrderBookSnapshot,
    },
}
