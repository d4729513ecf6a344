use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use yata::core::ValueType;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidCandleError {
    #[error("candle at {open_time} has a non-finite, negative or out-of-bounds OHLCV field")]
    Malformed { open_time: DateTime<Utc> },
    #[error("out-of-order candle: {incoming} arrived while the window tail is at {last}")]
    OutOfOrder {
        incoming: DateTime<Utc>,
        last: DateTime<Utc>,
    },
}

/// One OHLCV bar as delivered by the exchange stream, either still forming
/// (`is_closed == false`, re-sent on every tick) or final.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub open_time: DateTime<Utc>,
    pub open: ValueType,
    pub high: ValueType,
    pub low: ValueType,
    pub close: ValueType,
    pub volume: ValueType,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub close_time: DateTime<Utc>,
    pub is_closed: bool,
}

impl Candle {
    /// Checks the OHLC bounds invariant: high tops every price, low floors it,
    /// and all fields are finite and non-negative.
    pub fn validate(&self) -> Result<(), InvalidCandleError> {
        let fields = [self.open, self.high, self.low, self.close, self.volume];
        let finite = fields.iter().all(|v| v.is_finite() && *v >= 0.0);
        let bounds = self.high >= self.open.max(self.close).max(self.low)
            && self.low <= self.open.min(self.close).min(self.high);
        if finite && bounds {
            Ok(())
        } else {
            Err(InvalidCandleError::Malformed {
                open_time: self.open_time,
            })
        }
    }

    pub fn body(&self) -> ValueType {
        (self.close - self.open).abs()
    }
}
