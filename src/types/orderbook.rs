use serde::{Deserialize, Serialize};
use thiserror::Error;
use yata::core::ValueType;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("order book has no levels on at least one side")]
pub struct EmptyBookError;

/// One resting price level. Encoded on the wire as a `[price, quantity]` pair,
/// matching the exchange depth stream shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(ValueType, ValueType)", into = "(ValueType, ValueType)")]
pub struct OrderBookLevel {
    pub price: ValueType,
    pub quantity: ValueType,
}

impl From<(ValueType, ValueType)> for OrderBookLevel {
    fn from((price, quantity): (ValueType, ValueType)) -> Self {
        Self { price, quantity }
    }
}

impl From<OrderBookLevel> for (ValueType, ValueType) {
    fn from(level: OrderBookLevel) -> Self {
        (level.price, level.quantity)
    }
}

impl OrderBookLevel {
    /// Quote value resting at this level.
    pub fn value(&self) -> ValueType {
        self.price * self.quantity
    }
}

/// Depth snapshot: bids sorted descending by price, asks ascending.
/// Either side may be empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderBookSnapshot {
    pub bids: Vec<OrderBookLevel>,
    pub asks: Vec<OrderBookLevel>,
}

impl OrderBookSnapshot {
    pub fn truncate(&mut self, depth: usize) {
        self.bids.truncate(depth);
        self.asks.truncate(depth);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_value() {
        let level = OrderBookLevel::from((100.0, 2.5));
        assert!((level.value() - 250.0).abs() < 1e-9);
    }

    #[test]
    fn test_level_wire_shape() {
        let level: OrderBookLevel = serde_json::from_str("[100.5, 3.0]").unwrap();
        assert_eq!(level, OrderBookLevel::from((100.5, 3.0)));
        assert_eq!(serde_json::to_string(&level).unwrap(), "[100.5,3.0]");
    }

    #[test]
    fn test_truncate() {
        let mut book = OrderBookSnapshot {
            bids: vec![(100.0, 1.0).into(), (99.0, 1.0).into(), (98.0, 1.0).into()],
            asks: vec![(101.0, 1.0).into()],
        };
        book.truncate(2);
        assert_eq!(book.bids.len(), 2);
        assert_eq!(book.asks.len(), 1);
    }
}
