use yata::core::ValueType;

use crate::types::analysis::OrderBookAnalysis;
use crate::types::orderbook::{EmptyBookError, OrderBookSnapshot};

/// Analyzes a depth snapshot for bid/ask value imbalance and oversized
/// resting orders. `wall_threshold_base` is a size in base-asset units; it is
/// converted to a quote-value threshold via the mid price.
///
/// Only the first level per side whose value clears the threshold is
/// reported, not an aggregate of the whole side.
pub fn analyze(
    book: &OrderBookSnapshot,
    wall_threshold_base: ValueType,
) -> Result<OrderBookAnalysis, EmptyBookError> {
    let (best_bid, best_ask) = match (book.bids.first(), book.asks.first()) {
        (Some(bid), Some(ask)) => (bid, ask),
        _ => return Err(EmptyBookError),
    };

    let total_bid_value: ValueType = book.bids.iter().map(|level| level.value()).sum();
    let total_ask_value: ValueType = book.asks.iter().map(|level| level.value()).sum();
    let imbalance_ratio = if total_ask_value > 0.0 {
        Some(total_bid_value / total_ask_value)
    } else {
        None
    };

    let mid_price = (best_bid.price + best_ask.price) / 2.0;
    let wall_threshold_value = wall_threshold_base * mid_price;

    let large_bid_wall = book
        .bids
        .iter()
        .find(|level| level.value() > wall_threshold_value)
        .copied();
    let large_ask_wall = book
        .asks
        .iter()
        .find(|level| level.value() > wall_threshold_value)
        .copied();

    Ok(OrderBookAnalysis {
        imbalance_ratio,
        large_bid_wall,
        large_ask_wall,
    })
}
