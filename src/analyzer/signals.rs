use yata::core::ValueType;

use crate::types::analysis::{IndicatorSet, OrderBookAnalysis, Pattern};
use crate::types::candle::Candle;

const RSI_OVERSOLD: ValueType = 30.0;
const RSI_OVERBOUGHT: ValueType = 70.0;

/// Fixed-order rule evaluation over one analysis run. Every matching rule
/// appends its signal; rules whose indicator is not yet available are
/// skipped, so a short history never produces a false positive.
pub fn compose(
    candle: &Candle,
    indicators: &IndicatorSet,
    orderbook: Option<&OrderBookAnalysis>,
    patterns: &[Pattern],
    body_spike_multiplier: ValueType,
) -> Vec<String> {
    let mut signals = vec![];

    let rsi_oversold = indicators.rsi.map_or(false, |rsi| rsi < RSI_OVERSOLD);
    let rsi_overbought = indicators.rsi.map_or(false, |rsi| rsi > RSI_OVERBOUGHT);

    if rsi_oversold && orderbook.map_or(false, |book| book.large_bid_wall.is_some()) {
        signals.push("Bullish: RSI Oversold + Large Bid Wall".to_string());
    }
    if rsi_overbought && orderbook.map_or(false, |book| book.large_ask_wall.is_some()) {
        signals.push("Bearish: RSI Overbought + Large Ask Wall".to_string());
    }
    if let (Some(body), Some(body_sma)) = (indicators.body, indicators.body_sma) {
        let spike = body > body_sma * body_spike_multiplier;
        if spike && candle.close > candle.open {
            signals.push("Bullish: Body Spike Up".to_string());
        }
        if spike && candle.close < candle.open {
            signals.push("Bearish: Body Spike Down".to_string());
        }
    }
    if patterns.contains(&Pattern::Doji) && rsi_oversold {
        signals.push("Potential Reversal: Doji in RSI Oversold Zone".to_string());
    }

    signals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::orderbook::OrderBookLevel;
    use chrono::DateTime;

    fn candle(open: f64, close: f64) -> Candle {
        Candle {
            open_time: DateTime::from_timestamp_millis(0).unwrap(),
            open,
            high: open.max(close) + 1.0,
            low: open.min(close) - 1.0,
            close,
            volume: 1.0,
            close_time: DateTime::from_timestamp_millis(59_999).unwrap(),
            is_closed: true,
        }
    }

    fn book_with(bid_wall: bool, ask_wall: bool) -> OrderBookAnalysis {
        let wall = OrderBookLevel::from((100.0, 50.0));
        OrderBookAnalysis {
            imbalance_ratio: Some(1.0),
            large_bid_wall: bid_wall.then_some(wall),
            large_ask_wall: ask_wall.then_some(wall),
        }
    }

    #[test]
    fn test_oversold_with_bid_wall() {
        let indicators = IndicatorSet {
            rsi: Some(25.0),
            ..Default::default()
        };
        let signals = compose(
            &candle(100.0, 100.1),
            &indicators,
            Some(&book_with(true, false)),
            &[],
            2.0,
        );
        assert_eq!(signals, vec!["Bullish: RSI Oversold + Large Bid Wall"]);
    }

    #[test]
    fn test_overbought_with_ask_wall() {
        let indicators = IndicatorSet {
            rsi: Some(75.0),
            ..Default::default()
        };
        let signals = compose(
            &candle(100.0, 100.1),
            &indicators,
            Some(&book_with(false, true)),
            &[],
            2.0,
        );
        assert_eq!(signals, vec!["Bearish: RSI Overbought + Large Ask Wall"]);
    }

    #[test]
    fn test_body_spike_up_and_down() {
        let indicators = IndicatorSet {
            body: Some(2.0),
            body_sma: Some(0.5),
            ..Default::default()
        };
        let up = compose(&candle(100.0, 102.0), &indicators, None, &[], 2.0);
        assert_eq!(up, vec!["Bullish: Body Spike Up"]);
        let down = compose(&candle(102.0, 100.0), &indicators, None, &[], 2.0);
        assert_eq!(down, vec!["Bearish: Body Spike Down"]);
    }

    #[test]
    fn test_doji_in_oversold_zone() {
        let indicators = IndicatorSet {
            rsi: Some(20.0),
            ..Default::default()
        };
        let signals = compose(
            &candle(100.0, 100.0),
            &indicators,
            None,
            &[Pattern::Doji],
            2.0,
        );
        assert_eq!(signals, vec!["Potential Reversal: Doji in RSI Oversold Zone"]);
    }

    #[test]
    fn test_rules_fire_in_fixed_order() {
        let indicators = IndicatorSet {
            rsi: Some(20.0),
            body: Some(2.0),
            body_sma: Some(0.5),
            ..Default::default()
        };
        let signals = compose(
            &candle(100.0, 102.0),
            &indicators,
            Some(&book_with(true, false)),
            &[Pattern::Doji],
            2.0,
        );
        assert_eq!(
            signals,
            vec![
                "Bullish: RSI Oversold + Large Bid Wall",
                "Bullish: Body Spike Up",
                "Potential Reversal: Doji in RSI Oversold Zone",
            ]
        );
    }

    #[test]
    fn test_unavailable_indicators_skip_rules() {
        let signals = compose(
            &candle(100.0, 102.0),
            &IndicatorSet::default(),
            Some(&book_with(true, true)),
            &[Pattern::Doji],
            2.0,
        );
        assert!(signals.is_empty());
    }
}
