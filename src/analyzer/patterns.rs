use crate::types::analysis::Pattern;
use crate::types::candle::Candle;

/// Classifies the shape of the most recent candle. Single-candle rules only;
/// multi-candle patterns (engulfing and friends) need the previous bar and
/// are not implemented yet.
///
/// A zero-range candle matches nothing, and neither does an empty window.
pub fn detect(candles: &[Candle]) -> Vec<Pattern> {
    let mut patterns = vec![];
    let Some(candle) = candles.last() else {
        return patterns;
    };

    let body = candle.body();
    let range = candle.high - candle.low;
    if range <= 0.0 {
        return patterns;
    }
    let lower_shadow = candle.open.min(candle.close) - candle.low;

    if body < 0.10 * range && range > 2.0 * body {
        patterns.push(Pattern::Doji);
    }
    if body < 0.20 * range && lower_shadow >= 2.0 * body {
        patterns.push(Pattern::HammerHangingMan);
    }
    patterns
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn candle(open: f64, high: f64, low: f64, close: f64) -> Candle {
        Candle {
            open_time: DateTime::from_timestamp_millis(0).unwrap(),
            open,
            high,
            low,
            close,
            volume: 1.0,
            close_time: DateTime::from_timestamp_millis(59_999).unwrap(),
            is_closed: true,
        }
    }

    #[test]
    fn test_doji_without_long_lower_shadow() {
        // body 0.05, range 1.05, lower shadow 0.05
        let detected = detect(&[candle(100.0, 101.0, 99.95, 100.05)]);
        assert_eq!(detected, vec![Pattern::Doji]);
    }

    #[test]
    fn test_hammer_that_is_not_a_doji() {
        // body 0.1 fails the doji width test (0.1 >= 0.075) but the lower
        // shadow of 0.6 is six times the body
        let detected = detect(&[candle(100.0, 100.15, 99.4, 100.1)]);
        assert_eq!(detected, vec![Pattern::HammerHangingMan]);
    }

    #[test]
    fn test_doji_with_long_lower_shadow_matches_both() {
        // body 0.02, range 1.0, lower shadow 0.68
        let detected = detect(&[candle(100.0, 100.3, 99.3, 99.98)]);
        assert_eq!(detected, vec![Pattern::Doji, Pattern::HammerHangingMan]);
    }

    #[test]
    fn test_zero_range_matches_nothing() {
        assert!(detect(&[candle(100.0, 100.0, 100.0, 100.0)]).is_empty());
    }

    #[test]
    fn test_empty_window_matches_nothing() {
        assert!(detect(&[]).is_empty());
    }

    #[test]
    fn test_wide_body_matches_nothing() {
        assert!(detect(&[candle(100.0, 101.0, 99.5, 100.9)]).is_empty());
    }
}
