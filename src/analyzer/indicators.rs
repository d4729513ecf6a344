use yata::core::{PeriodType, ValueType};
use yata::methods::{EMA, SMA};
use yata::prelude::Method;

use crate::config::settings::AnalyzerConfig;
use crate::types::analysis::IndicatorSet;
use crate::types::candle::Candle;

/// Mean of the last `period` values; `None` until enough samples exist.
pub fn sma(values: &[ValueType], period: PeriodType) -> Option<ValueType> {
    if period == 0 || values.len() < period as usize {
        return None;
    }
    let mut sma = SMA::new(period, &values[0]).ok()?;
    let mut latest = values[0];
    for value in &values[1..] {
        latest = sma.next(value);
    }
    Some(latest)
}

/// Exponential moving average with smoothing 2/(period+1), seeded by the
/// first sample; `None` until `period` samples exist.
pub fn ema(values: &[ValueType], period: PeriodType) -> Option<ValueType> {
    if period == 0 || values.len() < period as usize {
        return None;
    }
    let mut ema = EMA::new(period, &values[0]).ok()?;
    let mut latest = values[0];
    for value in &values[1..] {
        latest = ema.next(value);
    }
    Some(latest)
}

/// Relative Strength Index over EMA-smoothed gains and losses. Consumes
/// close-to-close deltas, so it needs `period + 1` candles. A zero average
/// loss pins the value at 100 instead of dividing by zero.
pub fn rsi(candles: &[Candle], period: PeriodType) -> Option<ValueType> {
    if period == 0 || candles.len() <= period as usize {
        return None;
    }
    let mut gains = Vec::with_capacity(candles.len() - 1);
    let mut losses = Vec::with_capacity(candles.len() - 1);
    for pair in candles.windows(2) {
        let delta = pair[1].close - pair[0].close;
        gains.push(delta.max(0.0));
        losses.push((-delta).max(0.0));
    }
    let avg_gain = ema(&gains, period)?;
    let avg_loss = ema(&losses, period)?;
    if avg_loss == 0.0 {
        return Some(100.0);
    }
    let rs = avg_gain / avg_loss;
    Some(100.0 - 100.0 / (1.0 + rs))
}

/// Simple moving average of candle bodies over `period` candles.
pub fn body_average(candles: &[Candle], period: PeriodType) -> Option<ValueType> {
    let bodies: Vec<ValueType> = candles.iter().map(Candle::body).collect();
    sma(&bodies, period)
}

/// Average True Range: EMA of the per-candle true range. The first candle has
/// no previous close, so its true range is just high - low.
pub fn atr(candles: &[Candle], period: PeriodType) -> Option<ValueType> {
    let first = candles.first()?;
    let mut ranges = Vec::with_capacity(candles.len());
    ranges.push(first.high - first.low);
    for pair in candles.windows(2) {
        let (prev, current) = (&pair[0], &pair[1]);
        let range = (current.high - current.low)
            .max((current.high - prev.close).abs())
            .max((current.low - prev.close).abs());
        ranges.push(range);
    }
    ema(&ranges, period)
}

/// Computes the full indicator set over a window snapshot. Recomputed from
/// the retained history on every run; the window is bounded, so the cost is
/// bounded too.
pub fn compute(candles: &[Candle], config: &AnalyzerConfig) -> IndicatorSet {
    IndicatorSet {
        rsi: rsi(candles, config.rsi_period),
        body: candles.last().map(Candle::body),
        body_sma: body_average(candles, config.body_sma_period),
        atr: atr(candles, config.atr_period),
    }
}
