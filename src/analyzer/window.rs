use crate::types::candle::{Candle, InvalidCandleError};

/// Bounded, time-ordered candle history for one stream.
///
/// Realtime feeds re-send the forming candle on every tick and finally a
/// closed version with the same open_time, so a repeat of the tail's
/// open_time is an in-place replacement and a newer open_time appends.
/// At most one forming candle exists and it is always the last element.
#[derive(Debug, Clone)]
pub struct CandleWindow {
    candles: Vec<Candle>,
    capacity: usize,
}

impl CandleWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            candles: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Applies a streamed candle update. Updates older than the window tail
    /// are rejected and leave the window untouched.
    pub fn apply_update(&mut self, candle: Candle) -> Result<(), InvalidCandleError> {
        candle.validate()?;
        if let Some(last) = self.candles.last_mut() {
            if candle.open_time < last.open_time {
                return Err(InvalidCandleError::OutOfOrder {
                    incoming: candle.open_time,
                    last: last.open_time,
                });
            }
            if candle.open_time == last.open_time {
                *last = candle;
                return Ok(());
            }
            // the previous forming candle never saw its final tick
            if !last.is_closed {
                last.is_closed = true;
            }
        }
        self.candles.push(candle);
        if self.candles.len() > self.capacity {
            self.candles.remove(0);
        }
        Ok(())
    }

    /// Read-only ordered view for indicator computation.
    pub fn snapshot(&self) -> &[Candle] {
        &self.candles
    }

    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }
}
