use async_trait::async_trait;
use tracing::{debug, info};

use crate::types::analysis::AnalysisRecord;
use crate::types::engine::Executor;

/// Renders analysis records as human-readable signal messages and logs them.
/// Records with no fired signal pass through at debug level only.
pub struct LogNotifier;

pub(crate) fn format_record(record: &AnalysisRecord) -> String {
    let mut lines = vec![format!(
        "⚡ Signal for {} ({})",
        record.instrument, record.source
    )];
    lines.extend(record.signals.iter().cloned());
    if !record.patterns.is_empty() {
        let names: Vec<String> = record.patterns.iter().map(|p| p.to_string()).collect();
        lines.push(format!("Patterns: {}", names.join(", ")));
    }
    if let Some(book) = &record.orderbook {
        match book.imbalance_ratio {
            Some(ratio) => lines.push(format!("Orderbook Imbalance: {ratio:.2}")),
            None => lines.push("Orderbook Imbalance: undefined".to_string()),
        }
        if let Some(wall) = &book.large_bid_wall {
            lines.push(format!(
                "Large Bid Wall: {:.2} @ {}",
                wall.quantity, wall.price
            ));
        }
        if let Some(wall) = &book.large_ask_wall {
            lines.push(format!(
                "Large Ask Wall: {:.2} @ {}",
                wall.quantity, wall.price
            ));
        }
    }
    if let Some(rsi) = record.indicators.rsi {
        lines.push(format!("Latest RSI: {rsi:.2}"));
    }
    let candle = &record.candle;
    lines.push(format!(
        "Candle: O={:.4} H={:.4} L={:.4} C={:.4}",
        candle.open, candle.high, candle.low, candle.close
    ));
    lines.push(format!("Timestamp: {}", record.timestamp));
    lines.join("\n")
}

#[async_trait]
impl Executor<AnalysisRecord> for LogNotifier {
    async fn execute(&self, record: AnalysisRecord) -> anyhow::Result<()> {
        if record.signals.is_empty() {
            debug!(
                instrument = %record.instrument,
                source = %record.source,
                "analysis complete, no signals fired"
            );
            return Ok(());
        }
        info!("{}", format_record(&record));
        Ok(())
    }
}
