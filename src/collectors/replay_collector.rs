use crate::config::settings::CollectorConfig;
use crate::types::engine::{Collector, EventStream};
use crate::types::events::MarketEvent;
use async_trait::async_trait;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::{error, info, warn};

/// Streams recorded market events from a JSONL file, one event per line.
/// Stands in for a live exchange feed; the wire shape is identical, so the
/// rest of the pipeline cannot tell the difference.
pub struct ReplayCollector {
    path: String,
}

impl ReplayCollector {
    pub fn new(config: &CollectorConfig) -> Self {
        Self {
            path: config.replay_path.clone(),
        }
    }
}

#[async_trait]
impl Collector<MarketEvent> for ReplayCollector {
    async fn get_event_stream(&self) -> anyhow::Result<EventStream<'_, MarketEvent>> {
        info!("Initializing ReplayCollector event stream from {}", self.path);
        let file = File::open(&self.path).await?;
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            let mut lines = BufReader::new(file).lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        if line.trim().is_empty() {
                            continue;
                        }
                        match serde_json::from_str::<MarketEvent>(&line) {
                            Ok(event) => {
                                if tx.send(event).is_err() {
                                    break;
                                }
                            }
                            Err(e) => warn!("skipping malformed event line: {}", e),
                        }
                    }
                    Ok(None) => break,
                    Err(e) => {
                        error!("error reading replay file: {}", e);
                        break;
                    }
                }
            }
        });
        Ok(Box::pin(UnboundedReceiverStream::new(rx)))
    }
}
