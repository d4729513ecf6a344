use async_trait::async_trait;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::types::analysis::AnalysisRecord;
use crate::types::engine::Executor;

/// Appends every analysis record as one JSON line. Downstream consumers can
/// tail the file; the core keeps no analysis history of its own.
pub struct JsonlWriter {
    file: Mutex<File>,
}

impl JsonlWriter {
    pub async fn create(path: &str) -> anyhow::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

#[async_trait]
impl Executor<AnalysisRecord> for JsonlWriter {
    async fn execute(&self, record: AnalysisRecord) -> anyhow::Result<()> {
        let mut line = serde_json::to_string(&record)?;
        line.push('\n');
        let mut file = self.file.lock().await;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}
