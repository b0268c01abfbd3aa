//! Append-only JSON lines file sink

use super::{SubmissionRecord, SubmissionSink};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

/// Writes one JSON object per line per submission
#[derive(Debug, Clone)]
pub struct JsonLinesSink {
    path: PathBuf,
}

impl JsonLinesSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[async_trait]
impl SubmissionSink for JsonLinesSink {
    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }

    async fn submit(&mut self, record: &SubmissionRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("creating {}", parent.display()))?;
        }

        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .with_context(|| format!("opening {}", self.path.display()))?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        tracing::info!(id = %record.id, path = %self.path.display(), "Submission written");
        Ok(())
    }
}
