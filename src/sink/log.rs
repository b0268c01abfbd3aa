//! Sink that only logs submissions

use super::{SubmissionRecord, SubmissionSink};
use anyhow::Result;
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

#[async_trait]
impl SubmissionSink for LogSink {
    fn describe(&self) -> String {
        "log".to_string()
    }

    async fn submit(&mut self, record: &SubmissionRecord) -> Result<()> {
        let values = serde_json::to_string(&record.values)?;
        tracing::info!(id = %record.id, form = %record.form_title, %values, "Form submitted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SubmissionResult;

    #[test]
    fn test_submit_succeeds() {
        let mut sink = LogSink;
        let record = SubmissionRecord::new("T", SubmissionResult::default());
        tokio_test::block_on(async {
            assert!(sink.submit(&record).await.is_ok());
        });
        assert_eq!(sink.describe(), "log");
    }
}
