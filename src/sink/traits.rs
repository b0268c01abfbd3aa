//! Trait abstraction for submission sinks to enable mocking in tests

use super::SubmissionRecord;
use anyhow::Result;
use async_trait::async_trait;

/// Receiver of submitted forms. The core's responsibility ends here.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    /// Short name shown in the status bar
    fn describe(&self) -> String;

    /// Hand over one submission
    async fn submit(&mut self, record: &SubmissionRecord) -> Result<()>;
}
