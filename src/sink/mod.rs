//! Submission sinks: where a valid form submission goes

mod jsonl;
mod log;
mod record;
mod traits;

pub use jsonl::JsonLinesSink;
pub use log::LogSink;
pub use record::SubmissionRecord;
pub use traits::SubmissionSink;

#[cfg(test)]
pub use traits::MockSubmissionSink;
