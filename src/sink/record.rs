//! Submission record handed to sinks

use crate::state::SubmissionResult;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A submission stamped with an id and time
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub id: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub form_title: String,
    pub values: SubmissionResult,
}

impl SubmissionRecord {
    pub fn new(form_title: &str, values: SubmissionResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            submitted_at: Utc::now(),
            form_title: form_title.to_string(),
            values,
        }
    }
}
