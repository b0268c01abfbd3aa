//! Current schema/diagnostic pair and the form rendered from it

use super::forms::{FormError, FormState, SubmissionResult};
use crate::schema::{Diagnostic, Schema};

/// What happens to the last good preview when an edit does not validate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetentionPolicy {
    /// Keep showing the last valid form, read-only, next to the diagnostic
    #[default]
    Retain,
    /// Drop it and show the placeholder
    Clear,
}

/// Whole-form lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NoSchema,
    DraftInvalidSchema,
    DraftValidSchema,
}

/// Owned container for the validator's latest outcome.
///
/// [`PreviewState::apply`] is the only write path.
#[derive(Debug, Default)]
pub struct PreviewState {
    policy: RetentionPolicy,
    last_revision: Option<u64>,
    schema: Option<Schema>,
    diagnostic: Option<Diagnostic>,
    form: Option<FormState>,
    last_submission: Option<SubmissionResult>,
}

impl PreviewState {
    pub fn new(policy: RetentionPolicy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    /// Record a validation outcome for an editor revision.
    ///
    /// Outcomes for a revision at or below the last applied one are stale
    /// and dropped. Returns whether the outcome was applied.
    pub fn apply(&mut self, revision: u64, outcome: Result<Schema, Diagnostic>) -> bool {
        if self.last_revision.is_some_and(|last| revision <= last) {
            tracing::debug!(revision, last = ?self.last_revision, "Dropping stale validation result");
            return false;
        }
        self.last_revision = Some(revision);

        match outcome {
            Ok(schema) => {
                tracing::debug!(revision, fields = schema.fields().len(), "Schema accepted");
                self.form = Some(FormState::rebuild(&schema, self.form.as_ref()));
                self.schema = Some(schema);
                self.diagnostic = None;
            }
            Err(diagnostic) => {
                tracing::debug!(revision, %diagnostic, "Schema rejected");
                if self.policy == RetentionPolicy::Clear {
                    self.schema = None;
                    self.form = None;
                }
                self.diagnostic = Some(diagnostic);
            }
        }
        true
    }

    pub fn phase(&self) -> Phase {
        if self.diagnostic.is_some() {
            Phase::DraftInvalidSchema
        } else if self.form.is_some() {
            Phase::DraftValidSchema
        } else {
            Phase::NoSchema
        }
    }

    pub fn policy(&self) -> RetentionPolicy {
        self.policy
    }

    pub fn last_revision(&self) -> Option<u64> {
        self.last_revision
    }

    pub fn schema(&self) -> Option<&Schema> {
        self.schema.as_ref()
    }

    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        self.diagnostic.as_ref()
    }

    /// Form to draw: the live one, or the retained one while the editor
    /// text is invalid
    pub fn form(&self) -> Option<&FormState> {
        self.form.as_ref()
    }

    /// True when the drawn form belongs to an older, valid revision
    pub fn is_retained(&self) -> bool {
        self.diagnostic.is_some() && self.form.is_some()
    }

    /// The form accepting input; `None` unless the schema is currently valid
    pub fn editable_form_mut(&mut self) -> Option<&mut FormState> {
        if self.diagnostic.is_some() {
            return None;
        }
        self.form.as_mut()
    }

    pub fn last_submission(&self) -> Option<&SubmissionResult> {
        self.last_submission.as_ref()
    }

    /// Submit the live form. Passing through `Submitted` leaves the phase at
    /// `DraftValidSchema` with all values kept.
    pub fn submit(&mut self) -> Result<SubmissionResult, FormError> {
        let form = self.editable_form_mut().ok_or(FormError::NoValidSchema)?;
        let result = form.submit()?;
        self.last_submission = Some(result.clone());
        Ok(result)
    }
}
