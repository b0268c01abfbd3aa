//! Form state built from a schema

use super::error::{FieldError, FormError};
use super::field::{FieldStatus, FormField};
use super::submission::SubmissionResult;
use crate::schema::Schema;

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
}

/// The rendered form for one schema.
///
/// Rows are the schema fields in order followed by the submit button.
#[derive(Debug, Clone)]
pub struct FormState {
    pub title: String,
    pub description: String,
    pub fields: Vec<FormField>,
    pub active_field_index: usize,
}

impl FormState {
    /// Fresh form with every field untouched
    pub fn from_schema(schema: &Schema) -> Self {
        Self {
            title: schema.title().to_string(),
            description: schema.description().to_string(),
            fields: schema.fields().iter().map(FormField::new).collect(),
            active_field_index: 0,
        }
    }

    /// Build the form for a replacement schema, keeping entered values for
    /// fields whose id and type did not change
    pub fn rebuild(schema: &Schema, previous: Option<&FormState>) -> Self {
        let mut form = Self::from_schema(schema);
        let Some(previous) = previous else {
            return form;
        };

        for field in &mut form.fields {
            let Some(old) = previous.field(field.id()) else {
                continue;
            };
            if old.field.field_type() != field.field.field_type() {
                continue;
            }
            field.value = old.value.clone();
            if old.status != FieldStatus::Untouched {
                field.revalidate();
            }
        }
        form.set_active_field(previous.active_field_index);
        form
    }

    pub fn field(&self, id: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.id() == id)
    }

    pub fn field_mut(&mut self, id: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.id() == id)
    }

    /// Set a field's value by id. Unknown ids are rejected.
    pub fn set_value(&mut self, id: &str, value: &str) -> Result<(), FormError> {
        let field = self
            .field_mut(id)
            .ok_or_else(|| FormError::UnknownField(id.to_string()))?;
        field.set_value(value);
        Ok(())
    }

    /// Returns true if the submit button row is currently active
    pub fn is_submit_row_active(&self) -> bool {
        self.active_field_index == self.fields.len()
    }

    pub fn active_form_field(&self) -> Option<&FormField> {
        self.fields.get(self.active_field_index)
    }

    pub fn active_form_field_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.active_field_index)
    }

    /// Whether every field currently satisfies its rules
    pub fn is_submittable(&self) -> bool {
        self.fields.iter().all(|f| f.check().is_ok())
    }

    /// Number of fields showing an error right now
    pub fn invalid_count(&self) -> usize {
        self.fields.iter().filter(|f| f.error().is_some()).count()
    }

    /// Validate every field, untouched ones included, and produce the
    /// submission if all pass. On failure each failing field is marked
    /// invalid and the first one becomes active.
    pub fn submit(&mut self) -> Result<SubmissionResult, FormError> {
        let mut errors = Vec::new();
        for field in &mut self.fields {
            field.revalidate();
            if let Some(message) = field.error() {
                errors.push(FieldError {
                    field_id: field.id().to_string(),
                    message: message.to_string(),
                });
            }
        }

        if let Some(first) = errors.first() {
            if let Some(index) = self.fields.iter().position(|f| f.id() == first.field_id) {
                self.active_field_index = index;
            }
            return Err(FormError::Invalid(errors));
        }

        Ok(SubmissionResult::new(
            self.fields
                .iter()
                .map(|f| (f.id().to_string(), f.value.as_str().to_string()))
                .collect(),
        ))
    }
}

impl Form for FormState {
    fn field_count(&self) -> usize {
        self.fields.len() + 1 // fields, submit button
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.fields.len());
    }
}
