//! Schema validation failures

use super::FieldType;

/// Why a piece of editor text was not accepted as a schema.
///
/// `Syntax` is the structural failure; every other variant is a semantic
/// violation of the field or schema invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Diagnostic {
    #[error("invalid syntax at line {line}, column {column}")]
    Syntax { line: usize, column: usize },

    #[error("malformed schema: {0}")]
    Malformed(String),

    #[error("field #{position} has an empty id")]
    EmptyFieldId { position: usize },

    #[error("field '{field_id}' has unknown type '{type_name}' (expected text, email, select, radio or textarea)")]
    UnknownFieldType { field_id: String, type_name: String },

    #[error("duplicate field id '{0}'")]
    DuplicateFieldId(String),

    #[error("field '{field_id}' of type {field_type} needs a non-empty options list")]
    MissingOptions {
        field_id: String,
        field_type: FieldType,
    },

    #[error("field '{field_id}' of type {field_type} does not take options")]
    UnexpectedOptions {
        field_id: String,
        field_type: FieldType,
    },

    #[error("field '{field_id}' lists option value '{value}' more than once")]
    DuplicateOptionValue { field_id: String, value: String },

    #[error("field '{field_id}' of type {field_type} does not support pattern validation")]
    ValidationNotApplicable {
        field_id: String,
        field_type: FieldType,
    },

    #[error("field '{field_id}' has an invalid pattern: {reason}")]
    InvalidPattern { field_id: String, reason: String },
}

impl Diagnostic {
    /// Human-readable text shown under the editor
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, Self::Syntax { .. })
    }

    /// The field the diagnostic is attributed to, if any
    pub fn field_id(&self) -> Option<&str> {
        match self {
            Self::Syntax { .. } | Self::Malformed(_) | Self::EmptyFieldId { .. } => None,
            Self::UnknownFieldType { field_id, .. }
            | Self::MissingOptions { field_id, .. }
            | Self::UnexpectedOptions { field_id, .. }
            | Self::DuplicateOptionValue { field_id, .. }
            | Self::ValidationNotApplicable { field_id, .. }
            | Self::InvalidPattern { field_id, .. } => Some(field_id),
            Self::DuplicateFieldId(id) => Some(id),
        }
    }
}
