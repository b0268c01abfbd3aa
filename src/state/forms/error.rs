//! Form-level errors

/// A rule failure attributed to one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field_id: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("{} field(s) failed validation", .0.len())]
    Invalid(Vec<FieldError>),

    #[error("no valid schema to submit")]
    NoValidSchema,
}
