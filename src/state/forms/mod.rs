//! Form domain layer
//!
//! Turns a validated schema into renderable fields with registry rules,
//! tracks per-field status and produces the submission payload.

mod error;
mod field;
mod form_state;
mod rules;
mod submission;

pub use error::{FieldError, FormError};
pub use field::{FieldStatus, FieldValue, FormField};
pub use form_state::{Form, FormState};
pub use rules::Rule;
pub use submission::SubmissionResult;
