//! Schema domain layer
//!
//! Raw editor text goes in through [`validate`]; a [`Schema`] or a
//! [`Diagnostic`] comes out. A `Schema` cannot be built any other way.

mod diagnostic;
mod model;
mod sample;
mod validator;

pub use diagnostic::Diagnostic;
pub use model::{
    ChoiceOption, Field, FieldType, FieldTypeSpec, FieldValidation, Pattern, Schema, WidgetKind,
};
pub use sample::SAMPLE_SCHEMA;
pub use validator::validate;
