//! Raw text to [`Schema`] conversion

use super::{ChoiceOption, Diagnostic, Field, FieldType, FieldValidation, Pattern, Schema};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSchema {
    form_title: String,
    #[serde(default)]
    form_description: String,
    fields: Vec<Value>,
}

#[derive(Deserialize)]
struct RawField {
    id: String,
    #[serde(rename = "type")]
    field_type: String,
    label: String,
    #[serde(default)]
    required: bool,
    placeholder: Option<String>,
    options: Option<Vec<ChoiceOption>>,
    validation: Option<RawValidation>,
}

#[derive(Deserialize)]
struct RawValidation {
    pattern: String,
    message: Option<String>,
}

/// Parse and check editor text.
///
/// Structural failures produce [`Diagnostic::Syntax`]. Text that parses but
/// breaks a field or schema invariant produces the matching semantic
/// diagnostic. The first violation in field order wins.
pub fn validate(raw_text: &str) -> Result<Schema, Diagnostic> {
    let tree: Value = serde_json::from_str(raw_text).map_err(|e| Diagnostic::Syntax {
        line: e.line(),
        column: e.column(),
    })?;

    let raw: RawSchema =
        serde_json::from_value(tree).map_err(|e| Diagnostic::Malformed(e.to_string()))?;

    let mut seen_ids = HashSet::new();
    let mut fields = Vec::with_capacity(raw.fields.len());
    for (index, value) in raw.fields.into_iter().enumerate() {
        let position = index + 1;
        let raw_field: RawField = serde_json::from_value(value)
            .map_err(|e| Diagnostic::Malformed(format!("field #{position}: {e}")))?;
        fields.push(check_field(position, raw_field, &mut seen_ids)?);
    }

    Ok(Schema::new(raw.form_title, raw.form_description, fields))
}

fn check_field(
    position: usize,
    raw: RawField,
    seen_ids: &mut HashSet<String>,
) -> Result<Field, Diagnostic> {
    if raw.id.trim().is_empty() {
        return Err(Diagnostic::EmptyFieldId { position });
    }

    let field_type =
        FieldType::from_name(&raw.field_type).ok_or_else(|| Diagnostic::UnknownFieldType {
            field_id: raw.id.clone(),
            type_name: raw.field_type.clone(),
        })?;

    if !seen_ids.insert(raw.id.clone()) {
        return Err(Diagnostic::DuplicateFieldId(raw.id));
    }

    let spec = field_type.spec();
    let options = raw.options.unwrap_or_default();
    if spec.requires_options {
        if options.is_empty() {
            return Err(Diagnostic::MissingOptions {
                field_id: raw.id,
                field_type,
            });
        }
        let mut seen_values = HashSet::new();
        for option in &options {
            if !seen_values.insert(option.value.as_str()) {
                return Err(Diagnostic::DuplicateOptionValue {
                    field_id: raw.id.clone(),
                    value: option.value.clone(),
                });
            }
        }
    } else if !options.is_empty() {
        return Err(Diagnostic::UnexpectedOptions {
            field_id: raw.id,
            field_type,
        });
    }

    let validation = match raw.validation {
        None => None,
        Some(_) if !spec.text_like => {
            return Err(Diagnostic::ValidationNotApplicable {
                field_id: raw.id,
                field_type,
            });
        }
        Some(v) => {
            let pattern = Pattern::new(&v.pattern).map_err(|e| Diagnostic::InvalidPattern {
                field_id: raw.id.clone(),
                reason: e.to_string(),
            })?;
            Some(FieldValidation {
                pattern,
                message: v.message,
            })
        }
    };

    Ok(Field::new(
        raw.id,
        field_type,
        raw.label,
        raw.required,
        raw.placeholder,
        options,
        validation,
    ))
}
