//! Typed form description

use fancy_regex::Regex;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Closed set of field types a schema may use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Email,
    Select,
    Radio,
    Textarea,
}

/// Widget the preview uses for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    TextInput,
    EmailInput,
    Dropdown,
    RadioGroup,
    TextArea,
}

impl WidgetKind {
    /// Whether the widget picks from a fixed list instead of accepting free text
    pub fn is_choice(self) -> bool {
        matches!(self, Self::Dropdown | Self::RadioGroup)
    }

    /// Whether the widget accepts line breaks
    pub fn is_multiline(self) -> bool {
        matches!(self, Self::TextArea)
    }
}

/// Rendering and rule-derivation facts for one field type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldTypeSpec {
    pub widget: WidgetKind,
    /// Accepts free text, so `validation.pattern` applies
    pub text_like: bool,
    /// Needs a non-empty `options` list
    pub requires_options: bool,
    /// Gets the built-in email format rule
    pub email_format: bool,
}

impl FieldType {
    pub const ALL: [FieldType; 5] = [
        FieldType::Text,
        FieldType::Email,
        FieldType::Select,
        FieldType::Radio,
        FieldType::Textarea,
    ];

    /// Parse the wire name of a field type
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Select => "select",
            Self::Radio => "radio",
            Self::Textarea => "textarea",
        }
    }

    /// The single lookup table from type to widget and rule facts.
    /// Adding a type means adding one arm here.
    pub fn spec(self) -> FieldTypeSpec {
        match self {
            Self::Text => FieldTypeSpec {
                widget: WidgetKind::TextInput,
                text_like: true,
                requires_options: false,
                email_format: false,
            },
            Self::Email => FieldTypeSpec {
                widget: WidgetKind::EmailInput,
                text_like: true,
                requires_options: false,
                email_format: true,
            },
            Self::Select => FieldTypeSpec {
                widget: WidgetKind::Dropdown,
                text_like: false,
                requires_options: true,
                email_format: false,
            },
            Self::Radio => FieldTypeSpec {
                widget: WidgetKind::RadioGroup,
                text_like: false,
                requires_options: true,
                email_format: false,
            },
            Self::Textarea => FieldTypeSpec {
                widget: WidgetKind::TextArea,
                text_like: true,
                requires_options: false,
                email_format: false,
            },
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One selectable entry of a select or radio field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
}

/// Compiled regular expression that compares and serializes by its source.
///
/// Backed by `fancy_regex` so lookaround and backreferences in schema
/// patterns compile.
#[derive(Debug, Clone)]
pub struct Pattern(Regex);

impl Pattern {
    pub fn new(source: &str) -> Result<Self, fancy_regex::Error> {
        Regex::new(source).map(Self)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// A match that gives up (backtrack limit) counts as no match
    pub fn is_match(&self, value: &str) -> bool {
        self.0.is_match(value).unwrap_or_else(|e| {
            tracing::warn!(pattern = self.as_str(), "Pattern match aborted: {e}");
            false
        })
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Pattern {}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Explicit pattern rule attached to a text-like field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldValidation {
    pub pattern: Pattern,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// One input specification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    id: String,
    #[serde(rename = "type")]
    field_type: FieldType,
    label: String,
    required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    placeholder: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    options: Vec<ChoiceOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    validation: Option<FieldValidation>,
}

impl Field {
    pub(super) fn new(
        id: String,
        field_type: FieldType,
        label: String,
        required: bool,
        placeholder: Option<String>,
        options: Vec<ChoiceOption>,
        validation: Option<FieldValidation>,
    ) -> Self {
        Self {
            id,
            field_type,
            label,
            required,
            placeholder,
            options,
            validation,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn required(&self) -> bool {
        self.required
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    /// Choices in render order; empty for free-text fields
    pub fn options(&self) -> &[ChoiceOption] {
        &self.options
    }

    pub fn validation(&self) -> Option<&FieldValidation> {
        self.validation.as_ref()
    }

    pub fn spec(&self) -> FieldTypeSpec {
        self.field_type.spec()
    }
}

/// A validated form description. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    form_title: String,
    form_description: String,
    fields: Vec<Field>,
}

impl Schema {
    pub(super) fn new(form_title: String, form_description: String, fields: Vec<Field>) -> Self {
        Self {
            form_title,
            form_description,
            fields,
        }
    }

    pub fn title(&self) -> &str {
        &self.form_title
    }

    pub fn description(&self) -> &str {
        &self.form_description
    }

    /// Fields in render order
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, id: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Serialize back to the schema text format
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
