//! Rendered form field: widget, rules, value and status

use super::rules::{evaluate, Rule};
use crate::schema::{ChoiceOption, Field, FieldType, WidgetKind};

/// Type-safe field values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Free text for text, email and textarea fields
    Text(String),
    /// Selected option value for select and radio fields
    Choice(Option<String>),
}

impl FieldValue {
    /// Empty value of the right shape for a field type
    pub fn empty_for(field_type: FieldType) -> Self {
        if field_type.spec().requires_options {
            FieldValue::Choice(None)
        } else {
            FieldValue::Text(String::new())
        }
    }

    /// The raw string the rules see
    pub fn as_str(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::Choice(Some(v)) => v,
            FieldValue::Choice(None) => "",
        }
    }
}

/// Per-field validation state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldStatus {
    #[default]
    Untouched,
    Valid,
    Invalid(String),
}

impl FieldStatus {
    fn from_check(result: Result<(), String>) -> Self {
        match result {
            Ok(()) => FieldStatus::Valid,
            Err(message) => FieldStatus::Invalid(message),
        }
    }
}

/// Render descriptor for one schema field plus its live value
#[derive(Debug, Clone)]
pub struct FormField {
    pub field: Field,
    pub widget: WidgetKind,
    pub rules: Vec<Rule>,
    pub value: FieldValue,
    pub status: FieldStatus,
}

impl FormField {
    /// Build an untouched field from its schema entry
    pub fn new(field: &Field) -> Self {
        Self {
            widget: field.spec().widget,
            rules: Rule::derive(field),
            value: FieldValue::empty_for(field.field_type()),
            status: FieldStatus::Untouched,
            field: field.clone(),
        }
    }

    pub fn id(&self) -> &str {
        self.field.id()
    }

    pub fn label(&self) -> &str {
        self.field.label()
    }

    pub fn options(&self) -> &[ChoiceOption] {
        self.field.options()
    }

    pub fn is_multiline(&self) -> bool {
        self.widget.is_multiline()
    }

    pub fn is_choice(&self) -> bool {
        self.widget.is_choice()
    }

    /// Current error text, if the field is invalid
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            FieldStatus::Invalid(message) => Some(message),
            _ => None,
        }
    }

    /// Evaluate the rules against the current value without touching status
    pub fn check(&self) -> Result<(), String> {
        evaluate(&self.rules, self.field.label(), self.value.as_str())
    }

    /// Re-run the rules and record the outcome
    pub fn revalidate(&mut self) {
        self.status = FieldStatus::from_check(self.check());
    }

    /// Replace the value wholesale. Choice fields store any string; values
    /// outside the option list fail the `OneOf` rule.
    pub fn set_value(&mut self, value: &str) {
        self.value = match self.value {
            FieldValue::Text(_) => FieldValue::Text(value.to_string()),
            FieldValue::Choice(_) if value.is_empty() => FieldValue::Choice(None),
            FieldValue::Choice(_) => FieldValue::Choice(Some(value.to_string())),
        };
        self.revalidate();
    }

    /// Push a character to a text value
    pub fn push_char(&mut self, c: char) {
        if let FieldValue::Text(s) = &mut self.value {
            if c == '\n' && !self.widget.is_multiline() {
                return;
            }
            s.push(c);
            self.revalidate();
        }
    }

    /// Remove the last character from a text value
    pub fn pop_char(&mut self) {
        if let FieldValue::Text(s) = &mut self.value {
            s.pop();
            self.revalidate();
        }
    }

    /// Clear the value. A choice field goes back to no selection.
    pub fn clear(&mut self) {
        self.value = FieldValue::empty_for(self.field.field_type());
        self.revalidate();
    }

    /// Index of the selected option, if the value is one of them
    pub fn selected_index(&self) -> Option<usize> {
        match &self.value {
            FieldValue::Choice(Some(v)) => self.options().iter().position(|o| &o.value == v),
            _ => None,
        }
    }

    /// Select the next option, wrapping; starts at the first option
    pub fn next_choice(&mut self) {
        let count = self.options().len();
        if !self.is_choice() || count == 0 {
            return;
        }
        let next = self.selected_index().map_or(0, |i| (i + 1) % count);
        self.select_index(next);
    }

    /// Select the previous option, wrapping; starts at the last option
    pub fn prev_choice(&mut self) {
        let count = self.options().len();
        if !self.is_choice() || count == 0 {
            return;
        }
        let prev = match self.selected_index() {
            Some(0) | None => count - 1,
            Some(i) => i - 1,
        };
        self.select_index(prev);
    }

    fn select_index(&mut self, index: usize) {
        if let Some(option) = self.options().get(index) {
            self.value = FieldValue::Choice(Some(option.value.clone()));
            self.revalidate();
        }
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match &self.value {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Choice(None) => String::new(),
            FieldValue::Choice(Some(v)) => self
                .options()
                .iter()
                .find(|o| &o.value == v)
                .map(|o| o.label.clone())
                .unwrap_or_else(|| v.clone()),
        }
    }
}
