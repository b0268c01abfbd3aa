//! Registry rules derived from schema fields

use crate::schema::{Field, Pattern};
use regex::Regex;
use std::sync::OnceLock;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"))
}

/// A named predicate on a field's current value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Value must be non-empty
    Required,
    /// Value must look like an email address
    Email,
    /// Value must match the schema's pattern
    Pattern {
        pattern: Pattern,
        message: Option<String>,
    },
    /// Value must be one of the listed option values
    OneOf(Vec<String>),
}

impl Rule {
    /// Derive the rule set for a field, in evaluation order
    pub fn derive(field: &Field) -> Vec<Rule> {
        let spec = field.spec();
        let mut rules = Vec::new();

        if field.required() {
            rules.push(Rule::Required);
        }
        if spec.email_format {
            rules.push(Rule::Email);
        }
        if let Some(validation) = field.validation() {
            rules.push(Rule::Pattern {
                pattern: validation.pattern.clone(),
                message: validation.message.clone(),
            });
        }
        if spec.requires_options {
            rules.push(Rule::OneOf(
                field.options().iter().map(|o| o.value.clone()).collect(),
            ));
        }

        rules
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Email => "email",
            Self::Pattern { .. } => "pattern",
            Self::OneOf(_) => "one_of",
        }
    }

    /// Check a value, returning the error text on failure
    pub fn check(&self, label: &str, value: &str) -> Result<(), String> {
        let ok = match self {
            Self::Required => !value.trim().is_empty(),
            Self::Email => email_regex().is_match(value),
            Self::Pattern { pattern, .. } => pattern.is_match(value),
            Self::OneOf(values) => values.iter().any(|v| v == value),
        };
        if ok {
            return Ok(());
        }

        Err(match self {
            Self::Required => format!("{label} is required"),
            Self::Email => "Enter a valid email address".to_string(),
            Self::Pattern { message, .. } => message
                .clone()
                .unwrap_or_else(|| format!("{label} has an invalid format")),
            Self::OneOf(_) => "Invalid selection".to_string(),
        })
    }
}

/// Run rules in order and return the first failure.
///
/// An empty value only answers to [`Rule::Required`]; an optional field left
/// blank is valid.
pub fn evaluate(rules: &[Rule], label: &str, value: &str) -> Result<(), String> {
    let empty = value.is_empty();
    rules
        .iter()
        .filter(|rule| !empty || matches!(rule, Rule::Required))
        .try_for_each(|rule| rule.check(label, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::validate;

    fn field(json: &str) -> Field {
        let text = format!(r#"{{"formTitle":"T","fields":[{json}]}}"#);
        validate(&text).unwrap().fields()[0].clone()
    }

    mod derive {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_plain_text_has_no_rules() {
            let f = field(r#"{"id":"a","type":"text","label":"A"}"#);
            assert!(Rule::derive(&f).is_empty());
        }

        #[test]
        fn test_required_email_gets_both_rules() {
            let f = field(r#"{"id":"e","type":"email","label":"E","required":true}"#);
            let names: Vec<_> = Rule::derive(&f).iter().map(Rule::name).collect();
            assert_eq!(names, vec!["required", "email"]);
        }

        #[test]
        fn test_email_with_pattern_keeps_builtin_check() {
            let f = field(
                r#"{"id":"e","type":"email","label":"E","validation":{"pattern":"@corp\\.com$"}}"#,
            );
            let names: Vec<_> = Rule::derive(&f).iter().map(Rule::name).collect();
            assert_eq!(names, vec!["email", "pattern"]);
        }

        #[test]
        fn test_choice_field_gets_one_of() {
            let f = field(
                r#"{"id":"r","type":"radio","label":"R","options":[{"value":"x","label":"X"},{"value":"y","label":"Y"}]}"#,
            );
            assert_eq!(
                Rule::derive(&f),
                vec![Rule::OneOf(vec!["x".to_string(), "y".to_string()])]
            );
        }
    }

    mod check {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_required_rejects_blank() {
            assert_eq!(
                Rule::Required.check("Name", "   "),
                Err("Name is required".to_string())
            );
            assert!(Rule::Required.check("Name", "x").is_ok());
        }

        #[test]
        fn test_email_format() {
            assert!(Rule::Email.check("E", "a@b.com").is_ok());
            assert!(Rule::Email.check("E", "a@b").is_err());
            assert!(Rule::Email.check("E", "not an email").is_err());
            assert!(Rule::Email.check("E", "a b@c.com").is_err());
        }

        #[test]
        fn test_pattern_uses_custom_message() {
            let rule = Rule::Pattern {
                pattern: Pattern::new("^[0-9]+$").unwrap(),
                message: Some("Digits only".to_string()),
            };
            assert_eq!(rule.check("Zip", "12a"), Err("Digits only".to_string()));
            assert!(rule.check("Zip", "123").is_ok());
        }

        #[test]
        fn test_pattern_falls_back_to_generic_message() {
            let rule = Rule::Pattern {
                pattern: Pattern::new("^[0-9]+$").unwrap(),
                message: None,
            };
            assert_eq!(
                rule.check("Zip", "abc"),
                Err("Zip has an invalid format".to_string())
            );
        }

        #[test]
        fn test_one_of_rejects_unlisted_value() {
            let rule = Rule::OneOf(vec!["x".to_string(), "y".to_string()]);
            assert!(rule.check("R", "x").is_ok());
            assert_eq!(rule.check("R", "z"), Err("Invalid selection".to_string()));
        }
    }

    mod evaluate {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_empty_optional_value_skips_format_rules() {
            let rules = vec![Rule::Email];
            assert!(evaluate(&rules, "E", "").is_ok());
        }

        #[test]
        fn test_empty_required_value_fails_required_first() {
            let rules = vec![Rule::Required, Rule::Email];
            assert_eq!(evaluate(&rules, "E", ""), Err("E is required".to_string()));
        }

        #[test]
        fn test_first_failing_rule_wins() {
            let rules = vec![
                Rule::Email,
                Rule::Pattern {
                    pattern: Pattern::new("@corp\\.com$").unwrap(),
                    message: Some("Corporate only".to_string()),
                },
            ];
            assert_eq!(
                evaluate(&rules, "E", "nope"),
                Err("Enter a valid email address".to_string())
            );
            assert_eq!(
                evaluate(&rules, "E", "a@home.org"),
                Err("Corporate only".to_string())
            );
            assert!(evaluate(&rules, "E", "a@corp.com").is_ok());
        }
    }
}
