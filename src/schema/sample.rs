//! Starter schema loaded into the editor

pub const SAMPLE_SCHEMA: &str = r#"{
  "formTitle": "Contact us",
  "formDescription": "Tell us how to reach you.",
  "fields": [
    {
      "id": "name",
      "type": "text",
      "label": "Full name",
      "required": true,
      "placeholder": "Ada Lovelace"
    },
    {
      "id": "email",
      "type": "email",
      "label": "Email",
      "required": true,
      "placeholder": "ada@example.com"
    },
    {
      "id": "phone",
      "type": "text",
      "label": "Phone",
      "validation": {
        "pattern": "^\\+?[0-9 ]{7,15}$",
        "message": "Digits and spaces only, 7 to 15 characters"
      }
    },
    {
      "id": "topic",
      "type": "select",
      "label": "Topic",
      "required": true,
      "options": [
        { "value": "sales", "label": "Sales" },
        { "value": "support", "label": "Support" },
        { "value": "other", "label": "Something else" }
      ]
    },
    {
      "id": "reply",
      "type": "radio",
      "label": "Preferred reply",
      "options": [
        { "value": "email", "label": "By email" },
        { "value": "phone", "label": "By phone" }
      ]
    },
    {
      "id": "message",
      "type": "textarea",
      "label": "Message",
      "required": true
    }
  ]
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::validate;

    #[test]
    fn test_sample_schema_is_valid() {
        let schema = validate(SAMPLE_SCHEMA).unwrap();
        assert_eq!(schema.title(), "Contact us");
        assert_eq!(schema.fields().len(), 6);
    }
}
