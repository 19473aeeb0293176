//! Declarative form configuration.
//!
//! A configuration is a JSON document of the form `{ "fields": [...] }`.
//! Loading normalizes every field once: legacy `custom-*` type tags are
//! mapped to [`FieldType`], `templateOptions` and inline display keys are
//! folded into [`DisplayOptions`], option labels fall back from `name` to
//! `label` to `value`, and each `hideExpression` is compiled into a
//! [`HideRule`]. Duplicate or empty keys are rejected.
//!
//! # Example
//!
//! ```
//! use dyn_form_config::{FieldType, FormConfig};
//!
//! let config = FormConfig::from_json_str(r#"{
//!     "fields": [
//!         { "key": "NAME", "type": "custom-input", "templateOptions": { "label": "Name" } },
//!         { "key": "AGE", "type": "text-input", "hideExpression": "formData.NAME !== 'skip'" }
//!     ]
//! }"#).unwrap();
//!
//! assert_eq!(config.len(), 2);
//! assert_eq!(config.fields()[0].field_type, FieldType::TextInput);
//! assert_eq!(config.field("NAME").unwrap().label(), "Name");
//! ```

mod config;
pub mod error;
mod field_type;
mod raw;
pub mod types;

pub use config::FormConfig;
pub use error::ConfigError;
pub use field_type::FieldType;
pub use types::{DisplayOptions, FieldDescriptor, FieldOption, HideRule, SummaryFormatting};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_inline_display_fallback() {
        let config = FormConfig::from_value(json!({
            "fields": [{
                "key": "GENDER",
                "type": "custom-radio",
                "label": "Gender",
                "required": true,
                "options": [{ "label": "Male", "value": "MALE" }]
            }]
        }))
        .unwrap();
        let field = &config.fields()[0];
        assert_eq!(field.display.label.as_deref(), Some("Gender"));
        assert!(field.display.required);
        assert_eq!(field.display.input_kind, "text");
        assert_eq!(field.display.options, vec![FieldOption::new("Male", "MALE")]);
    }

    #[test]
    fn test_blank_hide_expression_is_ignored() {
        let config = FormConfig::from_value(json!({
            "fields": [{ "key": "A", "type": "checkbox", "hideExpression": "  " }]
        }))
        .unwrap();
        assert!(config.fields()[0].hide.is_none());
    }

    #[test]
    fn test_builder_descriptors() {
        let config = FormConfig::new(vec![
            FieldDescriptor::new("A", FieldType::Checkbox).with_label("Agree"),
            FieldDescriptor::new("B", FieldType::TextInput).with_hide_expression("!formData.A"),
        ])
        .unwrap();
        assert_eq!(config.index_of("B"), Some(1));
        assert!(matches!(config.fields()[1].hide, Some(HideRule::Compiled { .. })));
        assert_eq!(config.keys().collect::<Vec<_>>(), vec!["A", "B"]);
    }
}
