//! Normalized configuration model.

use crate::field_type::FieldType;
use form_expression::{Expr, ParseError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One choice of a select or radio group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    /// Display label.
    pub name: String,
    /// Stored value.
    pub value: String,
}

impl FieldOption {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// How a summary presenter should format a field's value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryFormatting {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_label: Option<String>,
    /// Keys this crate does not interpret, carried through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Presentation and validation options of a field.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayOptions {
    pub label: Option<String>,
    pub required: bool,
    pub placeholder: Option<String>,
    /// Choices in configuration order.
    pub options: Vec<FieldOption>,
    /// HTML-style input kind for text inputs (`text`, `email`, `tel`, ...).
    pub input_kind: String,
    pub summary_section: Option<String>,
    pub summary_formatting: Option<SummaryFormatting>,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            label: None,
            required: false,
            placeholder: None,
            options: Vec::new(),
            input_kind: "text".to_string(),
            summary_section: None,
            summary_formatting: None,
        }
    }
}

impl DisplayOptions {
    /// Display name of the option whose stored value is `value`.
    pub fn option_name(&self, value: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.name.as_str())
    }

    pub fn has_option(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value == value)
    }
}

/// A compiled `hideExpression`.
#[derive(Debug, Clone, PartialEq)]
pub enum HideRule {
    Compiled { source: String, expr: Expr },
    /// The expression did not parse. The field is treated as visible.
    Invalid { source: String, error: ParseError },
}

impl HideRule {
    pub fn compile(source: &str) -> Self {
        match form_expression::ExprParser::parse(source) {
            Ok(expr) => HideRule::Compiled {
                source: source.to_string(),
                expr,
            },
            Err(error) => HideRule::Invalid {
                source: source.to_string(),
                error,
            },
        }
    }

    pub fn source(&self) -> &str {
        match self {
            HideRule::Compiled { source, .. } | HideRule::Invalid { source, .. } => source,
        }
    }
}

/// One field of a form.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub key: String,
    pub field_type: FieldType,
    pub class_name: Option<String>,
    pub display: DisplayOptions,
    pub hide: Option<HideRule>,
}

impl FieldDescriptor {
    pub fn new(key: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            key: key.into(),
            field_type,
            class_name: None,
            display: DisplayOptions::default(),
            hide: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.display.label = Some(label.into());
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.display.required = required;
        self
    }

    pub fn with_options(mut self, options: Vec<FieldOption>) -> Self {
        self.display.options = options;
        self
    }

    pub fn with_hide_expression(mut self, source: &str) -> Self {
        self.hide = Some(HideRule::compile(source));
        self
    }

    /// Label, falling back to the key.
    pub fn label(&self) -> &str {
        self.display.label.as_deref().unwrap_or(&self.key)
    }
}
