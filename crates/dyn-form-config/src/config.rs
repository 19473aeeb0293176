//! Loading, normalization and validation of form configurations.

use crate::error::ConfigError;
use crate::field_type::FieldType;
use crate::raw::{RawDisplayOptions, RawField, RawOption};
use crate::types::{DisplayOptions, FieldDescriptor, FieldOption, HideRule};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::io::Read;
use tracing::{debug, warn};

/// An ordered, validated list of field descriptors.
///
/// Immutable once loaded. Keys are guaranteed non-empty and unique.
#[derive(Debug, Clone, PartialEq)]
pub struct FormConfig {
    fields: Vec<FieldDescriptor>,
    index: HashMap<String, usize>,
}

impl FormConfig {
    /// Builds a configuration from already-normalized descriptors.
    pub fn new(fields: Vec<FieldDescriptor>) -> Result<Self, ConfigError> {
        let mut index = HashMap::with_capacity(fields.len());
        for (i, field) in fields.iter().enumerate() {
            if field.key.is_empty() {
                return Err(ConfigError::EmptyKey { index: i });
            }
            if let Some(&first) = index.get(&field.key) {
                return Err(ConfigError::DuplicateKey {
                    key: field.key.clone(),
                    first,
                    second: i,
                });
            }
            index.insert(field.key.clone(), i);
        }

        let config = Self { fields, index };
        config.warn_unresolved_references();
        Ok(config)
    }

    /// Parses a configuration from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_reader(reader)?;
        Self::from_value(value)
    }

    /// Normalizes a `{ "fields": [...] }` document.
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        let mut root = match value {
            Value::Object(map) => map,
            _ => return Err(ConfigError::NotAnObject),
        };
        let fields = match root.remove("fields") {
            Some(Value::Array(fields)) => fields,
            Some(_) => return Err(ConfigError::FieldsNotArray),
            None => return Err(ConfigError::MissingFields),
        };

        let descriptors = fields
            .into_iter()
            .enumerate()
            .map(|(index, field)| normalize_field(index, field))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(fields = descriptors.len(), "loaded form configuration");
        Self::new(descriptors)
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, key: &str) -> Option<&FieldDescriptor> {
        self.index.get(key).map(|&i| &self.fields[i])
    }

    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn warn_unresolved_references(&self) {
        for field in &self.fields {
            match &field.hide {
                Some(HideRule::Compiled { source, expr }) => {
                    for key in expr.field_refs() {
                        if !self.contains(key) {
                            warn!(
                                field = %field.key,
                                reference = key,
                                expression = %source,
                                "hideExpression references an undeclared field"
                            );
                        }
                    }
                }
                Some(HideRule::Invalid { source, error }) => {
                    warn!(
                        field = %field.key,
                        expression = %source,
                        %error,
                        "hideExpression does not parse; field will stay visible"
                    );
                }
                None => {}
            }
        }
    }
}

fn normalize_field(index: usize, value: Value) -> Result<FieldDescriptor, ConfigError> {
    let invalid = |e: serde_json::Error| ConfigError::InvalidField {
        index,
        message: e.to_string(),
    };

    let raw = RawField::deserialize(&value).map_err(invalid)?;
    let raw_display = match raw.display_options {
        Some(display) => display,
        // No nested options: the display keys live on the field itself, and
        // `type` there is the widget tag rather than an input kind.
        None => RawDisplayOptions {
            input_kind: None,
            ..RawDisplayOptions::deserialize(&value).map_err(invalid)?
        },
    };

    let field_type = FieldType::from_tag(&raw.field_type);
    if !field_type.is_supported() {
        debug!(field = %raw.key, tag = %raw.field_type, "unsupported field type");
    }

    let options = match raw_display.options {
        Some(options) => options
            .into_iter()
            .map(|o| normalize_option(index, o))
            .collect::<Result<Vec<_>, _>>()?,
        None => {
            if field_type.has_options() {
                warn!(field = %raw.key, "field has no options");
            }
            Vec::new()
        }
    };

    let display = DisplayOptions {
        label: raw_display.label,
        required: raw_display.required.unwrap_or(false),
        placeholder: raw_display.placeholder,
        options,
        input_kind: raw_display.input_kind.unwrap_or_else(|| "text".to_string()),
        summary_section: raw_display.summary_section,
        summary_formatting: raw_display.summary_formatting,
    };

    let hide = raw
        .hide_expression
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(HideRule::compile);

    Ok(FieldDescriptor {
        key: raw.key,
        field_type,
        class_name: raw.class_name,
        display,
        hide,
    })
}

fn normalize_option(index: usize, raw: RawOption) -> Result<FieldOption, ConfigError> {
    let value = match raw.value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => {
            return Err(ConfigError::InvalidField {
                index,
                message: format!("option value must be a string, number or boolean, got {other}"),
            })
        }
    };
    let name = raw.name.or(raw.label).unwrap_or_else(|| value.clone());
    Ok(FieldOption { name, value })
}
