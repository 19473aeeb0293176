//! Form values and the value map.

use crate::error::InputError;
use chrono::NaiveDate;
use dyn_form_config::{FieldDescriptor, FieldType};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Wire format of date values.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Metadata of a file chosen through a file-upload field. The content is
/// never read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHandle {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl FileHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: None,
            mime_type: None,
        }
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn is_image(&self) -> bool {
        self.mime_type
            .as_deref()
            .is_some_and(|m| m.starts_with("image/"))
    }
}

/// The value of a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum FormValue {
    Text(String),
    Bool(bool),
    /// The stored `value` of a select or radio option.
    Choice(String),
    Date(NaiveDate),
    File(FileHandle),
}

impl FormValue {
    pub fn kind(&self) -> &'static str {
        match self {
            FormValue::Text(_) => "text",
            FormValue::Bool(_) => "boolean",
            FormValue::Choice(_) => "choice",
            FormValue::Date(_) => "date",
            FormValue::File(_) => "file",
        }
    }

    /// JSON form used both for expression scopes and submitted records.
    pub fn to_json(&self) -> Value {
        match self {
            FormValue::Text(s) | FormValue::Choice(s) => Value::String(s.clone()),
            FormValue::Bool(b) => Value::Bool(*b),
            FormValue::Date(d) => Value::String(d.format(DATE_FORMAT).to_string()),
            FormValue::File(f) => serde_json::to_value(f).unwrap_or(Value::Null),
        }
    }

    /// True when a required-field check should treat the value as absent.
    pub fn is_blank(&self) -> bool {
        match self {
            FormValue::Text(s) | FormValue::Choice(s) => s.is_empty(),
            FormValue::File(f) => f.name.is_empty(),
            FormValue::Bool(_) | FormValue::Date(_) => false,
        }
    }

    /// Checks `self` against the shape `field` expects and returns the
    /// canonical stored form. Plain text is accepted for choice fields since
    /// most toolkits report selections as strings.
    pub fn coerce_for(self, field: &FieldDescriptor) -> Result<FormValue, InputError> {
        let expected = expected_kind(field)?;
        let value = match (&field.field_type, self) {
            (FieldType::TextInput | FieldType::TextArea, v @ FormValue::Text(_)) => v,
            (FieldType::Checkbox, v @ FormValue::Bool(_)) => v,
            (FieldType::DatePicker, v @ FormValue::Date(_)) => v,
            (FieldType::FileUpload, v @ FormValue::File(_)) => v,
            (FieldType::Select | FieldType::RadioGroup, FormValue::Choice(s) | FormValue::Text(s)) => {
                if !field.display.has_option(&s) {
                    return Err(InputError::UnknownOption {
                        key: field.key.clone(),
                        value: s,
                    });
                }
                FormValue::Choice(s)
            }
            (_, other) => {
                return Err(InputError::ShapeMismatch {
                    key: field.key.clone(),
                    expected,
                    found: other.kind(),
                })
            }
        };
        Ok(value)
    }

    /// Parses a textual value (e.g. from a command line) for `field`.
    pub fn parse_for(field: &FieldDescriptor, raw: &str) -> Result<FormValue, InputError> {
        let invalid = |message: String| InputError::InvalidValue {
            key: field.key.clone(),
            message,
        };
        let value = match &field.field_type {
            FieldType::TextInput | FieldType::TextArea => FormValue::Text(raw.to_string()),
            FieldType::Select | FieldType::RadioGroup => FormValue::Choice(raw.to_string()),
            FieldType::Checkbox => match raw {
                "true" | "yes" | "on" | "1" => FormValue::Bool(true),
                "false" | "no" | "off" | "0" => FormValue::Bool(false),
                _ => return Err(invalid(format!("\"{raw}\" is not a boolean"))),
            },
            FieldType::DatePicker => NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .map(FormValue::Date)
                .map_err(|e| invalid(format!("\"{raw}\" is not a YYYY-MM-DD date: {e}")))?,
            FieldType::FileUpload => FormValue::File(FileHandle::new(raw)),
            FieldType::Unsupported(tag) => {
                return Err(InputError::UnsupportedField {
                    key: field.key.clone(),
                    tag: tag.clone(),
                })
            }
        };
        value.coerce_for(field)
    }

    /// Reads a value back from its JSON form, directed by the field type.
    pub fn from_json_for(field: &FieldDescriptor, json: &Value) -> Result<FormValue, InputError> {
        let mismatch = |found: &'static str| -> Result<FormValue, InputError> {
            Err(InputError::ShapeMismatch {
                key: field.key.clone(),
                expected: expected_kind(field)?,
                found,
            })
        };
        let value = match (&field.field_type, json) {
            (FieldType::TextInput | FieldType::TextArea, Value::String(s)) => FormValue::Text(s.clone()),
            (FieldType::Select | FieldType::RadioGroup, Value::String(s)) => FormValue::Choice(s.clone()),
            (FieldType::Checkbox, Value::Bool(b)) => FormValue::Bool(*b),
            (FieldType::DatePicker, Value::String(s)) => return FormValue::parse_for(field, s),
            (FieldType::FileUpload, Value::Object(_)) => {
                let handle = FileHandle::deserialize(json).map_err(|e| InputError::InvalidValue {
                    key: field.key.clone(),
                    message: e.to_string(),
                })?;
                FormValue::File(handle)
            }
            (_, other) => return mismatch(json_kind(other)),
        };
        value.coerce_for(field)
    }
}

pub(crate) fn expected_kind(field: &FieldDescriptor) -> Result<&'static str, InputError> {
    match &field.field_type {
        FieldType::TextInput | FieldType::TextArea => Ok("text"),
        FieldType::Select | FieldType::RadioGroup => Ok("choice"),
        FieldType::Checkbox => Ok("boolean"),
        FieldType::DatePicker => Ok("date"),
        FieldType::FileUpload => Ok("file"),
        FieldType::Unsupported(tag) => Err(InputError::UnsupportedField {
            key: field.key.clone(),
            tag: tag.clone(),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Insertion-ordered map from field key to value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormValues {
    entries: IndexMap<String, FormValue>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&FormValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Sets a value. Re-setting an existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: FormValue) -> Option<FormValue> {
        self.entries.insert(key.into(), value)
    }

    pub fn remove(&mut self, key: &str) -> Option<FormValue> {
        self.entries.shift_remove(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FormValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Plain `{ key: value }` record.
    pub fn to_json(&self) -> Map<String, Value> {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect()
    }
}

impl<K: Into<String>> FromIterator<(K, FormValue)> for FormValues {
    fn from_iter<T: IntoIterator<Item = (K, FormValue)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dyn_form_config::FieldOption;
    use serde_json::json;

    fn gender() -> FieldDescriptor {
        FieldDescriptor::new("GENDER", FieldType::RadioGroup).with_options(vec![
            FieldOption::new("Male", "MALE"),
            FieldOption::new("Female", "FEMALE"),
        ])
    }

    #[test]
    fn text_is_accepted_as_choice() {
        let v = FormValue::Text("MALE".into()).coerce_for(&gender()).unwrap();
        assert_eq!(v, FormValue::Choice("MALE".into()));
    }

    #[test]
    fn unknown_option_is_rejected() {
        let err = FormValue::Choice("OTHER".into()).coerce_for(&gender()).unwrap_err();
        assert_eq!(
            err,
            InputError::UnknownOption {
                key: "GENDER".into(),
                value: "OTHER".into()
            }
        );
    }

    #[test]
    fn shape_mismatch() {
        let field = FieldDescriptor::new("AGREE", FieldType::Checkbox);
        let err = FormValue::Text("yes".into()).coerce_for(&field).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Field \"AGREE\" expects a boolean value, got text"
        );
    }

    #[test]
    fn file_json_shape() {
        let file = FormValue::File(
            FileHandle::new("id.png")
                .with_size(2048)
                .with_mime_type("image/png"),
        );
        assert_eq!(
            file.to_json(),
            json!({"name": "id.png", "size": 2048, "type": "image/png"})
        );
        let field = FieldDescriptor::new("DOC", FieldType::FileUpload);
        assert_eq!(FormValue::from_json_for(&field, &file.to_json()).unwrap(), file);
    }

    #[test]
    fn parse_dates_and_booleans() {
        let dob = FieldDescriptor::new("DOB", FieldType::DatePicker);
        assert_eq!(
            FormValue::parse_for(&dob, "1990-04-29").unwrap(),
            FormValue::Date(NaiveDate::from_ymd_opt(1990, 4, 29).unwrap())
        );
        assert!(matches!(
            FormValue::parse_for(&dob, "29/04/1990"),
            Err(InputError::InvalidValue { .. })
        ));
        let agree = FieldDescriptor::new("AGREE", FieldType::Checkbox);
        assert_eq!(FormValue::parse_for(&agree, "on").unwrap(), FormValue::Bool(true));
    }

    #[test]
    fn reinsert_keeps_position() {
        let mut values = FormValues::new();
        values.insert("A", FormValue::Text("1".into()));
        values.insert("B", FormValue::Text("2".into()));
        values.insert("A", FormValue::Text("3".into()));
        assert_eq!(values.keys().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(values.to_json(), json!({"A": "3", "B": "2"}).as_object().cloned().unwrap());
    }
}
