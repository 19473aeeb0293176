use thiserror::Error;

/// Rejected input change. The value map is left untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Field \"{key}\" expects a {expected} value, got {found}")]
    ShapeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Field \"{key}\" has no option with value \"{value}\"")]
    UnknownOption { key: String, value: String },

    #[error("Field \"{key}\": {message}")]
    InvalidValue { key: String, message: String },

    #[error("Field \"{key}\" has unsupported type \"{tag}\"")]
    UnsupportedField { key: String, tag: String },
}

/// Rejected submission. The value map is left untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmitError {
    #[error("Required fields are empty: {}", .0.join(", "))]
    MissingRequired(Vec<String>),
}
