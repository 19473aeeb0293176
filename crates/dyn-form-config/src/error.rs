use thiserror::Error;

/// Errors raised while loading a form configuration.
///
/// All variants are recoverable: the caller reports them and keeps whatever
/// configuration it was rendering before.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The input is not valid JSON.
    #[error("Invalid JSON at line {line}, column {column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Configuration must be a JSON object")]
    NotAnObject,

    #[error("Configuration is missing the \"fields\" array")]
    MissingFields,

    #[error("\"fields\" must be an array")]
    FieldsNotArray,

    #[error("Field #{index}: {message}")]
    InvalidField { index: usize, message: String },

    #[error("Field #{index} has an empty key")]
    EmptyKey { index: usize },

    #[error("Duplicate field key \"{key}\" (fields #{first} and #{second})")]
    DuplicateKey {
        key: String,
        first: usize,
        second: usize,
    },

    #[error("Failed to read configuration: {0}")]
    Io(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_io() {
            return ConfigError::Io(e.to_string());
        }
        ConfigError::Parse {
            line: e.line(),
            column: e.column(),
            message: strip_position(&e.to_string()),
        }
    }
}

/// serde_json appends " at line L column C" to its messages; the position is
/// carried separately.
fn strip_position(message: &str) -> String {
    match message.rfind(" at line ") {
        Some(idx) => message[..idx].to_string(),
        None => message.to_string(),
    }
}
