use thiserror::Error;

/// Errors produced while parsing a visibility expression.
///
/// Positions are byte offsets into the source string.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Empty expression")]
    Empty,

    #[error("Unexpected character '{ch}' at {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("Unexpected end of input")]
    UnexpectedEnd,

    #[error("Unclosed string starting at {pos}")]
    UnclosedString { pos: usize },

    #[error("Invalid escape sequence at {pos}")]
    InvalidEscape { pos: usize },

    #[error("Invalid number at {pos}")]
    InvalidNumber { pos: usize },

    #[error("Unknown identifier '{name}' at {pos}")]
    UnknownIdentifier { name: String, pos: usize },

    #[error("Expected field access after '{root}' at {pos}")]
    MissingAccessor { root: String, pos: usize },

    #[error("Expression nested too deeply at {pos}")]
    TooDeep { pos: usize },
}

/// Errors produced while evaluating a parsed expression against form values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Cannot read property '{property}' of {target} (at {path})")]
    PropertyOfNullish {
        property: String,
        target: &'static str,
        path: String,
    },
}
