//! Restricted boolean expressions for conditional form field visibility.
//!
//! # Overview
//!
//! Form configurations attach a `hideExpression` string to fields, written
//! in a JavaScript-like syntax such as `formData.NAME !== 'skip'`. Rather
//! than executing those strings, this crate parses them into a small AST
//! (comparisons, `&&`, `||`, `!`, field references and literals) and
//! evaluates that AST against a [`Scope`] of form values. Evaluation has
//! no side effects and no access to anything but the scope.
//!
//! # Example
//!
//! ```
//! use form_expression::{evaluate_bool, ExprParser};
//! use serde_json::json;
//!
//! let expr = ExprParser::parse("formData.NAME !== 'skip' && !formData.OPT_OUT").unwrap();
//! let values = json!({"NAME": "Ada"});
//! let scope = values.as_object().unwrap();
//!
//! assert!(evaluate_bool(&expr, scope).unwrap());
//! assert_eq!(expr.field_refs(), vec!["NAME", "OPT_OUT"]);
//! ```

mod display;
pub mod error;
pub mod evaluate;
pub mod parser;
pub mod types;
pub mod util;

pub use error::{EvalError, ParseError};
pub use evaluate::{evaluate, evaluate_bool, Scope};
pub use parser::ExprParser;
pub use types::{ComparisonOperator, Expr, ExprValue, LogicalOperator};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map, Value};

    fn scope(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn test_display_reparses() {
        for src in [
            "formData.A === 'x'",
            "!(formData.A === 'x')",
            "(formData.A || formData.B) && formData.C",
            "formData['first-name'].length >= 3",
            "formData.FLAG != undefined",
        ] {
            let expr = ExprParser::parse(src).unwrap();
            let again = ExprParser::parse(&expr.to_string()).unwrap();
            assert_eq!(expr, again, "source: {src}");
        }
    }

    #[test]
    fn test_canonical_form() {
        let err = ExprParser::parse("model . A === 'x'").unwrap_err();
        assert!(matches!(err, ParseError::MissingAccessor { .. }));

        let expr = ExprParser::parse("model.A   ===   \"it's\"").unwrap();
        assert_eq!(expr.to_string(), "formData.A === 'it\\'s'");
    }

    #[test]
    fn test_and_returns_operand() {
        let expr = ExprParser::parse("formData.A && formData.B").unwrap();
        let values = scope(json!({"A": "x", "B": "y"}));
        assert_eq!(evaluate(&expr, &values).unwrap(), ExprValue::from("y"));
        let values = scope(json!({"A": "", "B": "y"}));
        assert_eq!(evaluate(&expr, &values).unwrap(), ExprValue::from(""));
    }
}
