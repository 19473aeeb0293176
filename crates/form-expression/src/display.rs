//! Canonical source rendering for parsed expressions.

use crate::parser::is_plain_identifier;
use crate::types::{Expr, ExprValue};
use serde_json::Value;
use std::fmt;

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(value) => write_literal(f, value),
            Expr::Field { key, path } => f.write_str(&reference_path(key, path)),
            Expr::Comparison {
                operator,
                left,
                right,
            } => {
                write_operand(f, left)?;
                write!(f, " {} ", operator.as_str())?;
                write_operand(f, right)
            }
            Expr::Logical {
                operator,
                left,
                right,
            } => {
                write_logical_side(f, left, self)?;
                write!(f, " {} ", operator.as_str())?;
                write_logical_side(f, right, self)
            }
            Expr::Not(inner) => {
                f.write_str("!")?;
                match inner.as_ref() {
                    Expr::Comparison { .. } | Expr::Logical { .. } => write!(f, "({inner})"),
                    _ => write!(f, "{inner}"),
                }
            }
        }
    }
}

/// Renders `formData.KEY.member` using bracket notation where needed.
pub(crate) fn reference_path(key: &str, path: &[String]) -> String {
    let mut out = String::from("formData");
    for segment in std::iter::once(key).chain(path.iter().map(String::as_str)) {
        if is_plain_identifier(segment) {
            out.push('.');
            out.push_str(segment);
        } else {
            out.push_str("['");
            out.push_str(&escape(segment));
            out.push_str("']");
        }
    }
    out
}

fn write_operand(f: &mut fmt::Formatter<'_>, expr: &Expr) -> fmt::Result {
    match expr {
        Expr::Comparison { .. } | Expr::Logical { .. } => write!(f, "({expr})"),
        _ => write!(f, "{expr}"),
    }
}

fn write_logical_side(f: &mut fmt::Formatter<'_>, side: &Expr, parent: &Expr) -> fmt::Result {
    match (side, parent) {
        (
            Expr::Logical { operator: inner, .. },
            Expr::Logical { operator: outer, .. },
        ) if inner != outer => write!(f, "({side})"),
        _ => write!(f, "{side}"),
    }
}

fn write_literal(f: &mut fmt::Formatter<'_>, value: &ExprValue) -> fmt::Result {
    match value {
        ExprValue::Undefined => f.write_str("undefined"),
        ExprValue::Json(Value::String(s)) => write!(f, "'{}'", escape(s)),
        ExprValue::Json(other) => write!(f, "{other}"),
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}
