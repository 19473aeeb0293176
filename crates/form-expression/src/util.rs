//! Value helpers shared by the interpreter.

use crate::error::EvalError;
use crate::types::ExprValue;
use serde_json::Value;
use std::cmp::Ordering;

// ----------------------------------------------------------------- Truthiness

/// JavaScript truthiness: `undefined`, `null`, `false`, `0`, `NaN` and `""`
/// are falsy, everything else is truthy.
pub fn is_truthy(value: &ExprValue) -> bool {
    match value {
        ExprValue::Undefined => false,
        ExprValue::Json(v) => match v {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(false),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        },
    }
}

pub fn type_name(value: &ExprValue) -> &'static str {
    match value {
        ExprValue::Undefined => "undefined",
        ExprValue::Json(v) => match v {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        },
    }
}

// ----------------------------------------------------------------- Equality

/// Deep structural equality. Numbers compare by numeric value, so `1` equals `1.0`.
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => a == b || a.as_f64() == b.as_f64(),
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Array(arr_a), Value::Array(arr_b)) => {
            arr_a.len() == arr_b.len() && arr_a.iter().zip(arr_b).all(|(x, y)| deep_equal(x, y))
        }
        (Value::Object(obj_a), Value::Object(obj_b)) => {
            obj_a.len() == obj_b.len()
                && obj_a
                    .iter()
                    .all(|(key, val_a)| obj_b.get(key).is_some_and(|val_b| deep_equal(val_a, val_b)))
        }
        _ => false,
    }
}

/// `===`
pub fn strict_equals(a: &ExprValue, b: &ExprValue) -> bool {
    match (a, b) {
        (ExprValue::Undefined, ExprValue::Undefined) => true,
        (ExprValue::Json(a), ExprValue::Json(b)) => deep_equal(a, b),
        _ => false,
    }
}

/// `==`: strict equality, plus `null == undefined` and number/string coercion.
pub fn loose_equals(a: &ExprValue, b: &ExprValue) -> bool {
    if strict_equals(a, b) {
        return true;
    }
    match (a, b) {
        (ExprValue::Undefined, ExprValue::Json(Value::Null))
        | (ExprValue::Json(Value::Null), ExprValue::Undefined) => true,
        (ExprValue::Json(Value::Number(n)), ExprValue::Json(Value::String(s)))
        | (ExprValue::Json(Value::String(s)), ExprValue::Json(Value::Number(n))) => {
            match (n.as_f64(), s.trim().parse::<f64>()) {
                (Some(x), Ok(y)) => x == y,
                _ => false,
            }
        }
        _ => false,
    }
}

// ----------------------------------------------------------------- Ordering

/// Orders two values of the same primitive kind. Mixed kinds are unordered.
pub fn compare_values(a: &ExprValue, b: &ExprValue) -> Option<Ordering> {
    match (a, b) {
        (ExprValue::Json(Value::Number(a)), ExprValue::Json(Value::Number(b))) => {
            a.as_f64()?.partial_cmp(&b.as_f64()?)
        }
        (ExprValue::Json(Value::String(a)), ExprValue::Json(Value::String(b))) => Some(a.cmp(b)),
        _ => None,
    }
}

// ----------------------------------------------------------------- Members

/// Reads `property` from `container`.
///
/// Reading from `undefined` or `null` is an error, as it is in JavaScript.
/// Strings and arrays expose `length`; other primitives have no members.
pub fn member(container: &ExprValue, property: &str, path: &str) -> Result<ExprValue, EvalError> {
    match container {
        ExprValue::Undefined | ExprValue::Json(Value::Null) => Err(EvalError::PropertyOfNullish {
            property: property.to_string(),
            target: type_name(container),
            path: path.to_string(),
        }),
        ExprValue::Json(Value::Object(obj)) => Ok(obj.get(property).cloned().into()),
        ExprValue::Json(Value::String(s)) if property == "length" => {
            Ok(ExprValue::Json(Value::from(s.chars().count())))
        }
        ExprValue::Json(Value::Array(arr)) if property == "length" => {
            Ok(ExprValue::Json(Value::from(arr.len())))
        }
        ExprValue::Json(Value::Array(arr)) => Ok(property
            .parse::<usize>()
            .ok()
            .and_then(|i| arr.get(i).cloned())
            .into()),
        _ => Ok(ExprValue::Undefined),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn truthiness_matches_javascript() {
        assert!(!is_truthy(&ExprValue::Undefined));
        assert!(!is_truthy(&json!(null).into()));
        assert!(!is_truthy(&json!(0).into()));
        assert!(!is_truthy(&json!(0.0).into()));
        assert!(!is_truthy(&json!("").into()));
        assert!(is_truthy(&json!("0").into()));
        assert!(is_truthy(&json!([]).into()));
        assert!(is_truthy(&json!({}).into()));
    }

    #[test]
    fn numbers_compare_by_value() {
        assert!(deep_equal(&json!(1), &json!(1.0)));
        assert!(deep_equal(&json!({"a": [1, 2]}), &json!({"a": [1.0, 2]})));
        assert!(!deep_equal(&json!("1"), &json!(1)));
    }

    #[test]
    fn loose_equality_coerces() {
        assert!(loose_equals(&ExprValue::Undefined, &json!(null).into()));
        assert!(loose_equals(&json!("5").into(), &json!(5).into()));
        assert!(!strict_equals(&json!("5").into(), &json!(5).into()));
        assert!(!loose_equals(&ExprValue::Undefined, &json!("").into()));
    }

    #[test]
    fn member_of_undefined_fails() {
        let err = member(&ExprValue::Undefined, "name", "formData.DOC.name").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot read property 'name' of undefined (at formData.DOC.name)"
        );
        assert_eq!(
            member(&json!("abc").into(), "length", "x").unwrap(),
            ExprValue::Json(json!(3))
        );
        assert_eq!(member(&json!(true).into(), "x", "x").unwrap(), ExprValue::Undefined);
    }
}
