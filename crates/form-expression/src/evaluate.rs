//! The expression interpreter.

use crate::display::reference_path;
use crate::error::EvalError;
use crate::types::{ComparisonOperator, Expr, ExprValue, LogicalOperator};
use crate::util;
use serde_json::{Map, Value};
use std::cmp::Ordering;

/// Source of field values for evaluation.
///
/// Implementations decide what an unknown key means: the form session
/// rejects keys the form does not declare, while a plain JSON map treats
/// every missing key as unset.
pub trait Scope {
    fn lookup(&self, key: &str) -> Result<ExprValue, EvalError>;
}

impl Scope for Map<String, Value> {
    fn lookup(&self, key: &str) -> Result<ExprValue, EvalError> {
        Ok(self.get(key).cloned().into())
    }
}

impl<S: Scope + ?Sized> Scope for &S {
    fn lookup(&self, key: &str) -> Result<ExprValue, EvalError> {
        (**self).lookup(key)
    }
}

/// Evaluates `expr` against `scope`.
///
/// `&&` and `||` short-circuit and yield one of their operands, so the
/// result is not necessarily a boolean. Use [`evaluate_bool`] for a
/// truthiness decision.
pub fn evaluate<S: Scope + ?Sized>(expr: &Expr, scope: &S) -> Result<ExprValue, EvalError> {
    match expr {
        Expr::Literal(value) => Ok(value.clone()),
        Expr::Field { key, path } => {
            let mut current = scope.lookup(key)?;
            for (depth, property) in path.iter().enumerate() {
                current = util::member(&current, property, &reference_path(key, &path[..=depth]))?;
            }
            Ok(current)
        }
        Expr::Comparison {
            operator,
            left,
            right,
        } => {
            let left = evaluate(left, scope)?;
            let right = evaluate(right, scope)?;
            Ok(ExprValue::from(compare(*operator, &left, &right)))
        }
        Expr::Logical {
            operator,
            left,
            right,
        } => {
            let left = evaluate(left, scope)?;
            let short_circuit = match operator {
                LogicalOperator::And => !util::is_truthy(&left),
                LogicalOperator::Or => util::is_truthy(&left),
            };
            if short_circuit {
                Ok(left)
            } else {
                evaluate(right, scope)
            }
        }
        Expr::Not(inner) => {
            let value = evaluate(inner, scope)?;
            Ok(ExprValue::from(!util::is_truthy(&value)))
        }
    }
}

/// Evaluates `expr` and reduces the result to its truthiness.
pub fn evaluate_bool<S: Scope + ?Sized>(expr: &Expr, scope: &S) -> Result<bool, EvalError> {
    evaluate(expr, scope).map(|value| util::is_truthy(&value))
}

fn compare(operator: ComparisonOperator, left: &ExprValue, right: &ExprValue) -> bool {
    match operator {
        ComparisonOperator::StrictEqual => util::strict_equals(left, right),
        ComparisonOperator::StrictNotEqual => !util::strict_equals(left, right),
        ComparisonOperator::Equal => util::loose_equals(left, right),
        ComparisonOperator::NotEqual => !util::loose_equals(left, right),
        ComparisonOperator::Less => util::compare_values(left, right) == Some(Ordering::Less),
        ComparisonOperator::LessEqual => matches!(
            util::compare_values(left, right),
            Some(Ordering::Less | Ordering::Equal)
        ),
        ComparisonOperator::Greater => util::compare_values(left, right) == Some(Ordering::Greater),
        ComparisonOperator::GreaterEqual => matches!(
            util::compare_values(left, right),
            Some(Ordering::Greater | Ordering::Equal)
        ),
    }
}
