//! Expression AST and runtime value types.

use serde_json::Value;

/// A runtime value: either JavaScript-style `undefined` or a JSON value.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprValue {
    /// No value (unset field, missing member, or the `undefined` literal).
    Undefined,
    /// Any JSON-compatible value.
    Json(Value),
}

impl From<Value> for ExprValue {
    fn from(v: Value) -> Self {
        ExprValue::Json(v)
    }
}

impl From<bool> for ExprValue {
    fn from(b: bool) -> Self {
        ExprValue::Json(Value::Bool(b))
    }
}

impl From<&str> for ExprValue {
    fn from(s: &str) -> Self {
        ExprValue::Json(Value::String(s.to_string()))
    }
}

impl From<String> for ExprValue {
    fn from(s: String) -> Self {
        ExprValue::Json(Value::String(s))
    }
}

impl From<Option<Value>> for ExprValue {
    fn from(v: Option<Value>) -> Self {
        v.map(ExprValue::Json).unwrap_or(ExprValue::Undefined)
    }
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    StrictEqual,    // ===
    StrictNotEqual, // !==
    Equal,          // ==
    NotEqual,       // !=
    Less,           // <
    LessEqual,      // <=
    Greater,        // >
    GreaterEqual,   // >=
}

impl ComparisonOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonOperator::StrictEqual => "===",
            ComparisonOperator::StrictNotEqual => "!==",
            ComparisonOperator::Equal => "==",
            ComparisonOperator::NotEqual => "!=",
            ComparisonOperator::Less => "<",
            ComparisonOperator::LessEqual => "<=",
            ComparisonOperator::Greater => ">",
            ComparisonOperator::GreaterEqual => ">=",
        }
    }
}

/// Logical operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    And, // &&
    Or,  // ||
}

impl LogicalOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalOperator::And => "&&",
            LogicalOperator::Or => "||",
        }
    }
}

/// A parsed visibility expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Literal value: `'text'`, `42`, `true`, `null`, `undefined`
    Literal(ExprValue),
    /// Field reference: `formData.KEY`, `formData['KEY'].name`
    Field {
        /// The referenced form field key.
        key: String,
        /// Member accesses applied to the field value.
        path: Vec<String>,
    },
    /// Comparison: `formData.A === 'x'`
    Comparison {
        operator: ComparisonOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Logical conjunction or disjunction: `a && b`, `a || b`
    Logical {
        operator: LogicalOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Negation: `!formData.FLAG`
    Not(Box<Expr>),
}

impl Expr {
    pub fn field(key: impl Into<String>) -> Self {
        Expr::Field {
            key: key.into(),
            path: Vec::new(),
        }
    }

    pub fn literal(value: impl Into<ExprValue>) -> Self {
        Expr::Literal(value.into())
    }

    pub fn compare(operator: ComparisonOperator, left: Expr, right: Expr) -> Self {
        Expr::Comparison {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn logical(operator: LogicalOperator, left: Expr, right: Expr) -> Self {
        Expr::Logical {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Returns the distinct field keys referenced by this expression, in
    /// order of first appearance.
    pub fn field_refs(&self) -> Vec<&str> {
        let mut refs = Vec::new();
        self.collect_refs(&mut refs);
        refs
    }

    fn collect_refs<'a>(&'a self, refs: &mut Vec<&'a str>) {
        match self {
            Expr::Literal(_) => {}
            Expr::Field { key, .. } => {
                if !refs.contains(&key.as_str()) {
                    refs.push(key.as_str());
                }
            }
            Expr::Comparison { left, right, .. } | Expr::Logical { left, right, .. } => {
                left.collect_refs(refs);
                right.collect_refs(refs);
            }
            Expr::Not(inner) => inner.collect_refs(refs),
        }
    }
}
