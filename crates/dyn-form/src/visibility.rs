//! Field visibility evaluation.
//!
//! Visibility is a pure function of the field list and the current values.
//! Any expression may read any field, so every change re-evaluates every
//! field; there is no dependency tracking.

use crate::value::FormValues;
use dyn_form_config::{FieldDescriptor, HideRule};
use form_expression::{evaluate_bool, EvalError, ExprValue, ParseError, Scope};
use indexmap::IndexMap;
use std::collections::HashSet;
use thiserror::Error;
use tracing::warn;

/// Per-field visibility, keyed like the configuration.
///
/// A key that is not present reads as hidden, so nothing shows before the
/// first evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibilityMap {
    entries: IndexMap<String, bool>,
}

impl VisibilityMap {
    pub fn is_visible(&self, key: &str) -> bool {
        self.entries.get(key).copied().unwrap_or(false)
    }

    pub fn get(&self, key: &str) -> Option<bool> {
        self.entries.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Keys currently hidden, in configuration order.
    pub fn hidden(&self) -> impl Iterator<Item = &str> {
        self.iter().filter(|(_, v)| !v).map(|(k, _)| k)
    }
}

/// Why a field's hide rule could not be applied. The field is shown.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionFailure {
    #[error("hideExpression does not parse: {0}")]
    Parse(ParseError),
    #[error("hideExpression failed: {0}")]
    Eval(EvalError),
}

/// Scope over the session's values that rejects keys the form does not declare.
///
/// Build it once per pass; the declared key set is indexed up front.
pub struct FormScope<'a> {
    declared: HashSet<&'a str>,
    values: &'a FormValues,
}

impl<'a> FormScope<'a> {
    pub fn new(fields: &'a [FieldDescriptor], values: &'a FormValues) -> Self {
        Self {
            declared: fields.iter().map(|f| f.key.as_str()).collect(),
            values,
        }
    }
}

impl Scope for FormScope<'_> {
    fn lookup(&self, key: &str) -> Result<ExprValue, EvalError> {
        if !self.declared.contains(key) {
            return Err(EvalError::UnknownField(key.to_string()));
        }
        Ok(self.values.get(key).map(|v| v.to_json()).into())
    }
}

/// Decides whether one field is hidden.
///
/// `Ok(false)` for fields without a rule.
pub fn evaluate_hide_rule(
    field: &FieldDescriptor,
    scope: &FormScope<'_>,
) -> Result<bool, ExpressionFailure> {
    match &field.hide {
        None => Ok(false),
        Some(HideRule::Invalid { error, .. }) => Err(ExpressionFailure::Parse(error.clone())),
        Some(HideRule::Compiled { expr, .. }) => {
            evaluate_bool(expr, scope).map_err(ExpressionFailure::Eval)
        }
    }
}

/// Computes visibility for every field.
///
/// Failing rules leave their field visible and are logged; nothing escapes.
pub fn compute_visibility(fields: &[FieldDescriptor], values: &FormValues) -> VisibilityMap {
    let scope = FormScope::new(fields, values);
    let entries = fields
        .iter()
        .map(|field| {
            let visible = match evaluate_hide_rule(field, &scope) {
                Ok(hidden) => !hidden,
                Err(failure) => {
                    warn!(
                        field = %field.key,
                        expression = field.hide.as_ref().map(HideRule::source).unwrap_or_default(),
                        %failure,
                        "visibility rule failed, showing field"
                    );
                    true
                }
            };
            (field.key.clone(), visible)
        })
        .collect();
    VisibilityMap { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::FormValue;
    use dyn_form_config::FieldType;

    #[test]
    fn absent_key_reads_hidden() {
        let map = VisibilityMap::default();
        assert!(!map.is_visible("ANY"));
        assert_eq!(map.get("ANY"), None);
    }

    #[test]
    fn unknown_reference_fails_open() {
        let fields = vec![
            FieldDescriptor::new("A", FieldType::TextInput)
                .with_hide_expression("formData.B === 'x'"),
        ];
        let values = FormValues::new();
        assert_eq!(
            evaluate_hide_rule(&fields[0], &FormScope::new(&fields, &values)),
            Err(ExpressionFailure::Eval(EvalError::UnknownField("B".into())))
        );
        assert!(compute_visibility(&fields, &values).is_visible("A"));
    }

    #[test]
    fn scope_separates_unset_from_undeclared() {
        let fields = vec![
            FieldDescriptor::new("A", FieldType::TextInput),
            FieldDescriptor::new("B", FieldType::Checkbox),
        ];
        let mut values = FormValues::new();
        values.insert("B", FormValue::Bool(false));
        let scope = FormScope::new(&fields, &values);
        assert_eq!(scope.lookup("A"), Ok(ExprValue::Undefined));
        assert_eq!(scope.lookup("B"), Ok(ExprValue::from(false)));
        assert_eq!(
            scope.lookup("C"),
            Err(EvalError::UnknownField("C".into()))
        );
    }

    #[test]
    fn scope_exposes_json_form() {
        let fields = vec![
            FieldDescriptor::new("AGREE", FieldType::Checkbox),
            FieldDescriptor::new("NOTE", FieldType::TextArea).with_hide_expression("formData.AGREE"),
        ];
        let mut values = FormValues::new();
        assert!(compute_visibility(&fields, &values).is_visible("NOTE"));
        values.insert("AGREE", FormValue::Bool(true));
        let map = compute_visibility(&fields, &values);
        assert!(!map.is_visible("NOTE"));
        assert_eq!(map.hidden().collect::<Vec<_>>(), vec!["NOTE"]);
    }
}
