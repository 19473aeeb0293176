//! Review summary of a submission, grouped by `summarySection`.

use crate::dispatch::format_long_date;
use crate::submission::Submission;
use crate::value::DATE_FORMAT;
use chrono::NaiveDate;
use dyn_form_config::{FieldDescriptor, FieldType, FormConfig};
use serde::Serialize;
use serde_json::Value;

/// Section used for fields that do not name one.
pub const DEFAULT_SECTION: &str = "GENERAL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryEntry {
    pub key: String,
    pub label: String,
    pub display: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummarySection {
    pub name: String,
    pub entries: Vec<SummaryEntry>,
}

/// Groups the submitted values into sections, in configuration order.
/// Sections appear in the order their first field does.
pub fn build_summary(config: &FormConfig, submission: &Submission) -> Vec<SummarySection> {
    let mut sections: Vec<SummarySection> = Vec::new();

    for field in config.fields() {
        let Some(value) = submission.get(&field.key) else {
            continue;
        };
        let name = field
            .display
            .summary_section
            .as_deref()
            .unwrap_or(DEFAULT_SECTION);
        let entry = SummaryEntry {
            key: field.key.clone(),
            label: summary_label(field).to_string(),
            display: format_value(field, value),
        };
        match sections.iter_mut().find(|s| s.name == name) {
            Some(section) => section.entries.push(entry),
            None => sections.push(SummarySection {
                name: name.to_string(),
                entries: vec![entry],
            }),
        }
    }

    sections
}

fn summary_label(field: &FieldDescriptor) -> &str {
    field
        .display
        .summary_formatting
        .as_ref()
        .and_then(|f| f.use_label.as_deref())
        .unwrap_or_else(|| field.label())
}

fn format_type(field: &FieldDescriptor) -> Option<&str> {
    field
        .display
        .summary_formatting
        .as_ref()
        .and_then(|f| f.format_type.as_deref())
}

fn format_value(field: &FieldDescriptor, value: &Value) -> String {
    let is_date = format_type(field) == Some("DATE") || field.field_type == FieldType::DatePicker;
    let uses_options =
        format_type(field) == Some("STANDARD_OPTIONS") || field.field_type.has_options();

    match value {
        Value::String(s) if is_date => format_date(field, s),
        Value::String(s) if uses_options => field
            .display
            .option_name(s)
            .map(str::to_string)
            .unwrap_or_else(|| s.clone()),
        Value::String(s) => s.clone(),
        Value::Bool(true) => "Yes".to_string(),
        Value::Bool(false) => "No".to_string(),
        Value::Object(obj) => match obj.get("name") {
            Some(Value::String(name)) => name.clone(),
            _ => value.to_string(),
        },
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn format_date(field: &FieldDescriptor, raw: &str) -> String {
    let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) else {
        return raw.to_string();
    };
    match field
        .display
        .summary_formatting
        .as_ref()
        .and_then(|f| f.date_format.as_deref())
    {
        Some(pattern) => date.format(&date_pattern_to_strftime(pattern)).to_string(),
        None => format_long_date(date),
    }
}

/// Translates `DD/MM/YYYY`-style patterns into strftime syntax. Characters
/// other than the `D`, `M` and `Y` runs are copied literally.
pub fn date_pattern_to_strftime(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 4);
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        let mut run = 1;
        while chars.peek() == Some(&c) {
            chars.next();
            run += 1;
        }
        let token = match (c, run) {
            ('Y', 4) => Some("%Y"),
            ('Y', 2) => Some("%y"),
            ('M', 4) => Some("%B"),
            ('M', 3) => Some("%b"),
            ('M', 2) => Some("%m"),
            ('M', 1) => Some("%-m"),
            ('D', 2) => Some("%d"),
            ('D', 1) => Some("%-d"),
            _ => None,
        };
        match token {
            Some(t) => out.push_str(t),
            None => {
                for _ in 0..run {
                    if c == '%' {
                        out.push_str("%%");
                    } else {
                        out.push(c);
                    }
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_patterns() {
        assert_eq!(date_pattern_to_strftime("DD/MM/YYYY"), "%d/%m/%Y");
        assert_eq!(date_pattern_to_strftime("YYYY-MM-DD"), "%Y-%m-%d");
        assert_eq!(date_pattern_to_strftime("D MMM YY"), "%-d %b %y");
        assert_eq!(date_pattern_to_strftime("100%"), "100%%");
    }
}
