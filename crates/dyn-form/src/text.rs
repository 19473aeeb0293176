//! Plain-text rendering of a [`FormView`], one line per non-empty row.

use crate::view::{Control, FieldView, FormView, OptionView};
use std::fmt::Write;

const COLUMN_SEPARATOR: &str = "  |  ";

pub fn render_text(view: &FormView) -> String {
    let mut out = String::new();
    for row in &view.rows {
        if row.fields.is_empty() {
            continue;
        }
        let line = row
            .fields
            .iter()
            .map(render_field_text)
            .collect::<Vec<_>>()
            .join(COLUMN_SEPARATOR);
        let _ = writeln!(out, "{line}");
    }
    out
}

pub fn render_field_text(field: &FieldView) -> String {
    let label = label_of(field);
    let placeholder = field.placeholder.as_deref().unwrap_or("");

    match &field.control {
        Control::TextInput { value, input_kind } => {
            let shown = if value.is_empty() { placeholder } else { value.as_str() };
            if input_kind == "text" {
                format!("{label}: [{shown}]")
            } else {
                format!("{label} ({input_kind}): [{shown}]")
            }
        }
        Control::TextArea { value } => {
            let shown = if value.is_empty() { placeholder } else { value.as_str() };
            format!("{label}: [[{shown}]]")
        }
        Control::Select { options, .. } => {
            let shown = selected_label(options).unwrap_or(placeholder);
            format!("{label}: <{shown}> {{{}}}", option_list(options, " / "))
        }
        Control::RadioGroup { options, .. } => {
            let items = options
                .iter()
                .map(|o| format!("({}) {}", if o.selected { '*' } else { ' ' }, o.label))
                .collect::<Vec<_>>()
                .join(" ");
            format!("{label}: {items}")
        }
        Control::Checkbox { checked } => {
            format!("[{}] {label}", if *checked { 'x' } else { ' ' })
        }
        Control::DatePicker { display, .. } => {
            format!("{label}: [{}]", display.as_deref().unwrap_or(placeholder))
        }
        Control::FileUpload { file } => match file {
            Some(f) => format!("{label}: [file: {}]", f.name),
            None => format!("{label}: [choose file]"),
        },
        Control::Unsupported { tag } => format!("{label}: <unsupported field type \"{tag}\">"),
    }
}

fn label_of(field: &FieldView) -> String {
    let base = field.label.as_deref().unwrap_or(&field.key);
    if field.required {
        format!("{base}*")
    } else {
        base.to_string()
    }
}

fn selected_label(options: &[OptionView]) -> Option<&str> {
    options
        .iter()
        .find(|o| o.selected)
        .map(|o| o.label.as_str())
}

fn option_list(options: &[OptionView], sep: &str) -> String {
    options
        .iter()
        .map(|o| o.label.as_str())
        .collect::<Vec<_>>()
        .join(sep)
}
