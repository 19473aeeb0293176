//! Field-type dispatch: descriptor + current value -> control.

use crate::layout::pair_rows;
use crate::options::UnsupportedFieldPolicy;
use crate::value::{FormValue, FormValues};
use crate::view::{Control, FieldView, FormView, OptionView, RowView};
use crate::visibility::VisibilityMap;
use dyn_form_config::{FieldDescriptor, FieldOption, FieldType};
use chrono::{Datelike, NaiveDate};
use tracing::debug;

/// Long date shown on date pickers, e.g. "April 29th, 1990".
pub fn format_long_date(date: NaiveDate) -> String {
    let day = date.day();
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{} {day}{suffix}, {}", date.format("%B"), date.year())
}

/// Builds the control for one field.
///
/// Returns `None` for unsupported types unless `unsupported` asks for a
/// diagnostic placeholder.
pub fn render_field(
    field: &FieldDescriptor,
    values: &FormValues,
    unsupported: UnsupportedFieldPolicy,
) -> Option<FieldView> {
    let value = values.get(&field.key);

    let control = match &field.field_type {
        FieldType::TextInput => Control::TextInput {
            input_kind: field.display.input_kind.clone(),
            value: text_of(value),
        },
        FieldType::TextArea => Control::TextArea {
            value: text_of(value),
        },
        FieldType::Select => {
            let selected = choice_of(value);
            Control::Select {
                options: option_views(&field.display.options, selected.as_deref()),
                selected,
            }
        }
        FieldType::RadioGroup => {
            let selected = choice_of(value);
            Control::RadioGroup {
                options: option_views(&field.display.options, selected.as_deref()),
                selected,
            }
        }
        FieldType::Checkbox => Control::Checkbox {
            checked: matches!(value, Some(FormValue::Bool(true))),
        },
        FieldType::DatePicker => {
            let selected = match value {
                Some(FormValue::Date(d)) => Some(*d),
                _ => None,
            };
            Control::DatePicker {
                selected,
                display: selected.map(format_long_date),
            }
        }
        FieldType::FileUpload => Control::FileUpload {
            file: match value {
                Some(FormValue::File(f)) => Some(f.clone()),
                _ => None,
            },
        },
        FieldType::Unsupported(tag) => {
            debug!(field = %field.key, tag = %tag, "no renderer for field type");
            match unsupported {
                UnsupportedFieldPolicy::Omit => return None,
                UnsupportedFieldPolicy::Diagnostic => Control::Unsupported { tag: tag.clone() },
            }
        }
    };

    Some(FieldView {
        key: field.key.clone(),
        label: field.display.label.clone(),
        placeholder: field.display.placeholder.clone(),
        required: field.display.required,
        class_name: field.class_name.clone(),
        control,
    })
}

/// Lays out and renders all visible fields.
pub fn render_form(
    fields: &[FieldDescriptor],
    values: &FormValues,
    visibility: &VisibilityMap,
    unsupported: UnsupportedFieldPolicy,
) -> FormView {
    let rows = pair_rows(fields.len())
        .into_iter()
        .enumerate()
        .map(|(index, slots)| RowView {
            index,
            fields: fields[slots]
                .iter()
                .filter(|f| visibility.is_visible(&f.key))
                .filter_map(|f| render_field(f, values, unsupported))
                .collect(),
        })
        .collect();
    FormView { rows }
}

fn text_of(value: Option<&FormValue>) -> String {
    match value {
        Some(FormValue::Text(s)) => s.clone(),
        _ => String::new(),
    }
}

fn choice_of(value: Option<&FormValue>) -> Option<String> {
    match value {
        Some(FormValue::Choice(s)) => Some(s.clone()),
        _ => None,
    }
}

fn option_views(options: &[FieldOption], selected: Option<&str>) -> Vec<OptionView> {
    options
        .iter()
        .map(|o| OptionView {
            label: o.name.clone(),
            value: o.value.clone(),
            selected: selected == Some(o.value.as_str()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn date_display() {
        let field = FieldDescriptor::new("DOB", FieldType::DatePicker);
        let mut values = FormValues::new();
        values.insert(
            "DOB",
            FormValue::Date(NaiveDate::from_ymd_opt(1990, 4, 9).unwrap()),
        );
        let view = render_field(&field, &values, UnsupportedFieldPolicy::Omit).unwrap();
        match view.control {
            Control::DatePicker { display, .. } => {
                assert_eq!(display.as_deref(), Some("April 9th, 1990"))
            }
            other => panic!("unexpected control {other:?}"),
        }
    }

    #[test]
    fn ordinal_suffixes() {
        let day = |d| format_long_date(NaiveDate::from_ymd_opt(2024, 3, d).unwrap());
        assert_eq!(day(1), "March 1st, 2024");
        assert_eq!(day(2), "March 2nd, 2024");
        assert_eq!(day(3), "March 3rd, 2024");
        assert_eq!(day(11), "March 11th, 2024");
        assert_eq!(day(12), "March 12th, 2024");
        assert_eq!(day(13), "March 13th, 2024");
        assert_eq!(day(21), "March 21st, 2024");
        assert_eq!(day(22), "March 22nd, 2024");
        assert_eq!(day(31), "March 31st, 2024");
    }

    #[test]
    fn unsupported_policy() {
        let field = FieldDescriptor::new("SIG", FieldType::Unsupported("signature".into()));
        let values = FormValues::new();
        assert!(render_field(&field, &values, UnsupportedFieldPolicy::Omit).is_none());
        let view = render_field(&field, &values, UnsupportedFieldPolicy::Diagnostic).unwrap();
        assert_eq!(
            view.control,
            Control::Unsupported {
                tag: "signature".into()
            }
        );
    }
}
