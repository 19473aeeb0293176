//! Toolkit-neutral view model.
//!
//! A widget toolkit draws these values and reports user interaction back
//! through [`FormSession::handle_input_change`](crate::FormSession::handle_input_change).
//! Every control is controlled: it shows exactly the value it is given.

use crate::value::FileHandle;
use chrono::NaiveDate;

/// One selectable entry of a select or radio group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub label: String,
    pub value: String,
    pub selected: bool,
}

/// The interactive control chosen for a field.
#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    TextInput {
        input_kind: String,
        value: String,
    },
    Select {
        options: Vec<OptionView>,
        selected: Option<String>,
    },
    Checkbox {
        checked: bool,
    },
    RadioGroup {
        options: Vec<OptionView>,
        selected: Option<String>,
    },
    DatePicker {
        selected: Option<NaiveDate>,
        /// Human-readable form of `selected`, e.g. "April 29th, 1990".
        display: Option<String>,
    },
    TextArea {
        value: String,
    },
    FileUpload {
        file: Option<FileHandle>,
    },
    Unsupported {
        tag: String,
    },
}

/// A rendered field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldView {
    pub key: String,
    pub label: Option<String>,
    pub placeholder: Option<String>,
    pub required: bool,
    pub class_name: Option<String>,
    pub control: Control,
}

/// A layout row. `fields` holds only the visible fields of the row's slots
/// and may be empty.
#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub index: usize,
    pub fields: Vec<FieldView>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormView {
    pub rows: Vec<RowView>,
}

impl FormView {
    /// Visible fields in configuration order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldView> {
        self.rows.iter().flat_map(|row| row.fields.iter())
    }

    pub fn field(&self, key: &str) -> Option<&FieldView> {
        self.fields().find(|f| f.key == key)
    }

    pub fn keys(&self) -> Vec<&str> {
        self.fields().map(|f| f.key.as_str()).collect()
    }
}
