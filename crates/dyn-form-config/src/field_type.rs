use std::fmt;

/// Widget type tag of a field.
///
/// Tags the renderer has no strategy for are preserved as
/// [`FieldType::Unsupported`] so a configuration with an unknown widget
/// still loads.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    TextInput,
    Select,
    Checkbox,
    RadioGroup,
    DatePicker,
    TextArea,
    FileUpload,
    Unsupported(String),
}

impl FieldType {
    /// Resolves a configuration tag, accepting the legacy `custom-*` names.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "text-input" | "custom-input" | "input" => FieldType::TextInput,
            "select" | "custom-select" => FieldType::Select,
            "checkbox" | "custom-checkbox" => FieldType::Checkbox,
            "radio-group" | "custom-radio" | "radio" => FieldType::RadioGroup,
            "date-picker" | "custom-date" | "date" => FieldType::DatePicker,
            "textarea" | "custom-textarea" => FieldType::TextArea,
            "file-upload" | "custom-file" | "file" => FieldType::FileUpload,
            other => FieldType::Unsupported(other.to_string()),
        }
    }

    /// Canonical tag.
    pub fn tag(&self) -> &str {
        match self {
            FieldType::TextInput => "text-input",
            FieldType::Select => "select",
            FieldType::Checkbox => "checkbox",
            FieldType::RadioGroup => "radio-group",
            FieldType::DatePicker => "date-picker",
            FieldType::TextArea => "textarea",
            FieldType::FileUpload => "file-upload",
            FieldType::Unsupported(tag) => tag,
        }
    }

    /// Whether the type chooses among configured options.
    pub fn has_options(&self) -> bool {
        matches!(self, FieldType::Select | FieldType::RadioGroup)
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, FieldType::Unsupported(_))
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
