/// What happens to the value of a field once it becomes hidden.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HiddenValuePolicy {
    /// Keep the value; it is still submitted.
    #[default]
    Retain,
    /// Drop the value as soon as the field is hidden.
    Clear,
}

/// How fields of an unsupported type are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnsupportedFieldPolicy {
    /// Render nothing.
    #[default]
    Omit,
    /// Render an [`Control::Unsupported`](crate::view::Control::Unsupported) placeholder.
    Diagnostic,
}

/// Session behaviour switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionOptions {
    pub hidden_values: HiddenValuePolicy,
    pub unsupported: UnsupportedFieldPolicy,
}

impl SessionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hidden_values(mut self, policy: HiddenValuePolicy) -> Self {
        self.hidden_values = policy;
        self
    }

    pub fn unsupported(mut self, policy: UnsupportedFieldPolicy) -> Self {
        self.unsupported = policy;
        self
    }
}
