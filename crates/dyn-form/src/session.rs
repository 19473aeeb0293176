//! A single form rendering session.

use crate::dispatch::render_form;
use crate::error::{InputError, SubmitError};
use crate::options::{HiddenValuePolicy, SessionOptions};
use crate::submission::{Submission, SubmissionSink};
use crate::value::{expected_kind, FileHandle, FormValue, FormValues};
use crate::view::FormView;
use crate::visibility::{compute_visibility, VisibilityMap};
use dyn_form_config::{FieldDescriptor, FieldType, FormConfig};
use std::sync::Arc;
use tracing::{debug, info};

/// Owns the value map and derived visibility for one configuration.
///
/// All mutation goes through `&mut self`, and visibility is recomputed in
/// full before each mutating call returns, so readers never observe a value
/// map and visibility map that disagree.
#[derive(Debug, Clone)]
pub struct FormSession {
    config: Arc<FormConfig>,
    options: SessionOptions,
    values: FormValues,
    visibility: VisibilityMap,
}

impl FormSession {
    pub fn new(config: impl Into<Arc<FormConfig>>) -> Self {
        Self::with_options(config, SessionOptions::default())
    }

    pub fn with_options(config: impl Into<Arc<FormConfig>>, options: SessionOptions) -> Self {
        let config = config.into();
        let values = FormValues::new();
        let visibility = compute_visibility(config.fields(), &values);
        Self {
            config,
            options,
            values,
            visibility,
        }
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn options(&self) -> SessionOptions {
        self.options
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn visibility(&self) -> &VisibilityMap {
        &self.visibility
    }

    pub fn is_visible(&self, key: &str) -> bool {
        self.visibility.is_visible(key)
    }

    /// The single input-change handler every control reports to.
    ///
    /// The value is checked against the field's type (and options, for
    /// choice fields) before it is stored.
    pub fn handle_input_change(&mut self, key: &str, value: FormValue) -> Result<(), InputError> {
        let field = self.field(key)?;
        let value = value.coerce_for(field)?;
        debug!(field = %key, kind = value.kind(), "input changed");
        self.values.insert(key, value);
        self.refresh();
        Ok(())
    }

    /// Handles a file chooser result. Only the first file is kept; an empty
    /// selection clears the field.
    pub fn select_files<I>(&mut self, key: &str, files: I) -> Result<(), InputError>
    where
        I: IntoIterator<Item = FileHandle>,
    {
        let field = self.field(key)?;
        if field.field_type != FieldType::FileUpload {
            return Err(InputError::ShapeMismatch {
                key: key.to_string(),
                expected: expected_kind(field)?,
                found: "file",
            });
        }
        match files.into_iter().next() {
            Some(file) => self.handle_input_change(key, FormValue::File(file)),
            None => self.clear_value(key).map(|_| ()),
        }
    }

    /// Removes a field's value.
    pub fn clear_value(&mut self, key: &str) -> Result<Option<FormValue>, InputError> {
        self.field(key)?;
        let previous = self.values.remove(key);
        self.refresh();
        Ok(previous)
    }

    /// The current view: visible fields in two-column rows.
    pub fn view(&self) -> FormView {
        render_form(
            self.config.fields(),
            &self.values,
            &self.visibility,
            self.options.unsupported,
        )
    }

    /// Visible required fields without a value, in configuration order.
    /// Checkboxes and unsupported fields never count as missing.
    pub fn missing_required(&self) -> Vec<String> {
        self.config
            .fields()
            .iter()
            .filter(|f| f.display.required && f.field_type.is_supported())
            .filter(|f| f.field_type != FieldType::Checkbox)
            .filter(|f| self.visibility.is_visible(&f.key))
            .filter(|f| self.values.get(&f.key).map_or(true, FormValue::is_blank))
            .map(|f| f.key.clone())
            .collect()
    }

    /// Submits the current values.
    ///
    /// On success the record is handed to `sink`, the values are reset and
    /// visibility is re-evaluated against the empty map.
    pub fn submit<S>(&mut self, sink: &mut S) -> Result<Submission, SubmitError>
    where
        S: SubmissionSink + ?Sized,
    {
        let missing = self.missing_required();
        if !missing.is_empty() {
            info!(missing = ?missing, "submission blocked by required fields");
            return Err(SubmitError::MissingRequired(missing));
        }

        let submission = Submission::from_values(&self.values);
        sink.submit(&submission);
        self.reset();
        Ok(submission)
    }

    /// Clears all values.
    pub fn reset(&mut self) {
        self.values.clear();
        self.refresh();
    }

    fn field(&self, key: &str) -> Result<&FieldDescriptor, InputError> {
        self.config
            .field(key)
            .ok_or_else(|| InputError::UnknownField(key.to_string()))
    }

    fn refresh(&mut self) {
        let fields = self.config.fields();
        self.visibility = compute_visibility(fields, &self.values);

        if self.options.hidden_values != HiddenValuePolicy::Clear {
            return;
        }
        // Clearing a value can hide further fields; stop at a fixed point.
        for _ in 0..fields.len() {
            let stale: Vec<String> = self
                .visibility
                .hidden()
                .filter(|key| self.values.contains_key(key))
                .map(str::to_string)
                .collect();
            if stale.is_empty() {
                break;
            }
            for key in &stale {
                debug!(field = %key, "clearing value of hidden field");
                self.values.remove(key);
            }
            self.visibility = compute_visibility(fields, &self.values);
        }
    }
}
