//! Submitted records and where they go.

use crate::error::InputError;
use crate::value::{FormValue, FormValues};
use dyn_form_config::FormConfig;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::info;

/// The plain `{ key: value }` record produced by a submit.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Submission {
    record: Map<String, Value>,
}

impl Submission {
    pub fn new(record: Map<String, Value>) -> Self {
        Self { record }
    }

    pub fn from_values(values: &FormValues) -> Self {
        Self {
            record: values.to_json(),
        }
    }

    pub fn record(&self) -> &Map<String, Value> {
        &self.record
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.record.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.record.is_empty()
    }

    pub fn into_record(self) -> Map<String, Value> {
        self.record
    }

    pub fn to_json_string(&self) -> String {
        Value::Object(self.record.clone()).to_string()
    }

    /// Reads the record back into typed values using each field's type.
    pub fn to_values(&self, config: &FormConfig) -> Result<FormValues, InputError> {
        let mut values = FormValues::new();
        for (key, json) in &self.record {
            let field = config
                .field(key)
                .ok_or_else(|| InputError::UnknownField(key.clone()))?;
            values.insert(key.clone(), FormValue::from_json_for(field, json)?);
        }
        Ok(values)
    }
}

/// Receiver of submitted records, supplied by the embedding application.
pub trait SubmissionSink {
    fn submit(&mut self, submission: &Submission);
}

impl<F: FnMut(&Submission)> SubmissionSink for F {
    fn submit(&mut self, submission: &Submission) {
        self(submission)
    }
}

/// Logs each submission and discards it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl SubmissionSink for LogSink {
    fn submit(&mut self, submission: &Submission) {
        info!(
            fields = submission.record.len(),
            record = %submission.to_json_string(),
            "form submitted"
        );
    }
}

/// Keeps every submission in memory.
#[derive(Debug, Clone, Default)]
pub struct CollectSink {
    pub submissions: Vec<Submission>,
}

impl SubmissionSink for CollectSink {
    fn submit(&mut self, submission: &Submission) {
        self.submissions.push(submission.clone());
    }
}
