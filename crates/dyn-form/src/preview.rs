//! Live preview behind a JSON configuration editor.

use crate::options::SessionOptions;
use crate::session::FormSession;
use dyn_form_config::{ConfigError, FormConfig};
use serde_json::Value;
use tracing::{info, warn};

/// Holds the most recent valid form and the most recent load error.
///
/// A failed load never replaces the session that is being previewed; it
/// only records the error for display until the next successful load.
#[derive(Debug, Clone, Default)]
pub struct ConfigPreview {
    options: SessionOptions,
    session: Option<FormSession>,
    last_error: Option<ConfigError>,
}

impl ConfigPreview {
    pub fn new(options: SessionOptions) -> Self {
        Self {
            options,
            session: None,
            last_error: None,
        }
    }

    /// Loads the editor's text buffer.
    pub fn apply_text(&mut self, text: &str) -> Result<(), ConfigError> {
        self.apply(FormConfig::from_json_str(text))
    }

    /// Loads an editor document that is already structured JSON.
    pub fn apply_value(&mut self, value: Value) -> Result<(), ConfigError> {
        self.apply(FormConfig::from_value(value))
    }

    fn apply(&mut self, loaded: Result<FormConfig, ConfigError>) -> Result<(), ConfigError> {
        match loaded {
            Ok(config) => {
                info!(fields = config.len(), "preview updated");
                self.session = Some(FormSession::with_options(config, self.options));
                self.last_error = None;
                Ok(())
            }
            Err(error) => {
                warn!(%error, kept_previous = self.session.is_some(), "configuration rejected");
                self.last_error = Some(error.clone());
                Err(error)
            }
        }
    }

    pub fn session(&self) -> Option<&FormSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut FormSession> {
        self.session.as_mut()
    }

    pub fn last_error(&self) -> Option<&ConfigError> {
        self.last_error.as_ref()
    }

    /// Message for the editor's error banner.
    pub fn error_message(&self) -> Option<String> {
        self.last_error
            .as_ref()
            .map(|e| format!("Invalid form configuration: {e}"))
    }
}
