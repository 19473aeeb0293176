//! Dynamic forms driven by a declarative JSON configuration.
//!
//! A [`FormSession`] owns the value map for one [`FormConfig`]. Every input
//! change goes through [`FormSession::handle_input_change`], which validates
//! the value against the field type, stores it and re-evaluates visibility
//! for all fields. [`FormSession::view`] turns the visible fields into a
//! toolkit-neutral [`FormView`] laid out in rows of two, and
//! [`FormSession::submit`] hands the values to a [`SubmissionSink`] and
//! resets the form.
//!
//! # Example
//!
//! ```
//! use dyn_form::{FormConfig, FormSession, FormValue, LogSink};
//!
//! let config = FormConfig::from_json_str(r#"{ "fields": [
//!     { "key": "NAME", "type": "text-input" },
//!     { "key": "AGE", "type": "text-input", "hideExpression": "formData.NAME !== 'skip'" }
//! ] }"#).unwrap();
//!
//! let mut session = FormSession::new(config);
//! assert!(!session.is_visible("AGE"));
//!
//! session.handle_input_change("NAME", FormValue::Text("skip".into())).unwrap();
//! assert!(session.is_visible("AGE"));
//!
//! let submitted = session.submit(&mut LogSink).unwrap();
//! assert_eq!(submitted.get("NAME"), Some(&serde_json::json!("skip")));
//! assert!(session.values().is_empty());
//! ```

pub mod dispatch;
pub mod error;
pub mod layout;
pub mod options;
pub mod preview;
pub mod session;
pub mod submission;
pub mod summary;
pub mod text;
pub mod value;
pub mod view;
pub mod visibility;

pub use dyn_form_config::{ConfigError, FieldDescriptor, FieldOption, FieldType, FormConfig};
pub use error::{InputError, SubmitError};
pub use options::{HiddenValuePolicy, SessionOptions, UnsupportedFieldPolicy};
pub use preview::ConfigPreview;
pub use session::FormSession;
pub use submission::{CollectSink, LogSink, Submission, SubmissionSink};
pub use value::{FileHandle, FormValue, FormValues};
pub use view::{Control, FieldView, FormView, OptionView, RowView};
pub use visibility::{compute_visibility, evaluate_hide_rule, ExpressionFailure, FormScope, VisibilityMap};
