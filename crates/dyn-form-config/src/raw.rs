//! Wire shapes as they appear in configuration JSON, before normalization.

use crate::types::SummaryFormatting;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawField {
    pub key: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub hide_expression: Option<String>,
    #[serde(default, alias = "templateOptions")]
    pub display_options: Option<RawDisplayOptions>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawDisplayOptions {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub required: Option<bool>,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub options: Option<Vec<RawOption>>,
    #[serde(default, rename = "type")]
    pub input_kind: Option<String>,
    #[serde(default)]
    pub summary_section: Option<String>,
    #[serde(default)]
    pub summary_formatting: Option<SummaryFormatting>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawOption {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    pub value: Value,
}
