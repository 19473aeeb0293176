use dyn_form_config::{ConfigError, FieldOption, FieldType, FormConfig, HideRule};
use form_expression::ParseError;
use serde_json::json;

fn application_form() -> serde_json::Value {
    json!({
        "fields": [
            {
                "key": "APPLICANT_LAST_NAME",
                "type": "custom-input",
                "className": "col-span-1",
                "templateOptions": {
                    "type": "text",
                    "required": true,
                    "label": "Last name",
                    "placeholder": "Enter last name",
                    "summarySection": "APPLICANT_DETAILS"
                }
            },
            {
                "key": "EMAIL",
                "type": "custom-input",
                "templateOptions": { "type": "email", "label": "Email Address" }
            },
            {
                "key": "DATE_OF_BIRTH",
                "type": "custom-date",
                "templateOptions": {
                    "label": "Date of Birth",
                    "required": true,
                    "summaryFormatting": { "dateFormat": "DD/MM/YYYY", "formatType": "DATE" }
                }
            },
            {
                "key": "DOCUMENT_TYPE",
                "type": "custom-select",
                "templateOptions": {
                    "label": "Identification document type",
                    "options": [
                        { "name": "Rwanda National ID", "value": "RWANDA_NATIONAL_ID" },
                        { "name": "Passport", "value": "PASSPORT" },
                        { "label": "NPR Application Number", "value": "NPR_APPLICATION_NUMBER" },
                        { "value": 7 }
                    ],
                    "summaryFormatting": {
                        "useLabel": "Document",
                        "formatType": "STANDARD_OPTIONS",
                        "collapse": true
                    }
                }
            },
            {
                "key": "PASSPORT_NUMBER",
                "type": "text-input",
                "hideExpression": "formData.DOCUMENT_TYPE !== 'PASSPORT'",
                "displayOptions": { "label": "Passport number" }
            }
        ]
    })
}

#[test]
fn test_normalizes_application_form() {
    let config = FormConfig::from_value(application_form()).unwrap();
    assert_eq!(config.len(), 5);

    let last_name = config.field("APPLICANT_LAST_NAME").unwrap();
    assert_eq!(last_name.field_type, FieldType::TextInput);
    assert_eq!(last_name.class_name.as_deref(), Some("col-span-1"));
    assert!(last_name.display.required);
    assert_eq!(last_name.display.placeholder.as_deref(), Some("Enter last name"));
    assert_eq!(
        last_name.display.summary_section.as_deref(),
        Some("APPLICANT_DETAILS")
    );

    assert_eq!(config.field("EMAIL").unwrap().display.input_kind, "email");

    let dob = config.field("DATE_OF_BIRTH").unwrap();
    assert_eq!(dob.field_type, FieldType::DatePicker);
    let formatting = dob.display.summary_formatting.as_ref().unwrap();
    assert_eq!(formatting.date_format.as_deref(), Some("DD/MM/YYYY"));
    assert_eq!(formatting.format_type.as_deref(), Some("DATE"));
}

#[test]
fn test_option_order_and_name_fallback() {
    let config = FormConfig::from_value(application_form()).unwrap();
    let doc = config.field("DOCUMENT_TYPE").unwrap();
    assert_eq!(
        doc.display.options,
        vec![
            FieldOption::new("Rwanda National ID", "RWANDA_NATIONAL_ID"),
            FieldOption::new("Passport", "PASSPORT"),
            FieldOption::new("NPR Application Number", "NPR_APPLICATION_NUMBER"),
            FieldOption::new("7", "7"),
        ]
    );
    assert_eq!(doc.display.option_name("PASSPORT"), Some("Passport"));

    let formatting = doc.display.summary_formatting.as_ref().unwrap();
    assert_eq!(formatting.use_label.as_deref(), Some("Document"));
    assert_eq!(formatting.extra.get("collapse"), Some(&json!(true)));
}

#[test]
fn test_hide_expression_compiled_at_load() {
    let config = FormConfig::from_value(application_form()).unwrap();
    match &config.field("PASSPORT_NUMBER").unwrap().hide {
        Some(HideRule::Compiled { source, expr }) => {
            assert_eq!(source, "formData.DOCUMENT_TYPE !== 'PASSPORT'");
            assert_eq!(expr.field_refs(), vec!["DOCUMENT_TYPE"]);
        }
        other => panic!("expected compiled rule, got {other:?}"),
    }
}

#[test]
fn test_invalid_hide_expression_still_loads() {
    let config = FormConfig::from_value(json!({
        "fields": [
            { "key": "A", "type": "text-input", "hideExpression": "formData.A ==" },
            { "key": "B", "type": "text-input", "hideExpression": "eval('1')" }
        ]
    }))
    .unwrap();
    assert!(matches!(
        config.fields()[0].hide,
        Some(HideRule::Invalid {
            error: ParseError::UnexpectedEnd,
            ..
        })
    ));
    assert!(matches!(
        config.fields()[1].hide,
        Some(HideRule::Invalid {
            error: ParseError::UnknownIdentifier { .. },
            ..
        })
    ));
}

#[test]
fn test_unknown_type_is_kept() {
    let config = FormConfig::from_value(json!({
        "fields": [{ "key": "SIG", "type": "signature-pad" }]
    }))
    .unwrap();
    assert_eq!(
        config.fields()[0].field_type,
        FieldType::Unsupported("signature-pad".into())
    );
}

#[test]
fn test_trailing_comma_is_parse_error() {
    let err = FormConfig::from_json_str(r#"{ "fields": [ { "key": "A", "type": "checkbox" }, ] }"#)
        .unwrap_err();
    match err {
        ConfigError::Parse { line, column, message } => {
            assert_eq!(line, 1);
            assert!(column > 0);
            assert!(!message.contains(" at line "), "message: {message}");
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_structural_errors() {
    assert_eq!(
        FormConfig::from_json_str("[]").unwrap_err(),
        ConfigError::NotAnObject
    );
    assert_eq!(
        FormConfig::from_json_str("{}").unwrap_err(),
        ConfigError::MissingFields
    );
    assert_eq!(
        FormConfig::from_json_str(r#"{"fields": {}}"#).unwrap_err(),
        ConfigError::FieldsNotArray
    );
    assert!(matches!(
        FormConfig::from_json_str(r#"{"fields": [{"type": "checkbox"}]}"#).unwrap_err(),
        ConfigError::InvalidField { index: 0, .. }
    ));
    assert!(matches!(
        FormConfig::from_value(json!({
            "fields": [{ "key": "A", "type": "select", "options": [{ "value": {} }] }]
        }))
        .unwrap_err(),
        ConfigError::InvalidField { index: 0, .. }
    ));
}

#[test]
fn test_duplicate_and_empty_keys_rejected() {
    let err = FormConfig::from_value(json!({
        "fields": [
            { "key": "A", "type": "checkbox" },
            { "key": "B", "type": "checkbox" },
            { "key": "A", "type": "text-input" }
        ]
    }))
    .unwrap_err();
    assert_eq!(
        err,
        ConfigError::DuplicateKey {
            key: "A".into(),
            first: 0,
            second: 2
        }
    );
    assert_eq!(
        err.to_string(),
        "Duplicate field key \"A\" (fields #0 and #2)"
    );

    let err = FormConfig::from_value(json!({
        "fields": [{ "key": "", "type": "checkbox" }]
    }))
    .unwrap_err();
    assert_eq!(err, ConfigError::EmptyKey { index: 0 });
}

#[test]
fn test_from_reader() {
    let text = br#"{"fields": [{"key": "NOTES", "type": "textarea"}]}"#;
    let config = FormConfig::from_reader(&text[..]).unwrap();
    assert_eq!(config.fields()[0].field_type, FieldType::TextArea);
}
