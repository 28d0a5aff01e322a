//! Runtime-type conformance checks for concrete values against a validated
//! field spec.
//!
//! This is intentionally shallower than full field validation: it checks the
//! runtime type implied by a field's declared type, descending at most one
//! level into object-shaped values (each entry is scalar-checked against its
//! matching property; nothing recurses deeper). It is used to vet
//! default-value elements (array defaults, object default entries).

use serde_json::Value;

use crate::schema::types::{FieldKind, FieldSpec};

/// Checks that a concrete value matches the runtime type implied by the
/// field's declared type. Returns a human-readable reason on mismatch.
pub fn validate_value(value: &Value, spec: &FieldSpec) -> Result<(), String> {
    if let Some(reason) = scalar_mismatch(value, &spec.kind) {
        return Err(reason);
    }
    if let FieldKind::Object { properties } = &spec.kind {
        let obj = value
            .as_object()
            .ok_or_else(|| "Value must be an object".to_string())?;
        for (key, prop) in properties {
            if let Some(entry) = obj.get(key) {
                if let Some(reason) = scalar_mismatch(entry, &prop.kind) {
                    return Err(format!("Invalid value for property {key}: {reason}"));
                }
            }
        }
    }
    Ok(())
}

/// Scalar-type conformance only. Complex kinds (upload, array, object, date,
/// json) are accepted at this depth; their structure is vetted where the
/// field is declared.
fn scalar_mismatch(value: &Value, kind: &FieldKind) -> Option<String> {
    match kind {
        FieldKind::String { .. } | FieldKind::LongText { .. } => {
            (!value.is_string()).then(|| "Value must be a string".to_string())
        }
        FieldKind::Number { .. } => {
            (!value.is_number()).then(|| "Value must be a number".to_string())
        }
        FieldKind::Checkbox => {
            (!value.is_boolean()).then(|| "Value must be a boolean".to_string())
        }
        FieldKind::Radio { options } | FieldKind::Select { options, .. } => {
            let member = options.iter().any(|opt| opt.value.matches(value));
            (!member).then(|| "Invalid option value".to_string())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types::{OptionValue, SelectOption};
    use serde_json::json;

    fn spec(kind: FieldKind) -> FieldSpec {
        FieldSpec {
            name: "f".to_string(),
            label: None,
            required: false,
            rules: None,
            placeholder: None,
            newline: false,
            card: None,
            default_value: None,
            kind,
        }
    }

    fn string_spec() -> FieldSpec {
        spec(FieldKind::String {
            min_length: None,
            max_length: None,
        })
    }

    #[test]
    fn test_string_value() {
        let s = string_spec();
        assert!(validate_value(&json!("x"), &s).is_ok());
        assert_eq!(
            validate_value(&json!(5), &s),
            Err("Value must be a string".to_string())
        );
    }

    #[test]
    fn test_number_value() {
        let s = spec(FieldKind::Number {
            min: None,
            max: None,
            step: None,
        });
        assert!(validate_value(&json!(3.5), &s).is_ok());
        assert!(validate_value(&json!("3.5"), &s).is_err());
    }

    #[test]
    fn test_checkbox_value() {
        let s = spec(FieldKind::Checkbox);
        assert!(validate_value(&json!(true), &s).is_ok());
        assert!(validate_value(&json!(0), &s).is_err());
    }

    #[test]
    fn test_select_membership() {
        let s = spec(FieldKind::Select {
            options: vec![SelectOption {
                label: "A".to_string(),
                value: OptionValue::String("a".to_string()),
            }],
            mode: None,
        });
        assert!(validate_value(&json!("a"), &s).is_ok());
        assert_eq!(
            validate_value(&json!("b"), &s),
            Err("Invalid option value".to_string())
        );
    }

    #[test]
    fn test_object_value_checked_one_level() {
        let s = spec(FieldKind::Object {
            properties: vec![("value".to_string(), string_spec())],
        });
        assert!(validate_value(&json!({"value": "x"}), &s).is_ok());
        assert_eq!(
            validate_value(&json!({"value": 5}), &s),
            Err("Invalid value for property value: Value must be a string".to_string())
        );
        assert_eq!(
            validate_value(&json!("not an object"), &s),
            Err("Value must be an object".to_string())
        );
    }

    #[test]
    fn test_object_value_does_not_recurse_deeper() {
        // A nested object property is accepted whatever its contents; the
        // check is one level deep only.
        let inner = spec(FieldKind::Object {
            properties: vec![("leaf".to_string(), string_spec())],
        });
        let s = spec(FieldKind::Object {
            properties: vec![("nested".to_string(), inner)],
        });
        assert!(validate_value(&json!({"nested": {"leaf": 5}}), &s).is_ok());
    }

    #[test]
    fn test_deep_kinds_accept_any_value() {
        let s = spec(FieldKind::Json);
        assert!(validate_value(&json!({"anything": [1, 2]}), &s).is_ok());
    }
}
