//! Derivation of the effective validation-rule list for each field.
//!
//! Authored `rules` take precedence: when a field supplies an explicit rule
//! list, every entry is passed through untouched and no rule is generated.

use serde::Serialize;
use serde_json::Value;

use crate::schema::types::{FieldKind, FieldSpec};

/// A validation rule handed to the external renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ValidationRule {
    /// The value must be present.
    Required { message: String },
    /// The value must fall inside the declared numeric bounds.
    NumberRange {
        #[serde(skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
        message: String,
    },
    /// The raw value must be parsed into a date before validation.
    DateTransform,
    /// An authored rule, passed through as-is.
    Custom { source: Value },
}

/// Computes the effective rule list for a validated field.
pub fn effective_rules(field: &FieldSpec) -> Vec<ValidationRule> {
    if let Some(authored) = &field.rules {
        return authored
            .iter()
            .map(|rule| ValidationRule::Custom {
                source: rule.clone(),
            })
            .collect();
    }

    let label = field.display_label();
    let mut rules = Vec::new();
    if field.required {
        rules.push(ValidationRule::Required {
            message: format!("{label} is required"),
        });
    }
    match &field.kind {
        FieldKind::Number { min, max, .. } if min.is_some() || max.is_some() => {
            rules.push(ValidationRule::NumberRange {
                min: *min,
                max: *max,
                message: range_message(label, *min, *max),
            });
        }
        FieldKind::Date { .. } => {
            rules.push(ValidationRule::DateTransform);
        }
        _ => {}
    }
    rules
}

fn range_message(label: &str, min: Option<f64>, max: Option<f64>) -> String {
    match (min, max) {
        (Some(min), Some(max)) => format!("{label} must be between {min} and {max}"),
        (Some(min), None) => format!("{label} must be at least {min}"),
        (None, Some(max)) => format!("{label} must be at most {max}"),
        (None, None) => unreachable!("range rule generated without bounds"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldValidator;
    use serde_json::json;

    #[test]
    fn test_required_rule_carries_label() {
        let spec = FieldValidator::validate(&json!({
            "name": "age",
            "label": "Age",
            "type": "number",
            "required": true
        }))
        .unwrap();
        let rules = effective_rules(&spec);
        assert_eq!(
            rules,
            vec![ValidationRule::Required {
                message: "Age is required".to_string()
            }]
        );
    }

    #[test]
    fn test_number_range_rule() {
        let spec = FieldValidator::validate(&json!({
            "name": "age",
            "label": "Age",
            "type": "number",
            "min": 0,
            "max": 150
        }))
        .unwrap();
        let rules = effective_rules(&spec);
        assert_eq!(
            rules,
            vec![ValidationRule::NumberRange {
                min: Some(0.0),
                max: Some(150.0),
                message: "Age must be between 0 and 150".to_string()
            }]
        );
    }

    #[test]
    fn test_date_transform_rule() {
        let spec = FieldValidator::validate(&json!({
            "name": "birth",
            "type": "date"
        }))
        .unwrap();
        assert_eq!(effective_rules(&spec), vec![ValidationRule::DateTransform]);
    }

    #[test]
    fn test_authored_rules_suppress_generated() {
        let spec = FieldValidator::validate(&json!({
            "name": "age",
            "type": "number",
            "required": true,
            "min": 0,
            "max": 150,
            "rules": [{"required": true, "message": "custom"}]
        }))
        .unwrap();
        let rules = effective_rules(&spec);
        assert_eq!(
            rules,
            vec![ValidationRule::Custom {
                source: json!({"required": true, "message": "custom"})
            }]
        );
    }

    #[test]
    fn test_no_rules_for_plain_optional_field() {
        let spec = FieldValidator::validate(&json!({
            "name": "bio",
            "type": "string"
        }))
        .unwrap();
        assert!(effective_rules(&spec).is_empty());
    }
}
