//! Extraction and merging of schema-declared default values.
//!
//! Produces a flat initial-value mapping keyed by field path. Two behaviors
//! here are contractual with downstream renderers and must not change:
//!
//! * Object-field property defaults are flattened one level up into the same
//!   mapping as sibling fields, under the property's own key — they are NOT
//!   namespaced under the object field's name. The object field itself
//!   contributes no entry under its own name.
//! * Date defaults are converted to their parsed representation. A default
//!   that fails to parse is dropped (fail closed), never an error.

use log::warn;
use serde_json::{Map, Value};

use crate::schema::date::parse_date;
use crate::schema::types::{FieldKind, FieldSpec, FieldType, FormSchema};

/// Collects the flat initial-value mapping declared by a schema.
pub fn initial_values(schema: &FormSchema) -> Map<String, Value> {
    let mut values = Map::new();
    for field in &schema.fields {
        collect_field(field, &mut values);
    }
    values
}

/// Collects schema defaults, then applies caller-supplied overrides on top.
/// Overrides win key-by-key (shallow merge).
pub fn merge_initial_values(
    schema: &FormSchema,
    overrides: &Map<String, Value>,
) -> Map<String, Value> {
    let mut values = initial_values(schema);
    for (key, value) in overrides {
        values.insert(key.clone(), value.clone());
    }
    values
}

fn collect_field(field: &FieldSpec, values: &mut Map<String, Value>) {
    if let FieldKind::Object { properties } = &field.kind {
        // Property defaults merge one level up; the object's own default is
        // intentionally not emitted under its own name.
        for (key, prop) in properties {
            if let Some(default) = &prop.default_value {
                insert_converted(values, key, default, prop);
            }
        }
        return;
    }
    if let Some(default) = &field.default_value {
        insert_converted(values, &field.name, default, field);
    }
}

fn insert_converted(values: &mut Map<String, Value>, key: &str, default: &Value, spec: &FieldSpec) {
    if spec.field_type() == FieldType::Date {
        match default.as_str().and_then(parse_date) {
            Some(parsed) => {
                values.insert(key.to_string(), Value::String(parsed.to_rfc3339()));
            }
            None => {
                warn!("Dropping unparseable date default for field '{key}'");
            }
        }
        return;
    }
    values.insert(key.to_string(), default.clone());
}
