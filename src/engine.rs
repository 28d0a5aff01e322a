//! The schema engine facade: raw JSON text in, resolved field-descriptor
//! tree plus initial values out.
//!
//! The engine is pure and stateless. Re-invoking it with the same text
//! always yields the same result; nothing caller-visible is mutated on
//! failure and no partial tree is ever emitted.

use log::{debug, info};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashSet;

use crate::resolver::{
    column_span, effective_rules, item_property_span, merge_initial_values, ValidationRule,
    FULL_SPAN,
};
use crate::schema::types::{FieldKind, FieldSpec, FormSchema, LayoutConfig, SchemaError};
use crate::schema::{FieldValidator, Result};

/// A field descriptor ready for an external renderer: the validated spec
/// plus its absolute path, effective rules, column span, and initial value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedField {
    /// Absolute dotted path (`name`, `parent.property`, `arrayField.items`).
    pub path: String,
    pub spec: FieldSpec,
    pub rules: Vec<ValidationRule>,
    /// Effective column span on a 24-unit grid row.
    pub span: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_value: Option<Value>,
    /// Resolved object properties or the array item shape, in order.
    pub children: Vec<ResolvedField>,
}

/// The complete output of one resolution pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedForm {
    /// Resolved fields in authored order (rendering order).
    pub fields: Vec<ResolvedField>,
    /// Effective layout configuration (defaults applied).
    pub layout: LayoutConfig,
    /// Flat initial-value mapping keyed by field path.
    pub initial_values: Map<String, Value>,
}

/// Validates raw schema text and resolves it into renderer instructions.
#[derive(Default)]
pub struct SchemaEngine;

impl SchemaEngine {
    /// Creates a new schema engine.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Resolves raw schema text into a descriptor tree and initial values.
    ///
    /// # Errors
    /// Returns a `SchemaError` if:
    /// - The text is not valid JSON
    /// - The top-level shape or layout block is malformed
    /// - Any field fails grammar checks (first failure wins)
    pub fn resolve(&self, raw: &str) -> Result<ResolvedForm> {
        self.resolve_with_values(raw, &Map::new())
    }

    /// Like [`resolve`](Self::resolve), with caller-supplied initial values
    /// merged over schema defaults. Caller values win key-by-key.
    ///
    /// # Errors
    /// Same conditions as [`resolve`](Self::resolve).
    pub fn resolve_with_values(
        &self,
        raw: &str,
        overrides: &Map<String, Value>,
    ) -> Result<ResolvedForm> {
        debug!("Resolving form schema ({} bytes)", raw.len());
        let doc: Value = serde_json::from_str(raw).map_err(|_| SchemaError::MalformedInput)?;
        let schema = Self::verify(&doc)?;
        let layout = schema.layout.clone().unwrap_or_default();
        let initial_values = merge_initial_values(&schema, overrides);
        let fields = schema
            .fields
            .iter()
            .map(|field| {
                Self::resolve_field(
                    field,
                    &layout,
                    &initial_values,
                    field.name.clone(),
                    FULL_SPAN,
                    Some(&field.name),
                    true,
                    false,
                )
            })
            .collect::<Vec<_>>();
        info!(
            "Schema resolved: {} fields, {} initial values",
            fields.len(),
            initial_values.len()
        );
        Ok(ResolvedForm {
            fields,
            layout,
            initial_values,
        })
    }

    /// Verifies the top-level document shape and every field in order.
    fn verify(doc: &Value) -> Result<FormSchema> {
        let obj = doc
            .as_object()
            .ok_or_else(|| SchemaError::Shape("Schema must be a valid JSON object".to_string()))?;
        let field_nodes = obj.get("fields").and_then(Value::as_array).ok_or_else(|| {
            SchemaError::Shape("Schema must have a fields array".to_string())
        })?;

        let mut fields = Vec::with_capacity(field_nodes.len());
        let mut seen_names = HashSet::new();
        for node in field_nodes {
            let spec = FieldValidator::validate(node)?;
            if !seen_names.insert(spec.name.clone()) {
                return Err(SchemaError::field(
                    &spec.name,
                    format!("Duplicate field name '{}'", spec.name),
                ));
            }
            fields.push(spec);
        }

        let layout = obj.get("layout").map(Self::verify_layout).transpose()?;
        Ok(FormSchema { fields, layout })
    }

    fn verify_layout(node: &Value) -> Result<LayoutConfig> {
        let obj = node
            .as_object()
            .ok_or_else(|| SchemaError::Shape("Layout must be an object".to_string()))?;
        let columns =
            layout_columns(obj, "columns", "Layout columns must be a positive integer")?;
        let mobile_columns = layout_columns(
            obj,
            "mobileColumns",
            "Layout mobileColumns must be a positive integer",
        )?;
        let gutter = match obj.get("gutter") {
            None => None,
            Some(v) => {
                let pair = v.as_array().filter(|arr| arr.len() == 2).and_then(|arr| {
                    let h = arr[0].as_u64().and_then(|n| u32::try_from(n).ok())?;
                    let v = arr[1].as_u64().and_then(|n| u32::try_from(n).ok())?;
                    Some((h, v))
                });
                Some(pair.ok_or_else(|| {
                    SchemaError::Shape(
                        "Layout gutter must be an array of two non-negative integers".to_string(),
                    )
                })?)
            }
        };
        Ok(LayoutConfig {
            columns,
            mobile_columns,
            gutter,
        })
    }

    /// Builds one node of the resolved tree.
    ///
    /// `flat_key` is the key this field's initial value lives under in the
    /// flat mapping: the field's own name for top-level fields, the property
    /// key for properties of a top-level object (defaults flatten one level
    /// up), and nothing for anything deeper.
    #[allow(clippy::too_many_arguments)]
    fn resolve_field(
        spec: &FieldSpec,
        layout: &LayoutConfig,
        initial: &Map<String, Value>,
        path: String,
        span: u32,
        flat_key: Option<&str>,
        top_level: bool,
        in_array_item: bool,
    ) -> ResolvedField {
        let rules = effective_rules(spec);
        let initial_value = flat_key.and_then(|key| initial.get(key).cloned());
        let children = match &spec.kind {
            FieldKind::Object { properties } => properties
                .iter()
                .map(|(key, prop)| {
                    let child_span = if in_array_item {
                        item_property_span(prop)
                    } else {
                        column_span(prop, layout)
                    };
                    let child_key = if top_level && !in_array_item {
                        Some(key.as_str())
                    } else {
                        None
                    };
                    Self::resolve_field(
                        prop,
                        layout,
                        initial,
                        format!("{path}.{key}"),
                        child_span,
                        child_key,
                        false,
                        in_array_item,
                    )
                })
                .collect(),
            FieldKind::Array { items } => {
                vec![Self::resolve_field(
                    items,
                    layout,
                    initial,
                    format!("{path}.items"),
                    FULL_SPAN,
                    None,
                    false,
                    true,
                )]
            }
            _ => Vec::new(),
        };
        ResolvedField {
            path,
            spec: spec.clone(),
            rules,
            span,
            initial_value,
            children,
        }
    }
}

fn layout_columns(obj: &Map<String, Value>, key: &str, message: &str) -> Result<Option<u32>> {
    match obj.get(key) {
        None => Ok(None),
        Some(v) => v
            .as_u64()
            .filter(|n| *n >= 1)
            .and_then(|n| u32::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| SchemaError::Shape(message.to_string())),
    }
}
