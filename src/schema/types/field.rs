//! The field-type grammar: the closed set of field variants a form schema
//! may declare, and the validated descriptor type built from authored JSON.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::schema::types::CardConfig;

/// Closed enumeration of supported field types. No runtime extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Longtext,
    Number,
    Checkbox,
    Radio,
    Select,
    Upload,
    Array,
    Object,
    Date,
    Json,
}

impl FieldType {
    /// All field types, in canonical order. The order is load-bearing: the
    /// unknown-type error message enumerates this list verbatim.
    pub const ALL: [FieldType; 11] = [
        FieldType::String,
        FieldType::Longtext,
        FieldType::Number,
        FieldType::Checkbox,
        FieldType::Radio,
        FieldType::Select,
        FieldType::Upload,
        FieldType::Array,
        FieldType::Object,
        FieldType::Date,
        FieldType::Json,
    ];

    /// Parses an authored type string into a member of the closed set.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "string" => Some(Self::String),
            "longtext" => Some(Self::Longtext),
            "number" => Some(Self::Number),
            "checkbox" => Some(Self::Checkbox),
            "radio" => Some(Self::Radio),
            "select" => Some(Self::Select),
            "upload" => Some(Self::Upload),
            "array" => Some(Self::Array),
            "object" => Some(Self::Object),
            "date" => Some(Self::Date),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Longtext => "longtext",
            Self::Number => "number",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Select => "select",
            Self::Upload => "upload",
            Self::Array => "array",
            Self::Object => "object",
            Self::Date => "date",
            Self::Json => "json",
        }
    }

    /// The comma-separated canonical type list, used in error messages.
    pub fn canonical_list() -> String {
        Self::ALL
            .iter()
            .map(FieldType::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single `{label, value}` choice for `radio` and `select` fields.
///
/// Values may be strings or numbers. Duplicate values are structurally legal;
/// no uniqueness constraint is enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: OptionValue,
}

/// The value carried by a select/radio option: a string or a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    String(String),
    Number(f64),
}

impl OptionValue {
    /// Reads an option value out of raw JSON, rejecting anything that is not
    /// a string or a number.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::String(s.clone())),
            Value::Number(n) => n.as_f64().map(Self::Number),
            _ => None,
        }
    }

    /// Whether a raw JSON value equals this option value.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::String(s), Value::String(v)) => s == v,
            (Self::Number(n), Value::Number(v)) => v.as_f64() == Some(*n),
            _ => false,
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Self::String(s) => Value::String(s.clone()),
            Self::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
        }
    }
}

/// Selection mode for `select` fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectMode {
    Multiple,
    Tags,
}

impl SelectMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "multiple" => Some(Self::Multiple),
            "tags" => Some(Self::Tags),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Multiple => "multiple",
            Self::Tags => "tags",
        }
    }
}

/// Type-specific payload of a validated field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    String {
        min_length: Option<u64>,
        max_length: Option<u64>,
    },
    LongText {
        min_length: Option<u64>,
        max_length: Option<u64>,
        rows: Option<u64>,
    },
    Number {
        min: Option<f64>,
        max: Option<f64>,
        step: Option<f64>,
    },
    Checkbox,
    Radio {
        options: Vec<SelectOption>,
    },
    Select {
        options: Vec<SelectOption>,
        mode: Option<SelectMode>,
    },
    Upload {
        multiple: Option<bool>,
        max_count: Option<u64>,
        accept: Option<String>,
        max_size: Option<f64>,
    },
    /// A homogeneous list; `items` describes the shape of each element.
    /// Nested arrays are rejected during validation.
    Array {
        items: Box<FieldSpec>,
    },
    /// A group of named sub-fields. Property order is authored order.
    Object {
        properties: Vec<(String, FieldSpec)>,
    },
    Date {
        format: Option<String>,
    },
    Json,
}

impl FieldKind {
    pub fn field_type(&self) -> FieldType {
        match self {
            Self::String { .. } => FieldType::String,
            Self::LongText { .. } => FieldType::Longtext,
            Self::Number { .. } => FieldType::Number,
            Self::Checkbox => FieldType::Checkbox,
            Self::Radio { .. } => FieldType::Radio,
            Self::Select { .. } => FieldType::Select,
            Self::Upload { .. } => FieldType::Upload,
            Self::Array { .. } => FieldType::Array,
            Self::Object { .. } => FieldType::Object,
            Self::Date { .. } => FieldType::Date,
            Self::Json => FieldType::Json,
        }
    }

    /// Declared options for select/radio kinds.
    pub fn options(&self) -> Option<&[SelectOption]> {
        match self {
            Self::Radio { options } | Self::Select { options, .. } => Some(options),
            _ => None,
        }
    }
}

/// A structurally verified description of one form field.
///
/// Produced only by the validator; once built it can be trusted without
/// re-checking types. Deeply immutable: resolution never mutates a spec.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    /// Display label. Falls back to `name` in generated messages when absent.
    pub label: Option<String>,
    pub required: bool,
    /// Authored validation rules, passed through untouched. When present they
    /// suppress every engine-generated rule for this field.
    pub rules: Option<Vec<Value>>,
    pub placeholder: Option<String>,
    /// Layout hint: force this field to start a new row.
    pub newline: bool,
    /// Visual grouping metadata. Carries no validation semantics.
    pub card: Option<CardConfig>,
    /// The default value exactly as authored.
    pub default_value: Option<Value>,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub fn field_type(&self) -> FieldType {
        self.kind.field_type()
    }

    /// Label for human-readable messages, falling back to the field name.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    /// Re-serializes the spec into its authored JSON shape.
    ///
    /// The output validates to the same verdict as the input it was built
    /// from, so a validated spec can be fed through the validator again.
    pub fn to_value(&self) -> Value {
        let mut m = Map::new();
        m.insert("name".into(), Value::String(self.name.clone()));
        if let Some(label) = &self.label {
            m.insert("label".into(), Value::String(label.clone()));
        }
        m.insert(
            "type".into(),
            Value::String(self.field_type().as_str().to_string()),
        );
        if self.required {
            m.insert("required".into(), Value::Bool(true));
        }
        if let Some(placeholder) = &self.placeholder {
            m.insert("placeholder".into(), Value::String(placeholder.clone()));
        }
        if self.newline {
            m.insert("newline".into(), Value::Bool(true));
        }
        if let Some(card) = &self.card {
            if let Ok(card) = serde_json::to_value(card) {
                m.insert("card".into(), card);
            }
        }
        if let Some(rules) = &self.rules {
            m.insert("rules".into(), Value::Array(rules.clone()));
        }
        self.kind_entries(&mut m);
        if let Some(default) = &self.default_value {
            m.insert("defaultValue".into(), default.clone());
        }
        Value::Object(m)
    }

    fn kind_entries(&self, m: &mut Map<String, Value>) {
        match &self.kind {
            FieldKind::String {
                min_length,
                max_length,
            } => {
                insert_u64(m, "minLength", *min_length);
                insert_u64(m, "maxLength", *max_length);
            }
            FieldKind::LongText {
                min_length,
                max_length,
                rows,
            } => {
                insert_u64(m, "minLength", *min_length);
                insert_u64(m, "maxLength", *max_length);
                insert_u64(m, "rows", *rows);
            }
            FieldKind::Number { min, max, step } => {
                insert_f64(m, "min", *min);
                insert_f64(m, "max", *max);
                insert_f64(m, "step", *step);
            }
            FieldKind::Checkbox | FieldKind::Json => {}
            FieldKind::Radio { options } => {
                m.insert("options".into(), options_value(options));
            }
            FieldKind::Select { options, mode } => {
                m.insert("options".into(), options_value(options));
                if let Some(mode) = mode {
                    m.insert("mode".into(), Value::String(mode.as_str().to_string()));
                }
            }
            FieldKind::Upload {
                multiple,
                max_count,
                accept,
                max_size,
            } => {
                if let Some(multiple) = multiple {
                    m.insert("multiple".into(), Value::Bool(*multiple));
                }
                insert_u64(m, "maxCount", *max_count);
                if let Some(accept) = accept {
                    m.insert("accept".into(), Value::String(accept.clone()));
                }
                insert_f64(m, "maxSize", *max_size);
            }
            FieldKind::Array { items } => {
                m.insert("items".into(), items.to_value());
            }
            FieldKind::Object { properties } => {
                let props: Map<String, Value> = properties
                    .iter()
                    .map(|(key, spec)| (key.clone(), spec.to_value()))
                    .collect();
                m.insert("properties".into(), Value::Object(props));
            }
            FieldKind::Date { format } => {
                if let Some(format) = format {
                    m.insert("format".into(), Value::String(format.clone()));
                }
            }
        }
    }
}

impl Serialize for FieldSpec {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_value().serialize(serializer)
    }
}

fn insert_u64(m: &mut Map<String, Value>, key: &str, value: Option<u64>) {
    if let Some(v) = value {
        m.insert(key.into(), Value::Number(v.into()));
    }
}

fn insert_f64(m: &mut Map<String, Value>, key: &str, value: Option<f64>) {
    if let Some(v) = value {
        if let Some(n) = serde_json::Number::from_f64(v) {
            m.insert(key.into(), Value::Number(n));
        }
    }
}

fn options_value(options: &[SelectOption]) -> Value {
    Value::Array(
        options
            .iter()
            .map(|opt| {
                let mut o = Map::new();
                o.insert("label".into(), Value::String(opt.label.clone()));
                o.insert("value".into(), opt.value.to_json());
                Value::Object(o)
            })
            .collect(),
    )
}
