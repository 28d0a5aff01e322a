//! formspec — schema validation and resolution engine for JSON-described
//! forms.
//!
//! Takes an untyped JSON document describing a form (field names, types,
//! nesting, validation rules, layout hints), verifies it against a recursive
//! type grammar, and resolves it into a tree of renderable field descriptors
//! with inherited defaults, computed validation rules, and layout spans. The
//! engine validates and resolves only; rendering, submission, and transport
//! belong to external collaborators.
//!
//! ```
//! use formspec::SchemaEngine;
//!
//! let raw = r#"{
//!     "fields": [
//!         {"name": "age", "type": "number", "min": 0, "max": 150, "defaultValue": 25}
//!     ]
//! }"#;
//! let form = SchemaEngine::new().resolve(raw).unwrap();
//! assert_eq!(form.initial_values["age"], serde_json::json!(25));
//! ```

pub mod engine;
pub mod resolver;
pub mod schema;

pub use engine::{ResolvedField, ResolvedForm, SchemaEngine};
pub use resolver::ValidationRule;
pub use schema::types::{
    CardConfig, CardSize, FieldKind, FieldSpec, FieldType, FormSchema, LayoutConfig, OptionValue,
    SchemaError, SelectMode, SelectOption,
};
pub use schema::FieldValidator;
