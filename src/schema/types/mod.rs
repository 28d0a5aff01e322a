//! Core types shared across the schema engine.

mod errors;
mod field;
mod schema;

pub use errors::SchemaError;
pub use field::{FieldKind, FieldSpec, FieldType, OptionValue, SelectMode, SelectOption};
pub use schema::{CardConfig, CardSize, FormSchema, LayoutConfig};
