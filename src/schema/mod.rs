//! Schema grammar, field validation, and value conformance checks.

pub mod date;
pub mod types;
pub mod validator;
pub mod value;

pub use types::SchemaError;
pub use validator::FieldValidator;

/// Result type for schema verification operations
pub type Result<T> = std::result::Result<T, SchemaError>;
