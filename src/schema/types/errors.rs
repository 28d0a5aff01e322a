//! Error taxonomy for schema verification and resolution.

use thiserror::Error;

/// Errors produced while verifying or resolving a form schema.
///
/// Every failure is reported as a value; nothing panics across the engine
/// boundary. Field-level errors carry the dotted path at which validation
/// stopped (`name`, `parent.property`, or `arrayField.items`).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    /// The input text is not valid JSON.
    #[error("Invalid JSON format")]
    MalformedInput,

    /// The top-level document or its `layout` block has the wrong shape.
    #[error("{0}")]
    Shape(String),

    /// A specific field failed grammar checks.
    #[error("{path}: {message}")]
    Field { path: String, message: String },

    /// A default value does not conform to its field's declared type.
    #[error("{path}: {message}")]
    Value { path: String, message: String },
}

impl SchemaError {
    /// Builds a field-level error at the given path.
    pub fn field(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Field {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Builds a default-value conformance error at the given path.
    pub fn value(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Value {
            path: path.into(),
            message: message.into(),
        }
    }

    /// The field path the error points at, when it has one.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Field { path, .. } | Self::Value { path, .. } => Some(path),
            Self::MalformedInput | Self::Shape(_) => None,
        }
    }
}
