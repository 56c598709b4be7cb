use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Cannot descend into '{segment}': expected {expected}, found {found}")]
    PathTraversal {
        segment: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Cannot assign {value} to identifier of type {kind}")]
    TypeMismatch { value: String, kind: &'static str },

    #[error("Deserialization error: {0}")]
    Deserialization(#[source] serde_json::Error),

    #[error("Invalid JSON response body: {0}")]
    InvalidJson(#[source] serde_json::Error),
}

impl Error {
    /// Whether the error only affects a single fragment of a batch
    pub fn is_per_fragment(&self) -> bool {
        matches!(self, Error::TypeMismatch { .. } | Error::Deserialization(_))
    }
}

/// Name of a JSON value's kind, used in traversal diagnostics
pub fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
