//! Validation error types

use std::fmt;

/// Client input that cannot be accepted as an expense.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Body is not valid JSON or has wrong field types; carries the parser text
    Payload(String),

    /// Create request carried a non-zero id
    IdAssigned { id: i64 },

    /// Path segment is not an integer
    PathId { raw: String },
}

impl ValidationError {
    /// Bind failure from the JSON parser.
    pub fn payload(err: &serde_json::Error) -> Self {
        Self::Payload(err.to_string())
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Payload(detail) => f.write_str(detail),
            // Both id problems share the client-facing text
            Self::IdAssigned { .. } | Self::PathId { .. } => f.write_str("Field ID is invalid"),
        }
    }
}

impl std::error::Error for ValidationError {}
