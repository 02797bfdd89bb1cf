//! Error types for schema parsing and validation.

use thiserror::Error;

/// Error type for schema parsing operations.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON syntax error, or a required field that is missing or ill-typed.
    #[error("JSON schema error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error type for schema validation.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Parsing error.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Declaration with an empty name.
    #[error("declaration #{index} in group '{group}' has an empty name")]
    EmptyName {
        /// Group key.
        group: String,
        /// Position of the declaration in its group.
        index: usize,
    },

    /// Duplicate declaration name.
    #[error("duplicate declaration '{name}' in group '{group}'")]
    DuplicateDeclaration {
        /// Group in which the second definition was found.
        group: String,
        /// Declaration name.
        name: String,
    },

    /// Result column carrying an out/inout binding.
    #[error("column '{column}' of query '{query}' has binding '{binding}'; only parameters may be out or inout")]
    BoundColumn {
        /// Query name.
        query: String,
        /// Column name.
        column: String,
        /// Offending binding.
        binding: String,
    },

    /// Validation error.
    #[error("validation error: {message}")]
    Validation {
        /// Error message.
        message: String,
    },
}

impl SchemaError {
    /// Creates a validation error with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}
