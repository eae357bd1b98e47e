//! Error types for pagesource library.
//!
//! Pipeline failures (missing fields, unsupported blocks, ...) are reported as
//! [`PipelineError`] values through the [`Outcome`](crate::Outcome) channel.
//! This module covers everything around the pipeline: loading fixtures and
//! rule sets, building rules, and serializing output.

use std::io;
use thiserror::Error;

use crate::report::PipelineError;
use crate::schema::{PropertyKind, ValueType};

/// Result type alias for pagesource operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur outside the pipeline's failure channel.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed JSON input (fixtures, rule sets).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A fallback value does not match the domain type of its rule.
    #[error("Fallback for `{field}` must be a {expected} value for `{kind}` fields, got {found}")]
    InvalidFallback {
        /// Source field name of the rule
        field: String,
        /// Kind of the rule
        kind: PropertyKind,
        /// Domain type the kind produces
        expected: ValueType,
        /// Domain type of the rejected fallback
        found: ValueType,
    },

    /// A rule set names a field kind that does not exist.
    #[error("Unknown field kind: {0}")]
    UnknownKind(String),

    /// A rule set maps a field to a name typed records use for their own keys.
    #[error("Field name `{0}` is reserved for typed records")]
    ReservedFieldName(String),

    /// Error during rendering (Markdown, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// A pipeline failure surfaced through the general error type.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownKind("formula".to_string());
        assert_eq!(err.to_string(), "Unknown field kind: formula");

        let err = Error::InvalidFallback {
            field: "Featured".to_string(),
            kind: PropertyKind::Checkbox,
            expected: ValueType::Bool,
            found: ValueType::String,
        };
        assert_eq!(
            err.to_string(),
            "Fallback for `Featured` must be a bool value for `checkbox` fields, got string"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
