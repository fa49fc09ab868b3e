//! # Error Types
//!
//! Two distinct error shapes live here and must not be conflated:
//!
//! - [`SchemaError`] is a *validation finding* — a per-pass report that a
//!   document violates the schema (or a host-supplied rule). Findings are
//!   transient, produced in batches, and never abort anything.
//! - [`MetriqError`] is an *operational fault* — the schema literal failed
//!   meta-validation, a pointer could not be parsed, serialization broke.
//!   These are `Result` errors propagated with `?`.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::path::ErrorPath;

/// Category of a validation finding.
///
/// Findings from host-supplied validators are tagged
/// [`ErrorKind::CustomValidation`] and are excluded when deriving the
/// generic validity flag; only [`ErrorKind::Schema`] findings flip it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    /// Structural violation of the parameter schema.
    Schema,
    /// Finding produced by a host-supplied custom validator.
    CustomValidation,
}

/// One validation finding with its location in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaError {
    /// Path from the document root to the violating field.
    pub path: ErrorPath,
    /// Human-readable description of the violation.
    pub message: String,
    /// Whether this finding came from the schema or a custom validator.
    pub kind: ErrorKind,
}

impl SchemaError {
    /// A structural schema finding.
    pub fn schema(path: ErrorPath, message: impl Into<String>) -> Self {
        SchemaError {
            path,
            message: message.into(),
            kind: ErrorKind::Schema,
        }
    }

    /// A finding from a host-supplied validator.
    pub fn custom(path: ErrorPath, message: impl Into<String>) -> Self {
        SchemaError {
            path,
            message: message.into(),
            kind: ErrorKind::CustomValidation,
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Operational fault in the editor stack.
#[derive(Error, Debug)]
pub enum MetriqError {
    /// The static schema failed to compile or did not satisfy the
    /// draft-07 metaschema.
    #[error("schema compile error: {0}")]
    SchemaCompile(String),

    /// A JSON Pointer reported by the validator could not be parsed.
    #[error("malformed JSON pointer: {0:?}")]
    PointerParse(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_display_includes_path() {
        let err = SchemaError::schema(
            ErrorPath::new(["options", "top"]),
            "\"ten\" is not of type \"number\"",
        );
        assert_eq!(err.to_string(), "options.top: \"ten\" is not of type \"number\"");
    }

    #[test]
    fn kinds_are_distinct() {
        let structural = SchemaError::schema(ErrorPath::root(), "missing resourceUri");
        let custom = SchemaError::custom(ErrorPath::root(), "tenant quota exceeded");
        assert_eq!(structural.kind, ErrorKind::Schema);
        assert_eq!(custom.kind, ErrorKind::CustomValidation);
        assert_ne!(structural.kind, custom.kind);
    }

    #[test]
    fn error_kind_serializes_camel_case() {
        let json = serde_json::to_string(&ErrorKind::CustomValidation).unwrap();
        assert_eq!(json, "\"customValidation\"");
    }
}
