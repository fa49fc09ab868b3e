//! # Parameter Validation
//!
//! Compiles the static parameter schema with the `jsonschema` crate and
//! reports violations as structured [`SchemaError`] findings with typed
//! paths.
//!
//! ## Startup Invariant
//!
//! The emitted literal is checked against the draft-07 metaschema before
//! compilation. The schema never changes at runtime, so this check runs
//! once per validator construction; a failure is an operational fault,
//! not a validation finding.

use std::fmt;

use jsonschema::Validator;
use serde_json::Value;

use metriq_core::{ErrorPath, MetriqError, SchemaError};

use crate::params::parameter_schema_value;

/// Validator for metrics-query parameter documents.
///
/// Construction meta-validates and compiles the schema; validation
/// itself is synchronous and infallible — an invalid document yields
/// findings, never an `Err`.
///
/// `ParameterValidator` is `Send + Sync`; the compiled validator can be
/// shared across component instances.
pub struct ParameterValidator {
    compiled: Validator,
}

impl fmt::Debug for ParameterValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterValidator").finish_non_exhaustive()
    }
}

impl ParameterValidator {
    /// Meta-validate the parameter schema and compile it.
    ///
    /// # Errors
    ///
    /// Returns [`MetriqError::SchemaCompile`] if the literal violates the
    /// draft-07 metaschema or cannot be compiled. With the shipped static
    /// schema this does not happen; the check exists so a future edit to
    /// the literal fails at mount, not mid-edit.
    pub fn new() -> Result<Self, MetriqError> {
        let schema = parameter_schema_value();

        jsonschema::meta::validate(schema).map_err(|e| {
            MetriqError::SchemaCompile(format!("metaschema violation: {e}"))
        })?;

        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft7);
        let compiled = opts
            .build(schema)
            .map_err(|e| MetriqError::SchemaCompile(e.to_string()))?;

        Ok(ParameterValidator { compiled })
    }

    /// Validate a document, returning every violation.
    ///
    /// An empty result means the document conforms. Paths that cannot be
    /// parsed back from the validator's JSON Pointer form degrade to the
    /// document root rather than being dropped.
    pub fn validate(&self, instance: &Value) -> Vec<SchemaError> {
        self.compiled
            .iter_errors(instance)
            .map(|e| {
                let pointer = e.instance_path.to_string();
                let path = ErrorPath::from_json_pointer(&pointer)
                    .unwrap_or_else(|_| ErrorPath::root());
                SchemaError::schema(path, e.to_string())
            })
            .collect()
    }

    /// Fast conformance check without collecting findings.
    pub fn is_valid(&self, instance: &Value) -> bool {
        self.compiled.is_valid(instance)
    }
}
