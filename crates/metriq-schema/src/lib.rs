//! # metriq-schema — The Parameter Schema
//!
//! Owns the fixed draft-07 JSON Schema describing a metrics-query
//! parameter object, and the validator compiled from it.
//!
//! ## Typed Schema Tree (`node`)
//!
//! The schema is not a loose JSON literal. It is built as a
//! [`SchemaNode`] tree — one tagged variant per JSON-Schema node kind —
//! so property descriptions (the hover-help contract) are navigable at
//! the type level and the literal cannot drift into shapes the emitter
//! does not understand.
//!
//! ## The Literal (`params`)
//!
//! [`parameter_schema`] is the one schema this workspace ships. It never
//! changes at runtime. Every object level declares
//! `additionalProperties: false`; unknown keys are violations.
//!
//! ## Validation (`validate`)
//!
//! [`ParameterValidator`] meta-validates the emitted literal against the
//! draft-07 metaschema once at construction, compiles it with the
//! `jsonschema` crate, and reports violations as structured
//! [`metriq_core::SchemaError`] findings.

pub mod node;
pub mod params;
pub mod validate;

pub use node::{Additional, ObjectNode, SchemaNode};
pub use params::{parameter_schema, parameter_schema_value};
pub use validate::ParameterValidator;
