//! # metriq-core — Foundational Types for the metriq Editor
//!
//! Defines the types shared by the schema and editor crates. Every other
//! crate in the workspace depends on `metriq-core`; it depends on nothing
//! internal.
//!
//! ## Key Design Principles
//!
//! 1. **Structured error paths.** Validation errors carry an [`ErrorPath`]
//!    — a typed sequence of object keys and array indices — rather than a
//!    bare string, so hosts can navigate to the offending field.
//!
//! 2. **One notification payload.** [`EditedValue`] is both the host-owned
//!    input prop and the payload of every change notification. There is no
//!    second, subtly different shape.
//!
//! 3. **Typed document model as an option, not an obligation.** The editor
//!    operates on `serde_json::Value` (arbitrary keys can appear mid-edit);
//!    [`ParameterDocument`] is a strict serde mirror of the schema for
//!    hosts that want typed access to a validated value.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `metriq-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod document;
pub mod error;
pub mod path;

// Re-export primary types for ergonomic imports.
pub use document::{AbortSignal, EditedValue, ParameterDocument, ParameterOptions, ResultType};
pub use error::{ErrorKind, MetriqError, SchemaError};
pub use path::{ErrorPath, PathSegment};
