//! # metriq-editor — Schema-Bound Parameter Editor
//!
//! The reusable component this workspace exists for:
//! [`SchemaBoundEditor`] binds an embedded structured editor (tree mode
//! and code mode over an in-memory JSON value) to the fixed metrics-query
//! parameter schema and forwards every edit, plus a validity flag, to a
//! single host callback.
//!
//! ## Control Flow
//!
//! ```text
//! host ── EditedValue ──▶ SchemaBoundEditor::mount
//!                              │ seeds
//!                              ▼
//!                        EmbeddedEditor ── on_change_json ──┐
//!                         (tree | code)  ── on_change_text ─┤─▶ component
//!                              │         ── on_validate ────┘   handlers
//!                              ▼                                  │
//!                        ParameterValidator                       ▼
//!                                                    on_change({ data, error })
//! ```
//!
//! Tree-mode edits forward immediately with `error: false`. Code-mode
//! keystrokes parse first; unparseable buffers are discarded silently.
//! Validation passes flip the flag only on a validity transition, so
//! hosts are not flooded while the user types.
//!
//! ## Concurrency
//!
//! Single-threaded by design: the component lives on the host UI's event
//! loop, callbacks are plain `FnMut` closures, and nothing here blocks or
//! suspends. The embedded editor instance is exclusively owned by one
//! component and released on every exit path via `Drop`.

pub mod autocomplete;
pub mod component;
pub mod embedded;

pub use autocomplete::AutoComplete;
pub use component::{ChangeHandler, CustomValidator, EditorConfig, SchemaBoundEditor};
pub use embedded::{EditorHooks, EditorMode, EmbeddedEditor};
