//! # Embedded Structured Editor
//!
//! An in-memory model of the structured editing widget the component
//! binds to: one JSON document, presented either as a navigable tree or
//! as a raw text buffer, with lifecycle hooks fired on every user edit.
//!
//! Event semantics mirror the widget they model:
//!
//! - Seeding the editor at creation fires nothing — mounting must not
//!   notify the host.
//! - A tree-mode edit fires `on_change_json` with the new document and
//!   `on_change_text` with its serialized form (text listeners fire in
//!   every mode).
//! - A code-mode keystroke fires `on_change_text` only; the document is
//!   adopted when the buffer parses.
//! - Each adopted change triggers one validation pass: schema findings
//!   plus re-tagged custom-validator findings, delivered through
//!   `on_validate` even when empty.

use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use metriq_core::{ErrorKind, ErrorPath, SchemaError};
use metriq_schema::{parameter_schema, ParameterValidator};

use crate::autocomplete::AutoComplete;
use crate::component::CustomValidator;

/// Presentation mode of the embedded editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorMode {
    /// Navigable nested-field presentation.
    Tree,
    /// Raw-text presentation requiring explicit parse.
    Code,
}

impl fmt::Display for EditorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EditorMode::Tree => "tree",
            EditorMode::Code => "code",
        })
    }
}

/// Lifecycle hooks wired in at creation, analogous to the options object
/// of the modeled widget.
pub struct EditorHooks {
    /// Fired after a tree-mode edit, with the new document.
    pub on_change_json: Box<dyn FnMut(Value)>,
    /// Fired after any edit, with the active mode and the raw text.
    pub on_change_text: Box<dyn FnMut(EditorMode, &str)>,
    /// Fired after each validation pass with every finding, empty included.
    pub on_validate: Box<dyn FnMut(Vec<SchemaError>)>,
}

impl EditorHooks {
    /// Hooks that ignore every event. Used where a bare editor is needed
    /// without a component in front of it.
    pub fn silent() -> Self {
        EditorHooks {
            on_change_json: Box::new(|_| {}),
            on_change_text: Box::new(|_, _| {}),
            on_validate: Box::new(|_| {}),
        }
    }
}

/// One embedded editor instance: exclusively owned by the component that
/// created it, destroyed when that component unmounts.
pub struct EmbeddedEditor {
    mode: EditorMode,
    document: Value,
    text: String,
    validator: Rc<ParameterValidator>,
    custom: Option<CustomValidator>,
    completion: AutoComplete,
    hooks: EditorHooks,
}

impl EmbeddedEditor {
    /// Create an editor seeded with `seed`, in tree mode. Fires no hooks.
    pub fn create(
        seed: Value,
        validator: Rc<ParameterValidator>,
        custom: Option<CustomValidator>,
        completion: AutoComplete,
        hooks: EditorHooks,
    ) -> Self {
        let text = serde_json::to_string_pretty(&seed).unwrap_or_default();
        EmbeddedEditor {
            mode: EditorMode::Tree,
            document: seed,
            text,
            validator,
            custom,
            completion,
            hooks,
        }
    }

    /// The active presentation mode.
    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// The current document as last adopted.
    pub fn get(&self) -> &Value {
        &self.document
    }

    /// The raw text buffer (meaningful in code mode).
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Switch presentation mode. Fires no change hooks.
    ///
    /// Entering code mode re-renders the document into the text buffer.
    /// Entering tree mode adopts the buffer only if it parses; otherwise
    /// the last adopted document stays.
    pub fn set_mode(&mut self, mode: EditorMode) {
        if mode == self.mode {
            return;
        }
        match mode {
            EditorMode::Code => {
                self.text = serde_json::to_string_pretty(&self.document).unwrap_or_default();
            }
            EditorMode::Tree => {
                if let Ok(parsed) = serde_json::from_str::<Value>(&self.text) {
                    self.document = parsed;
                }
            }
        }
        self.mode = mode;
    }

    /// A tree-mode user edit: adopt `new` as the document.
    ///
    /// Fires `on_change_json`, then `on_change_text` with the serialized
    /// form, then runs a validation pass.
    pub fn update_document(&mut self, new: Value) {
        self.document = new.clone();
        self.text = serde_json::to_string_pretty(&self.document).unwrap_or_default();
        (self.hooks.on_change_json)(new);
        (self.hooks.on_change_text)(self.mode, &self.text);
        self.run_validation();
    }

    /// A code-mode keystroke: replace the text buffer.
    ///
    /// Fires `on_change_text`. The document is adopted — and a validation
    /// pass runs — only when the buffer parses as JSON; until then the
    /// last adopted document stands.
    pub fn update_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        (self.hooks.on_change_text)(self.mode, &self.text);
        if let Ok(parsed) = serde_json::from_str::<Value>(&self.text) {
            self.document = parsed;
            self.run_validation();
        }
    }

    /// Autocomplete candidates for a partially typed property token.
    pub fn completions(&self, token: &str) -> Vec<&str> {
        self.completion.matches(token)
    }

    /// Hover help: the schema description of the node at `path`.
    pub fn hover_help(&self, path: &ErrorPath) -> Option<&'static str> {
        parameter_schema().describe(path)
    }

    /// Tear the instance down, dropping the wired hooks.
    pub fn destroy(self) {
        tracing::debug!("embedded editor destroyed");
    }

    fn run_validation(&mut self) {
        let mut findings = self.validator.validate(&self.document);
        if let Some(custom) = &self.custom {
            // Host findings are merged but tagged so they never drive
            // the structural validity flag.
            findings.extend(custom(&self.document).into_iter().map(|mut f| {
                f.kind = ErrorKind::CustomValidation;
                f
            }));
        }
        (self.hooks.on_validate)(findings);
    }
}
