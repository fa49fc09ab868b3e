//! # SchemaBoundEditor Component
//!
//! Binds one [`EmbeddedEditor`] instance to the fixed parameter schema
//! and translates its native change and validation events into one
//! normalized host notification, `on_change({ data, error })`.
//!
//! ## Lifecycle
//!
//! Construct → [`SchemaBoundEditor::mount`] (acquires exactly one editor
//! instance, seeded with the initial value, firing nothing) →
//! user edits → notifications → [`SchemaBoundEditor::unmount`] (releases
//! the instance; idempotent). `Drop` also releases, so teardown happens
//! on every exit path regardless of how the host removes the component.
//!
//! ## Notification Rules
//!
//! - Tree-mode edit: forward `{ data, error: false }` immediately. The
//!   tree UI is schema-conformant by construction for value shapes, so
//!   this path does not re-validate; the validation pass that follows
//!   catches property-name violations.
//! - Code-mode keystroke: parse first. A buffer that is not valid JSON
//!   is discarded without any notification — the host keeps its
//!   last-known value until the text parses again.
//! - Validation pass: drop findings tagged `customValidation`, derive
//!   the flag from what remains, and notify only when the flag actually
//!   flips. The payload is the last-known data value, never a fresh read.
//! - A missing `on_change` callback is a caller defect: every
//!   notification becomes a guarded no-op, nothing is thrown.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;

use metriq_core::{EditedValue, ErrorKind, MetriqError, SchemaError};
use metriq_schema::ParameterValidator;

use crate::autocomplete::AutoComplete;
use crate::embedded::{EditorHooks, EditorMode, EmbeddedEditor};

/// Host change callback, invoked with every notification payload.
pub type ChangeHandler = Box<dyn FnMut(EditedValue)>;

/// Host-supplied validator; its findings are reported alongside schema
/// findings but tagged `customValidation` and excluded from the flag.
pub type CustomValidator = Rc<dyn Fn(&Value) -> Vec<SchemaError>>;

/// Configuration for a [`SchemaBoundEditor`].
///
/// Presentation fields (`label`, `name`, `style`, `show_copy_control`)
/// are carried for the host to render; the component itself only acts on
/// the callbacks and the completion list.
pub struct EditorConfig {
    /// Element identity of the editor region.
    pub id: String,
    /// Optional caption rendered by the host.
    pub label: Option<String>,
    /// Form field name.
    pub name: Option<String>,
    /// Whether the host should render a copy-to-clipboard affordance.
    pub show_copy_control: bool,
    /// Candidate property tokens for autocomplete filtering.
    pub auto_completion_list: Vec<String>,
    /// Presentation override, passed through untouched.
    pub style: Option<String>,
    /// The host notification channel. Absent means notifications no-op.
    pub on_change: Option<ChangeHandler>,
    /// Optional host validator merged into each validation pass.
    pub on_schema_validation: Option<CustomValidator>,
}

impl EditorConfig {
    /// Configuration with the given element identity and defaults
    /// everywhere else (`show_copy_control` defaults to true).
    pub fn new(id: impl Into<String>) -> Self {
        EditorConfig {
            id: id.into(),
            label: None,
            name: None,
            show_copy_control: true,
            auto_completion_list: Vec::new(),
            style: None,
            on_change: None,
            on_schema_validation: None,
        }
    }

    /// Set the caption.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the form field name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Toggle the copy-to-clipboard affordance.
    pub fn show_copy_control(mut self, show: bool) -> Self {
        self.show_copy_control = show;
        self
    }

    /// Set the autocomplete candidate list.
    pub fn auto_completion_list(mut self, list: Vec<String>) -> Self {
        self.auto_completion_list = list;
        self
    }

    /// Set the presentation override.
    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// Wire the host notification channel.
    pub fn on_change(mut self, handler: impl FnMut(EditedValue) + 'static) -> Self {
        self.on_change = Some(Box::new(handler));
        self
    }

    /// Wire a host validator.
    pub fn on_schema_validation(
        mut self,
        validator: impl Fn(&Value) -> Vec<SchemaError> + 'static,
    ) -> Self {
        self.on_schema_validation = Some(Rc::new(validator));
        self
    }
}

/// State shared between the component handle and the wired hooks.
struct ComponentCore {
    on_change: Option<ChangeHandler>,
    /// The host-visible value: last forwarded data plus current flag.
    value: EditedValue,
}

impl ComponentCore {
    fn notify(&mut self, payload: EditedValue) {
        match self.on_change.as_mut() {
            Some(callback) => {
                tracing::trace!(error = payload.error, "notifying host of change");
                callback(payload);
            }
            None => {
                tracing::debug!("change callback absent; notification dropped");
            }
        }
    }

    /// Tree-mode (or successfully parsed code-mode) edit: forward
    /// unconditionally with a clean flag and remember the value.
    fn structured_change(core: &Rc<RefCell<ComponentCore>>, data: Value) {
        let mut core = core.borrow_mut();
        core.value = EditedValue::new(data.clone());
        core.notify(EditedValue::new(data));
    }

    /// Code-mode text event: parse-then-forward, discard silently on
    /// failure. Text events from tree mode are ignored here — the
    /// structured event already covered them.
    fn text_change(core: &Rc<RefCell<ComponentCore>>, mode: EditorMode, text: &str) {
        if mode != EditorMode::Code {
            return;
        }
        match serde_json::from_str::<Value>(text) {
            Ok(json) => ComponentCore::structured_change(core, json),
            Err(err) => {
                tracing::debug!(%err, "discarding unparseable code-mode buffer");
            }
        }
    }

    /// Validation pass: derive the flag from structural findings only
    /// and notify on a validity transition, carrying the last-known
    /// data value.
    fn validation_result(core: &Rc<RefCell<ComponentCore>>, findings: Vec<SchemaError>) {
        let structural = findings
            .iter()
            .any(|finding| finding.kind != ErrorKind::CustomValidation);
        let mut core = core.borrow_mut();
        if core.value.error == structural {
            return;
        }
        core.value.error = structural;
        let payload = core.value.clone();
        core.notify(payload);
    }
}

/// The schema-bound editor component.
pub struct SchemaBoundEditor {
    core: Rc<RefCell<ComponentCore>>,
    custom: Option<CustomValidator>,
    editor: Option<EmbeddedEditor>,
    id: String,
    label: Option<String>,
    name: Option<String>,
    show_copy_control: bool,
    auto_completion_list: Vec<String>,
    style: Option<String>,
}

impl SchemaBoundEditor {
    /// Construct an unmounted component over the host-owned value.
    ///
    /// Only `initial.data` is read; the host's flag is reset — validity
    /// starts unvalidated and is treated as valid until the first pass.
    pub fn new(initial: EditedValue, config: EditorConfig) -> Self {
        let EditorConfig {
            id,
            label,
            name,
            show_copy_control,
            auto_completion_list,
            style,
            on_change,
            on_schema_validation,
        } = config;
        SchemaBoundEditor {
            core: Rc::new(RefCell::new(ComponentCore {
                on_change,
                value: EditedValue::new(initial.data),
            })),
            custom: on_schema_validation,
            editor: None,
            id,
            label,
            name,
            show_copy_control,
            auto_completion_list,
            style,
        }
    }

    /// Acquire the embedded editor instance, seeded with the initial
    /// value. Fires no notification. Idempotent when already mounted.
    ///
    /// # Errors
    ///
    /// Returns [`MetriqError::SchemaCompile`] if the parameter schema
    /// fails meta-validation or compilation.
    pub fn mount(&mut self) -> Result<(), MetriqError> {
        if self.editor.is_some() {
            return Ok(());
        }
        let validator = Rc::new(ParameterValidator::new()?);
        let hooks = self.wire_hooks();
        let seed = self.core.borrow().value.data.clone();
        self.editor = Some(EmbeddedEditor::create(
            seed,
            validator,
            self.custom.clone(),
            AutoComplete::new(self.auto_completion_list.clone()),
            hooks,
        ));
        tracing::debug!(id = %self.id, "editor mounted");
        Ok(())
    }

    /// Release the embedded editor instance if one exists. Idempotent.
    pub fn unmount(&mut self) {
        if let Some(editor) = self.editor.take() {
            editor.destroy();
            tracing::debug!(id = %self.id, "editor released");
        }
    }

    /// Whether an editor instance is currently held.
    pub fn is_mounted(&self) -> bool {
        self.editor.is_some()
    }

    /// The mounted editor, for driving edits and querying mode.
    pub fn editor(&self) -> Option<&EmbeddedEditor> {
        self.editor.as_ref()
    }

    /// Mutable access to the mounted editor.
    pub fn editor_mut(&mut self) -> Option<&mut EmbeddedEditor> {
        self.editor.as_mut()
    }

    /// The host-visible value: last forwarded data and current flag.
    pub fn value(&self) -> EditedValue {
        self.core.borrow().value.clone()
    }

    /// Element identity of the editor region.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Caption for the host to render, if configured.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Form field name, if configured.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Whether the host should render the copy affordance.
    pub fn show_copy_control(&self) -> bool {
        self.show_copy_control
    }

    /// Presentation override, if configured.
    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    fn wire_hooks(&self) -> EditorHooks {
        let json_core = Rc::clone(&self.core);
        let text_core = Rc::clone(&self.core);
        let validate_core = Rc::clone(&self.core);
        EditorHooks {
            on_change_json: Box::new(move |new| {
                ComponentCore::structured_change(&json_core, new);
            }),
            on_change_text: Box::new(move |mode, text| {
                ComponentCore::text_change(&text_core, mode, text);
            }),
            on_validate: Box::new(move |findings| {
                ComponentCore::validation_result(&validate_core, findings);
            }),
        }
    }
}

impl Drop for SchemaBoundEditor {
    fn drop(&mut self) {
        self.unmount();
    }
}
