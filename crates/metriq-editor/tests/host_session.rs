//! End-to-end host session: mount the component over the demonstration
//! seed document, edit in both modes, and verify every notification the
//! host receives.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::json;

use metriq_core::{EditedValue, ParameterDocument, SchemaError};
use metriq_editor::{EditorConfig, EditorMode, SchemaBoundEditor};

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn host() -> (Rc<RefCell<Vec<EditedValue>>>, EditorConfig) {
    let log: Rc<RefCell<Vec<EditedValue>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let config = EditorConfig::new("test-items")
        .name("test-editor")
        .show_copy_control(false)
        .auto_completion_list(vec![
            "options.metricnames".to_string(),
            "options.timespan".to_string(),
        ])
        .on_change(move |payload| sink.borrow_mut().push(payload));
    (log, config)
}

#[test]
fn demo_session_from_seed_to_edited_query() {
    init_tracing();

    let seed = EditedValue::from_document(&ParameterDocument::template()).unwrap();
    let (log, config) = host();
    let mut component = SchemaBoundEditor::new(seed, config);

    // Mounting seeds the editor without notifying.
    component.mount().unwrap();
    assert!(log.borrow().is_empty());

    // Switch to code mode and type an incomplete buffer: no callback.
    let editor = component.editor_mut().unwrap();
    editor.set_mode(EditorMode::Code);
    editor.update_text("{");
    assert!(log.borrow().is_empty());

    // Complete the buffer into valid JSON: exactly one callback, clean.
    component.editor_mut().unwrap().update_text(
        r#"{
  "resourceUri": "abc",
  "options": {
    "metricnames": "cpu,mem",
    "timespan": "2026-08-01T00:00:00Z/2026-08-02T00:00:00Z",
    "abortSignal": {
      "aborted": false,
      "addEventListener": {},
      "removeEventListener": {},
      "dispatchEvent": {},
      "onabort": {}
    }
  }
}"#,
    );
    {
        let log = log.borrow();
        assert_eq!(log.len(), 1, "expected exactly one callback, got {log:?}");
        assert_eq!(log[0].data["options"]["metricnames"], "cpu,mem");
        assert!(!log[0].error);
    }

    // Back to tree mode; inject an unknown option key. The value change
    // notifies first, then the validation pass flips the flag.
    let editor = component.editor_mut().unwrap();
    editor.set_mode(EditorMode::Tree);
    let mut broken = editor.get().clone();
    broken["options"]["granularity"] = json!("PT1M");
    editor.update_document(broken);
    {
        let log = log.borrow();
        assert_eq!(log.len(), 3);
        assert!(!log[1].error);
        assert!(log[2].error);
    }

    // Hover help and autocomplete still answer from the fixed schema.
    let editor = component.editor().unwrap();
    assert_eq!(
        editor.hover_help(&metriq_core::ErrorPath::new(["options", "timespan"])),
        Some("The timespan of the query. It is a string with the following format 'startDateTime_ISO/endDateTime_ISO'.")
    );
    assert_eq!(editor.completions("options.metric"), ["options.metricnames"]);

    // Unmounting mid-session releases exactly once and never throws.
    component.unmount();
    component.unmount();
    assert!(!component.is_mounted());
}

#[test]
fn custom_validator_findings_are_reported_but_not_flagged() {
    init_tracing();

    let seed = EditedValue::new(json!({ "resourceUri": "abc", "options": {} }));
    let findings_seen: Rc<RefCell<Vec<SchemaError>>> = Rc::new(RefCell::new(Vec::new()));

    let (log, config) = host();
    let config = config.on_schema_validation({
        let sink = Rc::clone(&findings_seen);
        move |document| {
            let finding = SchemaError::custom(
                metriq_core::ErrorPath::new(["resourceUri"]),
                format!("unknown resource {}", document["resourceUri"]),
            );
            sink.borrow_mut().push(finding.clone());
            vec![finding]
        }
    });

    let mut component = SchemaBoundEditor::new(seed, config);
    component.mount().unwrap();

    component
        .editor_mut()
        .unwrap()
        .update_document(json!({ "resourceUri": "xyz", "options": {} }));

    // The custom validator ran against the edited document...
    assert_eq!(findings_seen.borrow().len(), 1);
    assert!(findings_seen.borrow()[0].message.contains("xyz"));

    // ...but the host only saw the clean value-change notification.
    let log = log.borrow();
    assert_eq!(log.len(), 1);
    assert!(!log[0].error);
}

#[test]
fn dropping_a_mounted_component_releases_the_editor() {
    init_tracing();

    let (log, config) = host();
    {
        let seed = EditedValue::new(json!({ "resourceUri": "abc", "options": {} }));
        let mut component = SchemaBoundEditor::new(seed, config);
        component.mount().unwrap();
        component.editor_mut().unwrap().set_mode(EditorMode::Code);
        component.editor_mut().unwrap().update_text("{ \"mid\": ");
        // Component goes out of scope mid-edit.
    }
    assert!(log.borrow().is_empty());
}
