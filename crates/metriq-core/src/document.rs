//! # Parameter Document Model
//!
//! The editor itself operates on raw `serde_json::Value` — mid-edit
//! documents can contain arbitrary keys, and the schema is the arbiter of
//! what is valid. The typed model here is a strict serde mirror of that
//! schema (`deny_unknown_fields` everywhere) for hosts that want to
//! consume a validated value without touching `Value` directly.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::MetriqError;

/// Host-facing value prop and notification payload.
///
/// The host owns one of these; the component reads `data` at mount time
/// and passes a fresh one to the change callback on every notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditedValue {
    /// The current parameter document (or whatever the user has typed).
    pub data: Value,
    /// Latest validity verdict. `false` until a validation pass says otherwise.
    pub error: bool,
}

impl EditedValue {
    /// Wrap a document with a clean validity flag.
    pub fn new(data: Value) -> Self {
        EditedValue { data, error: false }
    }

    /// Build from a typed document.
    pub fn from_document(doc: &ParameterDocument) -> Result<Self, MetriqError> {
        Ok(EditedValue::new(serde_json::to_value(doc)?))
    }
}

/// Allowed values of the `resultType` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultType {
    /// Return the metric data points.
    Data,
    /// Return only metric metadata.
    Metadata,
}

/// The abort-signal capability object carried inside the options.
///
/// The editor never acts on this — it is schema-described passthrough
/// data. All five members are required by the schema; the four listener
/// members are opaque (empty) objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AbortSignal {
    /// Whether the associated request has been aborted.
    pub aborted: bool,
    #[serde(rename = "addEventListener")]
    pub add_event_listener: Value,
    #[serde(rename = "removeEventListener")]
    pub remove_event_listener: Value,
    #[serde(rename = "dispatchEvent")]
    pub dispatch_event: Value,
    pub onabort: Value,
}

impl AbortSignal {
    /// A non-aborted signal with stubbed capability members, as seeded by
    /// the demonstration host.
    pub fn stub() -> Self {
        AbortSignal {
            aborted: false,
            add_event_listener: json!({}),
            remove_event_listener: json!({}),
            dispatch_event: json!({}),
            onabort: json!({}),
        }
    }
}

/// Optional query parameters of a metrics query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ParameterOptions {
    /// `$filter` expression reducing the returned metric data set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// Comma-separated metric names to retrieve.
    #[serde(rename = "metricnames", skip_serializing_if = "Option::is_none")]
    pub metric_names: Option<String>,
    /// Metric namespace to query metric definitions for.
    #[serde(rename = "metricnamespace", skip_serializing_if = "Option::is_none")]
    pub metric_namespace: Option<String>,
    /// Sort aggregation and direction, e.g. `sum asc`.
    #[serde(rename = "orderby", skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
    /// The interval (timegrain) of the query.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
    /// Comma-separated aggregation types to retrieve.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<String>,
    /// Query timespan, `startDateTime_ISO/endDateTime_ISO`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timespan: Option<String>,
    /// Maximum number of records to retrieve; only valid with `filter`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    /// Milliseconds before a request is automatically terminated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<f64>,
    /// Reduces the set of data collected.
    #[serde(rename = "resultType", skip_serializing_if = "Option::is_none")]
    pub result_type: Option<ResultType>,
    /// Download-progress callback slot (opaque object).
    #[serde(rename = "onDownloadProgress", skip_serializing_if = "Option::is_none")]
    pub on_download_progress: Option<Value>,
    /// Upload-progress callback slot (opaque object).
    #[serde(rename = "onUploadProgress", skip_serializing_if = "Option::is_none")]
    pub on_upload_progress: Option<Value>,
    /// Extra request headers; values must be strings.
    #[serde(rename = "customHeaders", skip_serializing_if = "Option::is_none")]
    pub custom_headers: Option<BTreeMap<String, String>>,
    /// Signal that can be used to abort the request.
    #[serde(rename = "abortSignal", skip_serializing_if = "Option::is_none")]
    pub abort_signal: Option<AbortSignal>,
}

/// The edited value: a metrics-query parameter object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParameterDocument {
    /// Resource identifier the query targets.
    #[serde(rename = "resourceUri")]
    pub resource_uri: String,
    /// The optional query parameters.
    pub options: ParameterOptions,
}

impl ParameterDocument {
    /// The seed document used by the demonstration host: a placeholder
    /// resource URI and a stubbed abort signal.
    pub fn template() -> Self {
        ParameterDocument {
            resource_uri: "required".to_string(),
            options: ParameterOptions {
                abort_signal: Some(AbortSignal::stub()),
                ..ParameterOptions::default()
            },
        }
    }
}
