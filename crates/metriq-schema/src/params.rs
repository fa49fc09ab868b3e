//! # The Metrics-Query Parameter Schema
//!
//! The single schema this workspace ships: a draft-07 description of a
//! metrics-query parameter object `{ resourceUri, options }`. Built once,
//! never mutated. The property descriptions are part of the external
//! contract — consumers rely on them for hover help — so their wording
//! is fixed, `<br>` markup and all.

use std::sync::OnceLock;

use serde_json::Value;

use crate::node::SchemaNode;

/// Draft the schema is written against.
pub const SCHEMA_DRAFT: &str = "http://json-schema.org/draft-07/schema#";

const FILTER_DOC: &str = "The **$filter** is used to reduce the set of metric data returned.<br>Example:<br>Metric contains metadata A, B and C.<br>- Return all time series of C where A = a1 and B = b1 or b2<br>**$filter=A eq \u{2018}a1\u{2019} and B eq \u{2018}b1\u{2019} or B eq \u{2018}b2\u{2019} and C eq \u{2018}*\u{2019}**<br>- Invalid variant:<br>**$filter=A eq \u{2018}a1\u{2019} and B eq \u{2018}b1\u{2019} and C eq \u{2018}*\u{2019} or B = \u{2018}b2\u{2019}**<br>This is invalid because the logical or operator cannot separate two different metadata names.<br>- Return all time series where A = a1, B = b1 and C = c1:<br>**$filter=A eq \u{2018}a1\u{2019} and B eq \u{2018}b1\u{2019} and C eq \u{2018}c1\u{2019}**<br>- Return all time series where A = a1<br>**$filter=A eq \u{2018}a1\u{2019} and B eq \u{2018}*\u{2019} and C eq \u{2018}*\u{2019}**.";

const RESULT_TYPE_DOC: &str = "Reduces the set of data collected. The syntax allowed depends on the operation. See the operation's description for details. Possible values include: 'Data', 'Metadata'";

/// An opaque callback slot: an object with no permitted members.
fn callback_slot(doc: &str) -> SchemaNode {
    SchemaNode::object().describe(doc).into()
}

fn abort_signal() -> SchemaNode {
    SchemaNode::object()
        .describe("The signal which can be used to abort requests.")
        .property("aborted", SchemaNode::boolean())
        .property("addEventListener", SchemaNode::object())
        .property("removeEventListener", SchemaNode::object())
        .property("dispatchEvent", SchemaNode::object())
        .property("onabort", SchemaNode::object())
        .required([
            "aborted",
            "addEventListener",
            "dispatchEvent",
            "onabort",
            "removeEventListener",
        ])
        .into()
}

fn options() -> SchemaNode {
    SchemaNode::object()
        .describe("Optional Parameters.")
        .property(
            "metricnames",
            SchemaNode::string()
                .describe("The names of the metrics (comma separated) to retrieve."),
        )
        .property(
            "orderby",
            SchemaNode::string().describe(
                "The aggregation to use for sorting results and the direction of the sort. Only one order can be specified. Examples: sum asc.",
            ),
        )
        .property(
            "aggregation",
            SchemaNode::string()
                .describe("The list of aggregation types (comma separated) to retrieve."),
        )
        .property(
            "timespan",
            SchemaNode::string().describe(
                "The timespan of the query. It is a string with the following format 'startDateTime_ISO/endDateTime_ISO'.",
            ),
        )
        .property(
            "onDownloadProgress",
            callback_slot("Callback which fires upon download progress."),
        )
        .property(
            "onUploadProgress",
            callback_slot("Callback which fires upon upload progress."),
        )
        .property(
            "timeout",
            SchemaNode::number().describe(
                "The number of milliseconds a request can take before automatically being terminated.",
            ),
        )
        .property("filter", SchemaNode::string().describe(FILTER_DOC))
        .property(
            "top",
            SchemaNode::number().describe(
                "The maximum number of records to retrieve. Valid only if $filter is specified. Defaults to 10.",
            ),
        )
        .property(
            "metricnamespace",
            SchemaNode::string()
                .describe("Metric namespace to query metric definitions for."),
        )
        .property(
            "interval",
            SchemaNode::string().describe("The interval (i.e. timegrain) of the query."),
        )
        .property("abortSignal", abort_signal())
        .property(
            "resultType",
            SchemaNode::string()
                .describe(RESULT_TYPE_DOC)
                .one_of(["Data", "Metadata"]),
        )
        .property(
            "customHeaders",
            SchemaNode::object().additional(SchemaNode::string()),
        )
        .into()
}

/// The parameter schema as a typed tree.
///
/// Root object requires `resourceUri` and `options`; every object level
/// denies unknown keys except the `customHeaders` string map.
pub fn parameter_schema() -> &'static SchemaNode {
    static SCHEMA: OnceLock<SchemaNode> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        SchemaNode::object()
            .describe("Parameters.")
            .property("resourceUri", SchemaNode::string())
            .property("options", options())
            .required(["resourceUri", "options"])
            .into()
    })
}

/// The draft-07 JSON form of [`parameter_schema`], with its `$schema`
/// declaration. This is the exact value handed to the validator and to
/// any embedding editor that wants the raw literal.
pub fn parameter_schema_value() -> &'static Value {
    static VALUE: OnceLock<Value> = OnceLock::new();
    VALUE.get_or_init(|| {
        let mut value = parameter_schema().to_value();
        if let Value::Object(map) = &mut value {
            map.insert("$schema".into(), Value::String(SCHEMA_DRAFT.into()));
        }
        value
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use metriq_core::ErrorPath;

    #[test]
    fn root_declares_draft_and_requirements() {
        let value = parameter_schema_value();
        assert_eq!(value["$schema"], SCHEMA_DRAFT);
        assert_eq!(value["additionalProperties"], false);
        assert_eq!(
            value["required"],
            serde_json::json!(["resourceUri", "options"])
        );
    }

    #[test]
    fn every_object_level_is_closed() {
        fn assert_closed(value: &Value, at: &str) {
            if value["type"] == "object" {
                let additional = &value["additionalProperties"];
                assert!(
                    additional == &Value::Bool(false) || additional.is_object(),
                    "open object at {at}"
                );
            }
            if let Some(props) = value.get("properties").and_then(Value::as_object) {
                for (name, child) in props {
                    assert_closed(child, name);
                }
            }
        }
        assert_closed(parameter_schema_value(), "(root)");
    }

    #[test]
    fn abort_signal_requires_all_capability_members() {
        let value = parameter_schema_value();
        let required = value["properties"]["options"]["properties"]["abortSignal"]["required"]
            .as_array()
            .unwrap();
        let names: Vec<&str> = required.iter().filter_map(Value::as_str).collect();
        assert_eq!(
            names,
            [
                "aborted",
                "addEventListener",
                "dispatchEvent",
                "onabort",
                "removeEventListener"
            ]
        );
    }

    #[test]
    fn result_type_enumerates_data_and_metadata() {
        let value = parameter_schema_value();
        let variants =
            &value["properties"]["options"]["properties"]["resultType"]["enum"];
        assert_eq!(variants, &serde_json::json!(["Data", "Metadata"]));
    }

    #[test]
    fn hover_help_for_filter_is_the_documented_text() {
        let schema = parameter_schema();
        let text = schema
            .describe(&ErrorPath::new(["options", "filter"]))
            .unwrap();
        assert!(text.starts_with("The **$filter** is used to reduce"));
        assert!(text.contains("logical or operator cannot separate"));
    }

    #[test]
    fn hover_help_for_options_and_timeout() {
        let schema = parameter_schema();
        assert_eq!(
            schema.describe(&ErrorPath::new(["options"])),
            Some("Optional Parameters.")
        );
        assert_eq!(
            schema.describe(&ErrorPath::new(["options", "timeout"])),
            Some("The number of milliseconds a request can take before automatically being terminated.")
        );
    }

    #[test]
    fn resource_uri_has_no_hover_help() {
        let schema = parameter_schema();
        assert_eq!(schema.describe(&ErrorPath::new(["resourceUri"])), None);
    }
}
