//! # Typed Schema Tree
//!
//! A strongly-typed, immutable representation of the subset of JSON
//! Schema draft-07 the parameter schema uses: objects, strings, numbers,
//! booleans, and string enumerations. One tagged variant per node kind.
//!
//! The tree is built once with the typed builders below and emitted to a
//! `serde_json::Value` for compilation. Keeping the schema in this form
//! (rather than as a raw literal) makes the hover-help contract — the
//! per-property `description` strings — navigable without re-parsing
//! JSON, and rules out malformed literals by construction.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use metriq_core::{ErrorPath, PathSegment};

/// Policy for properties not named in an object node.
#[derive(Debug, Clone, PartialEq)]
pub enum Additional {
    /// `additionalProperties: false` — unknown keys are violations.
    Denied,
    /// `additionalProperties: <schema>` — unknown keys must match the
    /// given schema (the string-map case).
    Schema(Box<SchemaNode>),
}

/// An object schema node.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectNode {
    description: Option<String>,
    properties: BTreeMap<String, SchemaNode>,
    required: Vec<String>,
    additional: Additional,
}

impl ObjectNode {
    /// Attach a description (surfaced as hover help).
    pub fn describe(mut self, text: &str) -> Self {
        self.description = Some(text.to_string());
        self
    }

    /// Add a named property.
    pub fn property(mut self, name: &str, node: impl Into<SchemaNode>) -> Self {
        self.properties.insert(name.to_string(), node.into());
        self
    }

    /// Mark property names as required.
    pub fn required<'a>(mut self, names: impl IntoIterator<Item = &'a str>) -> Self {
        self.required = names.into_iter().map(str::to_string).collect();
        self
    }

    /// Allow unknown keys matching the given schema instead of denying them.
    pub fn additional(mut self, node: impl Into<SchemaNode>) -> Self {
        self.additional = Additional::Schema(Box::new(node.into()));
        self
    }
}

/// A string schema node, optionally constrained to an enumeration.
#[derive(Debug, Clone, PartialEq)]
pub struct StrNode {
    description: Option<String>,
    enumeration: Option<Vec<String>>,
}

impl StrNode {
    /// Attach a description (surfaced as hover help).
    pub fn describe(mut self, text: &str) -> Self {
        self.description = Some(text.to_string());
        self
    }

    /// Constrain the value to the given set.
    pub fn one_of<'a>(mut self, values: impl IntoIterator<Item = &'a str>) -> Self {
        self.enumeration = Some(values.into_iter().map(str::to_string).collect());
        self
    }
}

/// A number schema node.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberNode {
    description: Option<String>,
}

impl NumberNode {
    /// Attach a description (surfaced as hover help).
    pub fn describe(mut self, text: &str) -> Self {
        self.description = Some(text.to_string());
        self
    }
}

/// A boolean schema node.
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanNode {
    description: Option<String>,
}

impl BooleanNode {
    /// Attach a description (surfaced as hover help).
    pub fn describe(mut self, text: &str) -> Self {
        self.description = Some(text.to_string());
        self
    }
}

/// One node of the schema tree, tagged by JSON-Schema kind.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// `type: object`
    Object(ObjectNode),
    /// `type: string`
    Str(StrNode),
    /// `type: number`
    Number(NumberNode),
    /// `type: boolean`
    Boolean(BooleanNode),
}

impl SchemaNode {
    /// Start an object node. Unknown keys are denied unless
    /// [`ObjectNode::additional`] overrides it.
    pub fn object() -> ObjectNode {
        ObjectNode {
            description: None,
            properties: BTreeMap::new(),
            required: Vec::new(),
            additional: Additional::Denied,
        }
    }

    /// Start a string node.
    pub fn string() -> StrNode {
        StrNode {
            description: None,
            enumeration: None,
        }
    }

    /// Start a number node.
    pub fn number() -> NumberNode {
        NumberNode { description: None }
    }

    /// Start a boolean node.
    pub fn boolean() -> BooleanNode {
        BooleanNode { description: None }
    }

    /// The node's description, if any.
    pub fn description(&self) -> Option<&str> {
        match self {
            SchemaNode::Object(o) => o.description.as_deref(),
            SchemaNode::Str(s) => s.description.as_deref(),
            SchemaNode::Number(n) => n.description.as_deref(),
            SchemaNode::Boolean(b) => b.description.as_deref(),
        }
    }

    /// Walk the tree along `path` and return the description of the node
    /// it lands on. This is the hover-help lookup: path
    /// `options.filter` yields the `$filter` documentation string.
    ///
    /// Returns `None` when the path leaves the schema (unknown key,
    /// index into a non-array) or the target node has no description.
    pub fn describe(&self, path: &ErrorPath) -> Option<&str> {
        let mut node = self;
        for segment in path.segments() {
            node = match (node, segment) {
                (SchemaNode::Object(o), PathSegment::Key(key)) => {
                    match o.properties.get(key) {
                        Some(child) => child,
                        None => match &o.additional {
                            Additional::Schema(schema) => schema,
                            Additional::Denied => return None,
                        },
                    }
                }
                _ => return None,
            };
        }
        node.description()
    }

    /// Emit the draft-07 JSON form of this node.
    pub fn to_value(&self) -> Value {
        match self {
            SchemaNode::Object(o) => {
                let mut map = Map::new();
                if let Some(d) = &o.description {
                    map.insert("description".into(), Value::String(d.clone()));
                }
                map.insert(
                    "additionalProperties".into(),
                    match &o.additional {
                        Additional::Denied => Value::Bool(false),
                        Additional::Schema(schema) => schema.to_value(),
                    },
                );
                map.insert("type".into(), Value::String("object".into()));
                if !o.properties.is_empty() {
                    let props: Map<String, Value> = o
                        .properties
                        .iter()
                        .map(|(name, node)| (name.clone(), node.to_value()))
                        .collect();
                    map.insert("properties".into(), Value::Object(props));
                }
                if !o.required.is_empty() {
                    map.insert(
                        "required".into(),
                        Value::Array(
                            o.required
                                .iter()
                                .map(|n| Value::String(n.clone()))
                                .collect(),
                        ),
                    );
                }
                Value::Object(map)
            }
            SchemaNode::Str(s) => {
                let mut map = Map::new();
                map.insert("type".into(), Value::String("string".into()));
                if let Some(d) = &s.description {
                    map.insert("description".into(), Value::String(d.clone()));
                }
                if let Some(values) = &s.enumeration {
                    map.insert(
                        "enum".into(),
                        Value::Array(
                            values.iter().map(|v| Value::String(v.clone())).collect(),
                        ),
                    );
                }
                Value::Object(map)
            }
            SchemaNode::Number(n) => {
                let mut map = Map::new();
                map.insert("type".into(), Value::String("number".into()));
                if let Some(d) = &n.description {
                    map.insert("description".into(), Value::String(d.clone()));
                }
                Value::Object(map)
            }
            SchemaNode::Boolean(b) => {
                let mut map = Map::new();
                map.insert("type".into(), Value::String("boolean".into()));
                if let Some(d) = &b.description {
                    map.insert("description".into(), Value::String(d.clone()));
                }
                Value::Object(map)
            }
        }
    }
}

impl From<ObjectNode> for SchemaNode {
    fn from(node: ObjectNode) -> Self {
        SchemaNode::Object(node)
    }
}

impl From<StrNode> for SchemaNode {
    fn from(node: StrNode) -> Self {
        SchemaNode::Str(node)
    }
}

impl From<NumberNode> for SchemaNode {
    fn from(node: NumberNode) -> Self {
        SchemaNode::Number(node)
    }
}

impl From<BooleanNode> for SchemaNode {
    fn from(node: BooleanNode) -> Self {
        SchemaNode::Boolean(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn object_emits_closed_by_default() {
        let node: SchemaNode = SchemaNode::object()
            .property("name", SchemaNode::string())
            .required(["name"])
            .into();
        assert_eq!(
            node.to_value(),
            json!({
                "additionalProperties": false,
                "type": "object",
                "properties": { "name": { "type": "string" } },
                "required": ["name"]
            })
        );
    }

    #[test]
    fn string_map_emits_additional_schema() {
        let node: SchemaNode = SchemaNode::object()
            .additional(SchemaNode::string())
            .into();
        assert_eq!(
            node.to_value(),
            json!({
                "additionalProperties": { "type": "string" },
                "type": "object"
            })
        );
    }

    #[test]
    fn enum_string_emits_enum_keyword() {
        let node: SchemaNode = SchemaNode::string()
            .describe("pick one")
            .one_of(["Data", "Metadata"])
            .into();
        assert_eq!(
            node.to_value(),
            json!({
                "type": "string",
                "description": "pick one",
                "enum": ["Data", "Metadata"]
            })
        );
    }

    #[test]
    fn describe_walks_nested_properties() {
        let node: SchemaNode = SchemaNode::object()
            .property(
                "options",
                SchemaNode::object()
                    .describe("Optional Parameters.")
                    .property("top", SchemaNode::number().describe("max records")),
            )
            .into();

        let path = ErrorPath::new(["options", "top"]);
        assert_eq!(node.describe(&path), Some("max records"));

        let options_only = ErrorPath::new(["options"]);
        assert_eq!(node.describe(&options_only), Some("Optional Parameters."));

        let unknown = ErrorPath::new(["options", "bogus"]);
        assert_eq!(node.describe(&unknown), None);
    }

    #[test]
    fn describe_follows_additional_schema() {
        let node: SchemaNode = SchemaNode::object()
            .property(
                "customHeaders",
                SchemaNode::object().additional(SchemaNode::string().describe("header value")),
            )
            .into();
        let path = ErrorPath::new(["customHeaders", "x-request-id"]);
        assert_eq!(node.describe(&path), Some("header value"));
    }

    #[test]
    fn describe_root_returns_root_description() {
        let node: SchemaNode = SchemaNode::object().describe("Parameters.").into();
        assert_eq!(node.describe(&ErrorPath::root()), Some("Parameters."));
    }
}
