use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::HttpMethod;

/// The value kind of a compiled field.
///
/// `Json` fields hold structured text: their runtime value is a
/// JSON-serialized string, re-parsed by the host when routed. `Notice`
/// fields are informational and accept no input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Boolean,
    String,
    Number,
    Json,
    Options,
    Notice,
}

/// How the host extracts the outgoing value from a field's runtime value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueExtraction {
    /// Use the runtime value as-is.
    Verbatim,
    /// Parse the runtime value as JSON before routing it.
    ParseJson,
    /// The runtime value names the binary payload to attach.
    BinaryPayload,
}

/// Where in the outgoing body a field's value lands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BodyTarget {
    /// The value becomes the entire outgoing body.
    Whole,
    /// The value is written under this key.
    Key(String),
}

/// How a field's runtime value is injected into the outgoing request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "target", rename_all = "camelCase")]
pub enum RoutingDirective {
    Query {
        parameter: String,
        value: ValueExtraction,
    },
    Header {
        name: String,
        value: ValueExtraction,
    },
    Path {
        segment: String,
        value: ValueExtraction,
    },
    Body {
        #[serde(rename = "property")]
        target: BodyTarget,
        value: ValueExtraction,
    },
}

/// The request an operation-selector option routes to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutedRequest {
    pub method: HttpMethod,
    /// URI template rewritten into the host's expression syntax.
    pub url: String,
}

/// One choice of an options-kind field. The label is human-readable,
/// the raw source value is preserved as the underlying value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldOption {
    pub name: String,
    pub value: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Short action phrase shown by hosts that surface one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<RoutedRequest>,
}

/// The resource/operation combination a field is displayed for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayScope {
    pub resource: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
}

/// A compiled, host-renderable description of one input value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub display_name: String,

    /// Stable key, unique within the fields of one operation.
    pub name: String,

    pub kind: FieldKind,

    pub default: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,

    /// The runtime value of this field is a file path.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub file_path: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routing: Option<RoutingDirective>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<DisplayScope>,
}
