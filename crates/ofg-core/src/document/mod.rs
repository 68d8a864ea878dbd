pub mod components;
pub mod document;
pub mod operation;
pub mod parameter;
pub mod request_body;
pub mod schema;

pub use components::Components;
pub use document::{Document, Tag};
pub use operation::{HttpMethod, Operation, PathItem};
pub use parameter::{Parameter, ParameterLocation, ParameterOrRef};
pub use request_body::{MediaType, RequestBody, RequestBodyOrRef};
pub use schema::{Schema, SchemaOrRef, SchemaType};

use crate::error::ParseError;

/// Build a document from YAML text.
pub fn from_yaml(input: &str) -> Result<Document, ParseError> {
    Ok(serde_yaml_ng::from_str(input)?)
}

/// Build a document from JSON text.
pub fn from_json(input: &str) -> Result<Document, ParseError> {
    Ok(serde_json::from_str(input)?)
}
