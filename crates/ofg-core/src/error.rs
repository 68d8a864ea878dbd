use thiserror::Error;

use crate::document::HttpMethod;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("broken reference `{0}`")]
    BrokenReference(String),

    #[error("circular reference through `{0}`")]
    CircularReference(String),
}

#[derive(Debug, Error)]
pub enum CompileError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("parameter `{name}` has unsupported location `{location}`")]
    UnsupportedParameterLocation { name: String, location: String },

    #[error("request body declares no supported content type (have: {available:?})")]
    UnsupportedBodyContentType { available: Vec<String> },

    #[error("request body schema is neither an object nor an array")]
    UnsupportedBodySchema,

    #[error("multipart request body schema declares no properties")]
    MultipartSchemaMissingProperties,

    #[error("no resource selector collected; run the pipeline first")]
    ResourceNotFound,

    #[error("in {method} {path}: {source}")]
    Operation {
        method: HttpMethod,
        path: String,
        #[source]
        source: Box<CompileError>,
    },
}

impl CompileError {
    /// Stamp the operation that triggered this error onto it, so the
    /// offending document fragment can be located from the message.
    pub(crate) fn within(self, method: HttpMethod, path: &str) -> Self {
        CompileError::Operation {
            method,
            path: path.to_string(),
            source: Box::new(self),
        }
    }
}
