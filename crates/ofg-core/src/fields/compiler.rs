use indexmap::IndexMap;
use serde_json::{Value, json};

use crate::document::{
    Document, MediaType, ParameterLocation, ParameterOrRef, RequestBodyOrRef, Schema, SchemaType,
};
use crate::error::CompileError;
use crate::fields::definition::{
    BodyTarget, DisplayScope, FieldDefinition, FieldKind, FieldOption, RoutingDirective,
    ValueExtraction,
};
use crate::fields::example::extract_example;
use crate::naming;
use crate::resolve::Resolver;

/// Compiles schemas, parameters, and request bodies into field
/// definitions, attaching routing directives.
pub struct FieldCompiler<'a> {
    resolver: Resolver<'a>,
}

impl<'a> FieldCompiler<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self {
            resolver: Resolver::new(document),
        }
    }

    /// Compile one resolved schema into a field via the type-mapping
    /// table. Routing and display scope are left for the caller.
    pub fn from_schema(&self, name: &str, schema: &Schema) -> FieldDefinition {
        let (kind, default, options) = self.map_schema(schema);
        FieldDefinition {
            display_name: naming::display_name(name),
            name: name.to_string(),
            kind,
            default,
            description: schema.description.clone(),
            required: false,
            options,
            file_path: false,
            routing: None,
            display: None,
        }
    }

    fn map_schema(&self, schema: &Schema) -> (FieldKind, Value, Vec<FieldOption>) {
        if !schema.enum_values.is_empty() {
            let options = schema
                .enum_values
                .iter()
                .map(|value| FieldOption {
                    name: naming::option_label(value),
                    value: value.clone(),
                    description: None,
                    action: None,
                    request: None,
                })
                .collect();
            let default = declared_default(schema).unwrap_or_else(|| schema.enum_values[0].clone());
            return (FieldKind::Options, default, options);
        }

        match schema.effective_type() {
            SchemaType::Boolean => (
                FieldKind::Boolean,
                declared_default(schema).unwrap_or(Value::Bool(true)),
                Vec::new(),
            ),
            SchemaType::String => (
                FieldKind::String,
                declared_default(schema).unwrap_or_else(|| Value::String(String::new())),
                Vec::new(),
            ),
            SchemaType::Number | SchemaType::Integer => (
                FieldKind::Number,
                declared_default(schema).unwrap_or(json!(0)),
                Vec::new(),
            ),
            SchemaType::Object => {
                // Nested objects stay opaque structured text; the example
                // synthesis supplies the default when one exists.
                let default = schema
                    .default_value
                    .as_ref()
                    .map(json_text)
                    .or_else(|| extract_example(schema, &self.resolver).as_ref().map(json_text))
                    .unwrap_or_else(|| Value::String("{}".to_string()));
                (FieldKind::Json, default, Vec::new())
            }
            SchemaType::Array => {
                let default = schema
                    .default_value
                    .as_ref()
                    .map(json_text)
                    .or_else(|| schema.example.as_ref().map(json_text))
                    .unwrap_or_else(|| Value::String("[]".to_string()));
                (FieldKind::Json, default, Vec::new())
            }
        }
    }

    /// Compile a parameter: schema via the table, then parameter-level
    /// display name, description, requiredness and default overlaid, plus
    /// a routing directive for the declared location.
    pub fn from_parameter(&self, node: &'a ParameterOrRef) -> Result<FieldDefinition, CompileError> {
        let param = self.resolver.parameter_deep(node)?;

        let mut field = match &param.schema {
            Some(node) => self.from_schema(&param.name, self.resolver.schema_deep(node)?),
            None => self.from_schema(&param.name, &Schema::default()),
        };

        if let Some(description) = &param.description {
            field.description = Some(description.clone());
        }
        field.required = param.required;
        // The schema-level default stands only when the parameter
        // supplies no example of its own.
        if let Some(example) = &param.example {
            field.default = match field.kind {
                FieldKind::Json => json_text(example),
                _ => example.clone(),
            };
        }

        field.routing = Some(match param.location {
            ParameterLocation::Query => RoutingDirective::Query {
                parameter: param.name.clone(),
                value: ValueExtraction::Verbatim,
            },
            ParameterLocation::Header => RoutingDirective::Header {
                name: param.name.clone(),
                value: ValueExtraction::Verbatim,
            },
            ParameterLocation::Path => {
                // Path parameters are always required, whatever the
                // document declares.
                field.required = true;
                RoutingDirective::Path {
                    segment: param.name.clone(),
                    value: ValueExtraction::Verbatim,
                }
            }
            other => {
                return Err(CompileError::UnsupportedParameterLocation {
                    name: param.name.clone(),
                    location: other.as_str().to_string(),
                });
            }
        });

        Ok(field)
    }

    /// Compile a request body into its fields. Multipart content wins
    /// when present; otherwise the first `application/json`-family
    /// content type is used.
    pub fn from_request_body(
        &self,
        node: &'a RequestBodyOrRef,
    ) -> Result<Vec<FieldDefinition>, CompileError> {
        let body = self.resolver.request_body_deep(node)?;

        if let Some(media) = content_for(&body.content, "multipart/form-data") {
            return self.multipart_fields(media);
        }
        if let Some(media) = content_for(&body.content, "application/json") {
            return self.json_fields(media, body.required);
        }
        Err(CompileError::UnsupportedBodyContentType {
            available: body.content.keys().cloned().collect(),
        })
    }

    fn json_fields(
        &self,
        media: &'a MediaType,
        body_required: bool,
    ) -> Result<Vec<FieldDefinition>, CompileError> {
        let Some(node) = &media.schema else {
            return Err(CompileError::UnsupportedBodySchema);
        };
        let schema = self.resolver.schema_deep(node)?;

        if schema.effective_type() == SchemaType::Array {
            // One opaque field carrying the whole body; requiredness
            // applies to the array as a whole, never per item.
            let mut field = self.from_schema("body", schema);
            field.required = body_required;
            field.routing = Some(RoutingDirective::Body {
                target: BodyTarget::Whole,
                value: ValueExtraction::ParseJson,
            });
            return Ok(vec![field]);
        }

        if schema.is_object() {
            let mut fields = Vec::with_capacity(schema.properties.len());
            for (name, prop) in &schema.properties {
                let prop_schema = self.resolver.schema_deep(prop)?;
                let mut field = self.from_schema(name, prop_schema);
                field.required = schema.required.iter().any(|r| r == name);
                let value = if field.kind == FieldKind::Json {
                    ValueExtraction::ParseJson
                } else {
                    ValueExtraction::Verbatim
                };
                field.routing = Some(RoutingDirective::Body {
                    target: BodyTarget::Key(name.clone()),
                    value,
                });
                fields.push(field);
            }
            return Ok(fields);
        }

        Err(CompileError::UnsupportedBodySchema)
    }

    fn multipart_fields(&self, media: &'a MediaType) -> Result<Vec<FieldDefinition>, CompileError> {
        let Some(node) = &media.schema else {
            return Err(CompileError::MultipartSchemaMissingProperties);
        };
        let schema = self.resolver.schema_deep(node)?;
        if schema.properties.is_empty() {
            return Err(CompileError::MultipartSchemaMissingProperties);
        }

        let mut fields = Vec::with_capacity(schema.properties.len());
        for (name, prop) in &schema.properties {
            let prop_schema = self.resolver.schema_deep(prop)?;
            let required = schema.required.iter().any(|r| r == name);

            let field = if prop_schema.format.as_deref() == Some("binary") {
                FieldDefinition {
                    display_name: naming::display_name(name),
                    name: name.clone(),
                    kind: FieldKind::String,
                    default: Value::String(String::new()),
                    description: prop_schema.description.clone(),
                    required,
                    options: Vec::new(),
                    file_path: true,
                    routing: Some(RoutingDirective::Body {
                        target: BodyTarget::Key(name.clone()),
                        value: ValueExtraction::BinaryPayload,
                    }),
                    display: None,
                }
            } else {
                let mut field = self.from_schema(name, prop_schema);
                field.required = required;
                field.routing = Some(RoutingDirective::Body {
                    target: BodyTarget::Key(name.clone()),
                    value: ValueExtraction::Verbatim,
                });
                field
            };
            fields.push(field);
        }
        Ok(fields)
    }

    /// Finalize one operation's fields: attach the shared display scope,
    /// then float any field keyed `session` to the front. All other
    /// relative order is preserved.
    pub fn finalize(fields: &mut Vec<FieldDefinition>, resource: &str, operation: &str) {
        for field in fields.iter_mut() {
            field.display = Some(DisplayScope {
                resource: resource.to_string(),
                operation: Some(operation.to_string()),
            });
        }
        if let Some(pos) = fields.iter().position(|f| f.name == "session") {
            if pos > 0 {
                let session = fields.remove(pos);
                fields.insert(0, session);
            }
        }
    }
}

fn content_for<'a>(
    content: &'a IndexMap<String, MediaType>,
    prefix: &str,
) -> Option<&'a MediaType> {
    content
        .iter()
        .find(|(label, _)| label.starts_with(prefix))
        .map(|(_, media)| media)
}

fn declared_default(schema: &Schema) -> Option<Value> {
    schema
        .default_value
        .clone()
        .or_else(|| schema.example.clone())
}

/// Serialize a value to its compact JSON text, as a string value.
fn json_text(value: &Value) -> Value {
    Value::String(value.to_string())
}
