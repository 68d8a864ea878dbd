use indexmap::IndexMap;
use serde_json::Value;

use crate::config::CompilerOptions;
use crate::document::Document;
use crate::error::CompileError;
use crate::fields::{
    DisplayScope, FieldCompiler, FieldDefinition, FieldKind, FieldOption, RoutedRequest,
};
use crate::naming;
use crate::walk::{DocumentVisitor, OperationContext};

/// Builds, per resource, the operation selector and the flattened list
/// of compiled per-operation input fields.
pub struct OperationCollector<'a> {
    compiler: FieldCompiler<'a>,
    options: CompilerOptions,
    selector_options: IndexMap<String, Vec<FieldOption>>,
    fields: Vec<FieldDefinition>,
}

impl<'a> OperationCollector<'a> {
    pub fn new(document: &'a Document, options: CompilerOptions) -> Self {
        Self {
            compiler: FieldCompiler::new(document),
            options,
            selector_options: IndexMap::new(),
            fields: Vec::new(),
        }
    }

    /// One `operation` selector field per collected resource.
    pub fn selector_fields(&self) -> Vec<FieldDefinition> {
        self.selector_options
            .iter()
            .map(|(resource, options)| FieldDefinition {
                display_name: "Operation".to_string(),
                name: "operation".to_string(),
                kind: FieldKind::Options,
                default: options
                    .first()
                    .map(|o| o.value.clone())
                    .unwrap_or_else(|| Value::String(String::new())),
                description: None,
                required: false,
                options: options.clone(),
                file_path: false,
                routing: None,
                display: Some(DisplayScope {
                    resource: resource.clone(),
                    operation: None,
                }),
            })
            .collect()
    }

    /// The flattened input fields of every collected operation.
    pub fn into_fields(self) -> Vec<FieldDefinition> {
        self.fields
    }

    fn collect_operation(&mut self, ctx: &OperationContext<'a>) -> Result<(), CompileError> {
        let operation_id = ctx
            .operation
            .operation_id
            .clone()
            .unwrap_or_else(|| naming::route_operation_id(ctx.method, ctx.path));

        self.selector_options
            .entry(ctx.resource.to_string())
            .or_default()
            .push(FieldOption {
                name: naming::operation_display_name(ctx.resource, &operation_id),
                value: Value::String(operation_id.clone()),
                description: ctx.operation.description.clone(),
                action: ctx.operation.summary.clone(),
                request: Some(RoutedRequest {
                    method: ctx.method,
                    url: naming::interpolated_url(ctx.path),
                }),
            });

        let mut fields = Vec::new();
        for &parameter in &ctx.parameters {
            fields.push(self.compiler.from_parameter(parameter)?);
        }
        if let Some(body) = &ctx.operation.request_body {
            fields.extend(self.compiler.from_request_body(body)?);
        }
        FieldCompiler::finalize(&mut fields, ctx.resource, &operation_id);

        if self.options.notice_fields {
            fields.insert(
                0,
                FieldDefinition {
                    display_name: format!("{} {}", ctx.method.as_str(), ctx.path),
                    name: "notice".to_string(),
                    kind: FieldKind::Notice,
                    default: Value::String(String::new()),
                    description: None,
                    required: false,
                    options: Vec::new(),
                    file_path: false,
                    routing: None,
                    display: Some(DisplayScope {
                        resource: ctx.resource.to_string(),
                        operation: Some(operation_id),
                    }),
                },
            );
        }

        self.fields.extend(fields);
        Ok(())
    }
}

impl<'a> DocumentVisitor<'a> for OperationCollector<'a> {
    fn visit_operation(&mut self, ctx: &OperationContext<'a>) -> Result<(), CompileError> {
        self.collect_operation(ctx)
            .map_err(|e| e.within(ctx.method, ctx.path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document;
    use crate::walk::DocumentWalker;

    const DOC: &str = r#"
paths:
  /pets:
    get:
      operationId: Pets_list
      summary: List pets
      parameters:
        - {name: limit, in: query, schema: {type: integer}}
  /pets/{petId}:
    get:
      operationId: Pets_get
"#;

    fn collect(
        yaml: &str,
        options: CompilerOptions,
    ) -> (Vec<FieldDefinition>, Vec<FieldDefinition>) {
        let doc = document::from_yaml(yaml).unwrap();
        let mut collector = OperationCollector::new(&doc, options);
        DocumentWalker::new(&doc).walk(&mut collector).unwrap();
        (collector.selector_fields(), collector.into_fields())
    }

    #[test]
    fn selector_strips_resource_prefix_and_routes() {
        let (selectors, _) = collect(DOC, CompilerOptions::default());
        assert_eq!(selectors.len(), 1);

        let selector = &selectors[0];
        assert_eq!(selector.name, "operation");
        assert_eq!(
            selector.display.as_ref().unwrap().resource.as_str(),
            "pets"
        );
        assert_eq!(selector.default, serde_json::json!("Pets_list"));

        let option = &selector.options[0];
        assert_eq!(option.name, "List");
        assert_eq!(option.action.as_deref(), Some("List pets"));
        let request = option.request.as_ref().unwrap();
        assert_eq!(request.method.as_str(), "GET");
        assert_eq!(request.url, "=/pets");

        let second = &selector.options[1];
        assert_eq!(second.request.as_ref().unwrap().url, "=/pets/{{$parameter[\"petId\"]}}");
    }

    #[test]
    fn notice_field_precedes_operation_inputs() {
        let (_, fields) = collect(DOC, CompilerOptions::default());
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["notice", "limit", "notice"]);
        assert_eq!(fields[0].kind, FieldKind::Notice);
        assert_eq!(fields[0].display_name, "GET /pets");
        assert_eq!(
            fields[0].display.as_ref().unwrap().operation.as_deref(),
            Some("Pets_list")
        );
    }

    #[test]
    fn notice_fields_can_be_disabled() {
        let (_, fields) = collect(
            DOC,
            CompilerOptions {
                notice_fields: false,
            },
        );
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["limit"]);
    }
}
