use ofg_core::config::CompilerOptions;
use ofg_core::document;
use ofg_core::error::CompileError;
use ofg_core::fields::{
    BodyTarget, FieldDefinition, FieldKind, RoutingDirective, ValueExtraction,
};
use ofg_core::pipeline::{CompiledProperties, Pipeline};
use serde_json::json;

const PETSTORE: &str = include_str!("fixtures/petstore.yaml");
const UPLOADS: &str = include_str!("fixtures/uploads.yaml");

fn run(yaml: &str) -> CompiledProperties {
    let doc = document::from_yaml(yaml).unwrap();
    Pipeline::new(CompilerOptions::default()).run(&doc).unwrap()
}

fn operation_fields<'a>(
    compiled: &'a CompiledProperties,
    operation: &str,
) -> Vec<&'a FieldDefinition> {
    compiled
        .fields
        .iter()
        .filter(|f| {
            f.display
                .as_ref()
                .is_some_and(|d| d.operation.as_deref() == Some(operation))
        })
        .collect()
}

#[test]
fn path_parameter_and_json_body_properties() {
    let compiled = run(PETSTORE);
    let fields = operation_fields(&compiled, "Pets_update");
    let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["notice", "petId", "name", "active"]);

    // Declared required: false — path substitution forces it.
    let pet_id = fields[1];
    assert!(pet_id.required);
    assert_eq!(pet_id.kind, FieldKind::String);
    assert_eq!(
        pet_id.routing,
        Some(RoutingDirective::Path {
            segment: "petId".to_string(),
            value: ValueExtraction::Verbatim,
        })
    );

    let name = fields[2];
    assert!(name.required);
    assert_eq!(name.default, json!(""));
    assert_eq!(
        name.routing,
        Some(RoutingDirective::Body {
            target: BodyTarget::Key("name".to_string()),
            value: ValueExtraction::Verbatim,
        })
    );

    let active = fields[3];
    assert!(!active.required);
    assert_eq!(active.kind, FieldKind::Boolean);
    assert_eq!(active.default, json!(true));
    assert_eq!(
        active.routing,
        Some(RoutingDirective::Body {
            target: BodyTarget::Key("active".to_string()),
            value: ValueExtraction::Verbatim,
        })
    );
}

#[test]
fn referenced_body_schema_compiles_per_property() {
    let compiled = run(PETSTORE);
    let fields = operation_fields(&compiled, "Pets_create");
    let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["notice", "name", "tag", "profile"]);

    // Property examples become defaults.
    assert_eq!(fields[1].default, json!("Rex"));
    assert!(fields[1].required);
    assert_eq!(fields[2].default, json!(""));

    // Nested objects stay opaque structured text, re-parsed on routing.
    let profile = fields[3];
    assert_eq!(profile.kind, FieldKind::Json);
    let default: serde_json::Value =
        serde_json::from_str(profile.default.as_str().unwrap()).unwrap();
    assert_eq!(default, json!({"color": "brown"}));
    assert_eq!(
        profile.routing,
        Some(RoutingDirective::Body {
            target: BodyTarget::Key("profile".to_string()),
            value: ValueExtraction::ParseJson,
        })
    );
}

#[test]
fn enum_parameter_keeps_order_and_first_default() {
    let compiled = run(PETSTORE);
    let fields = operation_fields(&compiled, "Pets_list");
    let status = fields.iter().find(|f| f.name == "status").unwrap();
    assert_eq!(status.kind, FieldKind::Options);
    assert_eq!(status.default, json!("available"));
    assert_eq!(status.options.len(), 3);
    let labels: Vec<&str> = status.options.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(labels, ["Available", "Pending", "Sold"]);
    assert_eq!(
        status.routing,
        Some(RoutingDirective::Query {
            parameter: "status".to_string(),
            value: ValueExtraction::Verbatim,
        })
    );
}

#[test]
fn array_body_compiles_to_single_whole_body_field() {
    let compiled = run(UPLOADS);
    let fields = operation_fields(&compiled, "Documents_batchCreate");
    let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["notice", "body"]);

    let body = fields[1];
    assert_eq!(body.kind, FieldKind::Json);
    assert_eq!(body.default, json!("[]"));
    assert!(body.required);
    assert_eq!(
        body.routing,
        Some(RoutingDirective::Body {
            target: BodyTarget::Whole,
            value: ValueExtraction::ParseJson,
        })
    );
}

#[test]
fn multipart_body_routes_binary_and_plain_properties() {
    let compiled = run(UPLOADS);
    let fields = operation_fields(&compiled, "Documents_upload");
    let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["notice", "file", "caption"]);

    let file = fields[1];
    assert_eq!(file.kind, FieldKind::String);
    assert!(file.file_path);
    assert!(file.required);
    assert_eq!(file.description.as_deref(), Some("Contents to upload"));
    assert_eq!(
        file.routing,
        Some(RoutingDirective::Body {
            target: BodyTarget::Key("file".to_string()),
            value: ValueExtraction::BinaryPayload,
        })
    );

    let caption = fields[2];
    assert!(!caption.file_path);
    assert_eq!(
        caption.routing,
        Some(RoutingDirective::Body {
            target: BodyTarget::Key("caption".to_string()),
            value: ValueExtraction::Verbatim,
        })
    );
}

#[test]
fn json_family_content_type_suffix_matches() {
    let compiled = run(r#"
paths:
  /notes:
    post:
      operationId: Notes_create
      requestBody:
        content:
          "application/json; charset=utf-8":
            schema:
              type: object
              properties:
                text: { type: string }
"#);
    let fields = operation_fields(&compiled, "Notes_create");
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[1].name, "text");
}

#[test]
fn unsupported_content_type_fails() {
    let doc = document::from_yaml(
        r#"
paths:
  /notes:
    post:
      operationId: Notes_create
      requestBody:
        content:
          text/plain:
            schema: { type: string }
"#,
    )
    .unwrap();
    let err = Pipeline::new(CompilerOptions::default())
        .run(&doc)
        .unwrap_err();
    match err {
        CompileError::Operation { path, source, .. } => {
            assert_eq!(path, "/notes");
            assert!(matches!(
                *source,
                CompileError::UnsupportedBodyContentType { .. }
            ));
        }
        other => panic!("expected operation-scoped error, got {other}"),
    }
}

#[test]
fn scalar_json_body_schema_fails() {
    let doc = document::from_yaml(
        r#"
paths:
  /notes:
    post:
      operationId: Notes_create
      requestBody:
        content:
          application/json:
            schema: { type: string }
"#,
    )
    .unwrap();
    let err = Pipeline::new(CompilerOptions::default())
        .run(&doc)
        .unwrap_err();
    assert!(
        matches!(&err, CompileError::Operation { source, .. }
            if matches!(**source, CompileError::UnsupportedBodySchema))
    );
}

#[test]
fn multipart_without_properties_fails() {
    let doc = document::from_yaml(
        r#"
paths:
  /uploads:
    post:
      operationId: Uploads_create
      requestBody:
        content:
          multipart/form-data:
            schema: { type: object }
"#,
    )
    .unwrap();
    let err = Pipeline::new(CompilerOptions::default())
        .run(&doc)
        .unwrap_err();
    assert!(
        matches!(&err, CompileError::Operation { source, .. }
            if matches!(**source, CompileError::MultipartSchemaMissingProperties))
    );
}

#[test]
fn cookie_parameter_fails() {
    let doc = document::from_yaml(
        r#"
paths:
  /notes:
    get:
      operationId: Notes_list
      parameters:
        - { name: trace, in: cookie, schema: { type: string } }
"#,
    )
    .unwrap();
    let err = Pipeline::new(CompilerOptions::default())
        .run(&doc)
        .unwrap_err();
    assert!(
        matches!(&err, CompileError::Operation { source, .. }
            if matches!(&**source, CompileError::UnsupportedParameterLocation { name, .. } if name == "trace"))
    );
}

#[test]
fn broken_reference_is_located_by_operation() {
    let doc = document::from_yaml(
        r##"
paths:
  /notes:
    post:
      operationId: Notes_create
      requestBody:
        content:
          application/json:
            schema:
              $ref: "#/components/schemas/Missing"
"##,
    )
    .unwrap();
    let err = Pipeline::new(CompilerOptions::default())
        .run(&doc)
        .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("POST /notes"), "got: {message}");
}
