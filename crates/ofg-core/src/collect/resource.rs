use serde_json::Value;

use crate::document::Document;
use crate::error::CompileError;
use crate::fields::{FieldDefinition, FieldKind, FieldOption};
use crate::naming;
use crate::walk::DocumentVisitor;

/// Accumulates the distinct, first-seen-ordered set of resource names
/// into a single selector field named `resource`.
pub struct ResourceCollector<'a> {
    document: &'a Document,
    resources: Vec<String>,
}

impl<'a> ResourceCollector<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self {
            document,
            resources: Vec::new(),
        }
    }

    /// The compiled resource selector. Fails with `ResourceNotFound`
    /// until a traversal has collected at least one resource.
    pub fn field(&self) -> Result<FieldDefinition, CompileError> {
        if self.resources.is_empty() {
            return Err(CompileError::ResourceNotFound);
        }

        let options: Vec<FieldOption> = self
            .resources
            .iter()
            .map(|resource| FieldOption {
                name: naming::display_name(resource),
                value: Value::String(resource.clone()),
                description: self
                    .document
                    .tag_description(resource)
                    .map(|d| d.to_string()),
                action: None,
                request: None,
            })
            .collect();

        Ok(FieldDefinition {
            display_name: "Resource".to_string(),
            name: "resource".to_string(),
            kind: FieldKind::Options,
            default: options[0].value.clone(),
            description: None,
            required: false,
            options,
            file_path: false,
            routing: None,
            display: None,
        })
    }
}

impl<'a> DocumentVisitor<'a> for ResourceCollector<'_> {
    fn visit_resource(&mut self, resource: &'a str) -> Result<(), CompileError> {
        if !self.resources.iter().any(|r| r == resource) {
            self.resources.push(resource.to_string());
        }
        Ok(())
    }
}
