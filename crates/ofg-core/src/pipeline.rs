use crate::collect::{OperationCollector, ResourceCollector};
use crate::config::CompilerOptions;
use crate::document::Document;
use crate::error::CompileError;
use crate::fields::FieldDefinition;
use crate::walk::DocumentWalker;

/// The compiled output set: the resource selector, one operation
/// selector per resource, and the flattened per-operation input fields.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledProperties {
    pub resource: FieldDefinition,
    pub operations: Vec<FieldDefinition>,
    pub fields: Vec<FieldDefinition>,
}

impl CompiledProperties {
    /// All fields in host presentation order: resource selector,
    /// operation selectors, then operation inputs.
    pub fn into_flat(self) -> Vec<FieldDefinition> {
        let mut flat = Vec::with_capacity(1 + self.operations.len() + self.fields.len());
        flat.push(self.resource);
        flat.extend(self.operations);
        flat.extend(self.fields);
        flat
    }
}

/// Orchestrates compilation: one walker pass per collector over the
/// same document, then aggregation. A pure function of the document —
/// repeated runs produce structurally identical output.
pub struct Pipeline {
    options: CompilerOptions,
}

impl Pipeline {
    pub fn new(options: CompilerOptions) -> Self {
        Self { options }
    }

    pub fn run(&self, document: &Document) -> Result<CompiledProperties, CompileError> {
        let walker = DocumentWalker::new(document);

        let mut resources = ResourceCollector::new(document);
        walker.walk(&mut resources)?;

        let mut operations = OperationCollector::new(document, self.options.clone());
        walker.walk(&mut operations)?;

        let compiled = CompiledProperties {
            resource: resources.field()?,
            operations: operations.selector_fields(),
            fields: operations.into_fields(),
        };
        log::debug!(
            "compiled {} operation selectors and {} fields",
            compiled.operations.len(),
            compiled.fields.len()
        );
        Ok(compiled)
    }
}
