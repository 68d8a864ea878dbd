use indexmap::IndexMap;

use crate::document::{Document, HttpMethod, Operation, ParameterOrRef};
use crate::error::CompileError;

/// One operation as seen during traversal: its resource grouping, route,
/// and the merged parameter list (path-level parameters first, then the
/// operation's own, both in declaration order).
pub struct OperationContext<'a> {
    pub resource: &'a str,
    pub path: &'a str,
    pub method: HttpMethod,
    pub operation: &'a Operation,
    pub parameters: Vec<&'a ParameterOrRef>,
}

/// Per-node hooks invoked by the walker. Implementors accumulate;
/// traversal order belongs to the walker alone. The lifetime is the
/// walked document's, letting collectors hold on to borrowed nodes.
pub trait DocumentVisitor<'a> {
    fn visit_resource(&mut self, _resource: &'a str) -> Result<(), CompileError> {
        Ok(())
    }

    fn visit_operation(&mut self, _ctx: &OperationContext<'a>) -> Result<(), CompileError> {
        Ok(())
    }
}

/// Single-pass traversal of a document's path/operation graph.
///
/// Operations are grouped by resource — first tag when present, else the
/// first non-parameter path segment — keeping first-seen resource order
/// and document order within each resource. Each group is pushed through
/// the visitor: the resource hook once, then the operation hook per
/// operation.
pub struct DocumentWalker<'a> {
    document: &'a Document,
}

impl<'a> DocumentWalker<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self { document }
    }

    pub fn walk(&self, visitor: &mut dyn DocumentVisitor<'a>) -> Result<(), CompileError> {
        let mut groups: IndexMap<&'a str, Vec<OperationContext<'a>>> = IndexMap::new();

        for (path, item) in &self.document.paths {
            for (method, operation) in item.operations() {
                let resource = resource_name(operation, path);
                let mut parameters: Vec<&ParameterOrRef> = item.parameters.iter().collect();
                parameters.extend(operation.parameters.iter());
                groups.entry(resource).or_default().push(OperationContext {
                    resource,
                    path,
                    method,
                    operation,
                    parameters,
                });
            }
        }

        log::debug!(
            "walking {} operations across {} resources",
            groups.values().map(Vec::len).sum::<usize>(),
            groups.len()
        );

        for (&resource, operations) in &groups {
            visitor.visit_resource(resource)?;
            for ctx in operations {
                visitor.visit_operation(ctx)?;
            }
        }
        Ok(())
    }
}

/// The resource an operation belongs to: its first tag, else the first
/// non-parameter segment of its path.
fn resource_name<'a>(operation: &'a Operation, path: &'a str) -> &'a str {
    if let Some(tag) = operation.tags.first() {
        return tag;
    }
    path.split('/')
        .find(|s| !s.is_empty() && !s.starts_with('{'))
        .unwrap_or("default")
}
