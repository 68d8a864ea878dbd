use std::collections::HashSet;

use crate::document::{
    Components, Document, Parameter, ParameterOrRef, RequestBody, RequestBodyOrRef, Schema,
    SchemaOrRef,
};
use crate::error::ResolveError;

/// Dereferences `#/components/...` pointers against a document's
/// component registry.
///
/// Each `resolve_*` call performs exactly one indirection: inline nodes
/// come back unchanged, references come back as their registry target,
/// which may itself be a reference. The `*_deep` variants chase such
/// chains with a visited set and fail on cycles instead of recursing
/// forever. Side-effect-free.
pub struct Resolver<'a> {
    components: Option<&'a Components>,
}

impl<'a> Resolver<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self {
            components: document.components.as_ref(),
        }
    }

    /// One resolution hop for a schema node.
    pub fn resolve_schema(&self, node: &'a SchemaOrRef) -> Result<&'a SchemaOrRef, ResolveError> {
        match node {
            SchemaOrRef::Ref { ref_path } => self.lookup_schema(ref_path),
            SchemaOrRef::Schema(_) => Ok(node),
        }
    }

    /// One resolution hop for a parameter node.
    pub fn resolve_parameter(
        &self,
        node: &'a ParameterOrRef,
    ) -> Result<&'a ParameterOrRef, ResolveError> {
        match node {
            ParameterOrRef::Ref { ref_path } => self.lookup_parameter(ref_path),
            ParameterOrRef::Parameter(_) => Ok(node),
        }
    }

    /// One resolution hop for a request body node.
    pub fn resolve_request_body(
        &self,
        node: &'a RequestBodyOrRef,
    ) -> Result<&'a RequestBodyOrRef, ResolveError> {
        match node {
            RequestBodyOrRef::Ref { ref_path } => self.lookup_request_body(ref_path),
            RequestBodyOrRef::RequestBody(_) => Ok(node),
        }
    }

    /// Resolve to a concrete schema, following alias chains.
    pub fn schema_deep(&self, node: &'a SchemaOrRef) -> Result<&'a Schema, ResolveError> {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut current = node;
        loop {
            match current {
                SchemaOrRef::Schema(schema) => return Ok(schema),
                SchemaOrRef::Ref { ref_path } => {
                    if !visited.insert(ref_path.as_str()) {
                        return Err(ResolveError::CircularReference(ref_path.clone()));
                    }
                    current = self.lookup_schema(ref_path)?;
                }
            }
        }
    }

    /// Resolve to a concrete parameter, following alias chains.
    pub fn parameter_deep(&self, node: &'a ParameterOrRef) -> Result<&'a Parameter, ResolveError> {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut current = node;
        loop {
            match current {
                ParameterOrRef::Parameter(param) => return Ok(param),
                ParameterOrRef::Ref { ref_path } => {
                    if !visited.insert(ref_path.as_str()) {
                        return Err(ResolveError::CircularReference(ref_path.clone()));
                    }
                    current = self.lookup_parameter(ref_path)?;
                }
            }
        }
    }

    /// Resolve to a concrete request body, following alias chains.
    pub fn request_body_deep(
        &self,
        node: &'a RequestBodyOrRef,
    ) -> Result<&'a RequestBody, ResolveError> {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut current = node;
        loop {
            match current {
                RequestBodyOrRef::RequestBody(body) => return Ok(body),
                RequestBodyOrRef::Ref { ref_path } => {
                    if !visited.insert(ref_path.as_str()) {
                        return Err(ResolveError::CircularReference(ref_path.clone()));
                    }
                    current = self.lookup_request_body(ref_path)?;
                }
            }
        }
    }

    // Lookup helpers

    fn lookup_schema(&self, ref_path: &str) -> Result<&'a SchemaOrRef, ResolveError> {
        let name = ref_name(ref_path, "schemas")?;
        self.components
            .and_then(|c| c.schemas.get(name))
            .ok_or_else(|| ResolveError::BrokenReference(ref_path.to_string()))
    }

    fn lookup_parameter(&self, ref_path: &str) -> Result<&'a ParameterOrRef, ResolveError> {
        let name = ref_name(ref_path, "parameters")?;
        self.components
            .and_then(|c| c.parameters.get(name))
            .ok_or_else(|| ResolveError::BrokenReference(ref_path.to_string()))
    }

    fn lookup_request_body(&self, ref_path: &str) -> Result<&'a RequestBodyOrRef, ResolveError> {
        let name = ref_name(ref_path, "requestBodies")?;
        self.components
            .and_then(|c| c.request_bodies.get(name))
            .ok_or_else(|| ResolveError::BrokenReference(ref_path.to_string()))
    }
}

/// Parse a pointer like `#/components/schemas/Foo` and extract the name.
fn ref_name<'a>(ref_path: &'a str, expected_section: &str) -> Result<&'a str, ResolveError> {
    let broken = || ResolveError::BrokenReference(ref_path.to_string());
    let stripped = ref_path.strip_prefix("#/components/").ok_or_else(broken)?;
    let (section, name) = stripped.split_once('/').ok_or_else(broken)?;
    if section != expected_section {
        return Err(broken());
    }
    Ok(name)
}
