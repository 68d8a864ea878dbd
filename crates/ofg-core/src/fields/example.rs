use serde_json::{Map, Value};

use crate::document::{Schema, SchemaOrRef};
use crate::resolve::Resolver;

/// Derive a representative value for a resolved schema.
///
/// The declared example wins. Object schemas synthesize one from their
/// properties' own examples, omitting properties without one; an empty
/// synthesis counts as no example. Inline property schemas are traversed
/// recursively; referenced property schemas contribute only their
/// declared example after one resolution hop, which bounds recursion on
/// cyclic reference graphs. Never fails: `None` means "no example
/// available", distinct from a present `null`.
pub fn extract_example(schema: &Schema, resolver: &Resolver<'_>) -> Option<Value> {
    if let Some(example) = &schema.example {
        return Some(example.clone());
    }
    if !schema.is_object() {
        return None;
    }

    let mut synthesized = Map::new();
    for (name, prop) in &schema.properties {
        let value = match prop {
            SchemaOrRef::Schema(inline) => extract_example(inline, resolver),
            SchemaOrRef::Ref { .. } => match resolver.resolve_schema(prop) {
                Ok(SchemaOrRef::Schema(target)) => target.example.clone(),
                _ => None,
            },
        };
        if let Some(value) = value {
            synthesized.insert(name.clone(), value);
        }
    }

    if synthesized.is_empty() {
        None
    } else {
        Some(Value::Object(synthesized))
    }
}
