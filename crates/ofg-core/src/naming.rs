use heck::{ToPascalCase, ToTitleCase};

use crate::document::HttpMethod;

/// Human-readable display name for a raw key or enum value.
///
/// `createCustomer` → `Create Customer`, `pet-store` → `Pet Store`.
pub fn display_name(raw: &str) -> String {
    raw.to_title_case()
}

/// Label for a raw enumerated value. Strings are title-cased; other
/// values keep their JSON rendering.
pub fn option_label(value: &serde_json::Value) -> String {
    match value.as_str() {
        Some(s) => display_name(s),
        None => value.to_string(),
    }
}

/// Display name for an operation, dropping a conventional resource-name
/// prefix segment (`Pets_list`, `pets.list`) when one is present.
pub fn operation_display_name(resource: &str, operation_id: &str) -> String {
    let stripped = operation_id
        .split_once(['_', '.'])
        .filter(|(prefix, _)| prefix.eq_ignore_ascii_case(resource))
        .map(|(_, rest)| rest)
        .unwrap_or(operation_id);
    display_name(stripped)
}

/// Fallback operation identifier derived from method + path, for
/// operations without a declared identifier.
///
/// `GET /pets` → `listPets`, `GET /pets/{petId}` → `getPets`,
/// `POST /users/{id}/messages` → `createUsersMessages`.
pub fn route_operation_id(method: HttpMethod, path: &str) -> String {
    let mut resource_parts: Vec<&str> = Vec::new();
    let mut ends_with_param = false;

    for seg in path.split('/').filter(|s| !s.is_empty()) {
        if seg.starts_with('{') && seg.ends_with('}') {
            ends_with_param = true;
        } else {
            resource_parts.push(seg);
            ends_with_param = false;
        }
    }

    let verb = match method {
        HttpMethod::Get if ends_with_param => "get".to_string(),
        HttpMethod::Get => "list".to_string(),
        HttpMethod::Post => "create".to_string(),
        HttpMethod::Put => "update".to_string(),
        HttpMethod::Delete => "delete".to_string(),
        HttpMethod::Patch => "patch".to_string(),
        other => other.as_str().to_ascii_lowercase(),
    };

    let mut id = verb;
    for part in resource_parts {
        id.push_str(&part.to_pascal_case());
    }
    id
}

/// Rewrite a URI template into the host runtime's expression syntax:
/// `/pets/{petId}` → `=/pets/{{$parameter["petId"]}}`.
pub fn interpolated_url(path: &str) -> String {
    let mut out = String::with_capacity(path.len() + 16);
    out.push('=');

    let mut rest = path;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        match after.find('}') {
            Some(end) => {
                out.push_str("{{$parameter[\"");
                out.push_str(&after[..end]);
                out.push_str("\"]}}");
                rest = &after[end + 1..];
            }
            None => {
                // Unbalanced brace: emit the tail verbatim.
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
