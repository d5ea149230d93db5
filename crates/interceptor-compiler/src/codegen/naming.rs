//! Generated identifier forms and type references.

use super::AccessMode;
use crate::diagnostic::AccessSide;
use crate::ir::{AttributeType, Direction};

/// Converts a type to the reference used in generated declarations.
pub fn type_ref(typ: &AttributeType) -> String {
    match typ {
        AttributeType::String => "string".to_string(),
        AttributeType::Int => "int".to_string(),
        AttributeType::Int64 => "int64".to_string(),
        AttributeType::Float64 => "float64".to_string(),
        AttributeType::Boolean => "bool".to_string(),
        AttributeType::Bytes => "[]byte".to_string(),
        AttributeType::Any => "any".to_string(),
        AttributeType::Array(inner) => format!("[]{}", type_ref(inner)),
        AttributeType::Map(key, value) => format!("map[{}]{}", type_ref(key), type_ref(value)),
        AttributeType::Object(obj) => {
            let fields: Vec<String> = obj
                .fields
                .iter()
                .map(|f| format!("{} {}", to_pascal_case(&f.name), type_ref(&f.typ)))
                .collect();
            format!("struct {{ {} }}", fields.join("; "))
        }
        AttributeType::Reference(name) => format!("*{}", to_pascal_case(name)),
    }
}

/// Splits a name into words on separators and case changes.
fn words(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower) {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Converts a name to PascalCase (`rate-limit` → `RateLimit`).
pub fn to_pascal_case(s: &str) -> String {
    words(s)
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().chain(chars).collect(),
            }
        })
        .collect()
}

/// Converts a name to snake_case (`CatalogService` → `catalog_service`).
pub fn to_snake_case(s: &str) -> String {
    words(s)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Converts a name to camelCase.
pub fn to_camel_case(s: &str) -> String {
    let pascal = to_pascal_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

/// Whether a generated identifier is usable as a type or function name.
pub fn is_valid_identifier(ident: &str) -> bool {
    ident.chars().next().is_some_and(|c| c.is_alphabetic())
}

/// Wrapper function of `interceptor` around `method`.
pub fn wrapper_name(direction: Direction, method: &str, interceptor: &str) -> String {
    let prefix = match direction {
        Direction::Server => "wrap",
        Direction::Client => "wrapClient",
    };
    format!("{}{}{}", prefix, to_pascal_case(method), to_pascal_case(interceptor))
}

/// Restricted view type of `interceptor` over one side of `method`.
pub fn view_type_name(interceptor: &str, method: &str, side: AccessSide, mode: AccessMode) -> String {
    format!(
        "{}{}{}{}",
        to_camel_case(interceptor),
        to_pascal_case(method),
        to_pascal_case(&side.to_string()),
        mode.suffix()
    )
}
