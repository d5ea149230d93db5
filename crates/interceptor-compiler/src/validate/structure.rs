//! Catalog structure validation.
//!
//! Every declaration needs a usable name, names are unique across the whole
//! description, and no two names may generate the same type identifier.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::codegen::naming::{is_valid_identifier, to_pascal_case};
use crate::diagnostic::{ScopePath, ValidationError};
use crate::ir::ApiDescription;

/// Validates catalog declarations.
pub fn validate_catalog(desc: &ApiDescription, errors: &mut Vec<ValidationError>) {
    let mut declared: HashMap<&str, &ScopePath> = HashMap::new();
    let mut identifiers: HashMap<String, &str> = HashMap::new();

    for (_, intr) in desc.catalog.iter() {
        let ident = to_pascal_case(&intr.name);
        if !is_valid_identifier(&ident) {
            errors.push(ValidationError::InvalidName {
                name: intr.name.clone(),
                scope: intr.declared_in.clone(),
                what: "interceptor declaration".to_string(),
            });
            continue;
        }

        if let Some(first) = declared.get(intr.name.as_str()) {
            errors.push(ValidationError::DuplicateInterceptor {
                name: intr.name.clone(),
                first: (*first).clone(),
                second: intr.declared_in.clone(),
            });
            continue;
        }
        declared.insert(&intr.name, &intr.declared_in);

        match identifiers.entry(ident) {
            Entry::Occupied(existing) => errors.push(ValidationError::IdentifierCollision {
                identifier: existing.key().clone(),
                first: existing.get().to_string(),
                second: intr.name.clone(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(&intr.name);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::InterceptorIR;

    fn check(decls: &[(&str, ScopePath)]) -> Vec<ValidationError> {
        let mut desc = ApiDescription::new("API");
        for (name, scope) in decls {
            desc.catalog.declare(InterceptorIR::new(*name, scope.clone()));
        }
        let mut errors = Vec::new();
        validate_catalog(&desc, &mut errors);
        errors
    }

    #[test]
    fn accepts_distinct_names() {
        let errors = check(&[
            ("api", ScopePath::Api),
            ("service", ScopePath::service("Service")),
            ("method", ScopePath::method("Service", "Method")),
        ]);
        assert!(errors.is_empty());
    }

    #[test]
    fn rejects_empty_declaration_name() {
        let errors = check(&[("", ScopePath::Api)]);
        assert_eq!(
            errors,
            vec![ValidationError::InvalidName {
                name: String::new(),
                scope: ScopePath::Api,
                what: "interceptor declaration".to_string(),
            }]
        );
    }

    #[test]
    fn reports_duplicate_against_second_declaration() {
        for first_scope in [
            ScopePath::Api,
            ScopePath::service("Service"),
            ScopePath::method("Service", "Method"),
        ] {
            let errors = check(&[
                ("duplicate", first_scope.clone()),
                ("duplicate", ScopePath::service("Other")),
            ]);
            assert_eq!(
                errors,
                vec![ValidationError::DuplicateInterceptor {
                    name: "duplicate".to_string(),
                    first: first_scope,
                    second: ScopePath::service("Other"),
                }]
            );
        }
    }

    #[test]
    fn rejects_colliding_identifiers() {
        let errors = check(&[("rate-limit", ScopePath::Api), ("rate_limit", ScopePath::Api)]);
        assert_eq!(
            errors,
            vec![ValidationError::IdentifierCollision {
                identifier: "RateLimit".to_string(),
                first: "rate-limit".to_string(),
                second: "rate_limit".to_string(),
            }]
        );
    }
}
