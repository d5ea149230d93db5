//! Reference validation.

use crate::diagnostic::{ScopePath, ValidationError};
use crate::ir::{ApiDescription, Direction, InterceptorRef, ScopeAttachment};

/// Validates every attachment reference at every scope.
pub fn validate_references(desc: &ApiDescription, errors: &mut Vec<ValidationError>) {
    for rejected in &desc.rejected_references {
        errors.push(ValidationError::InvalidReference {
            found: rejected.found.clone(),
            scope: rejected.scope.clone(),
            direction: rejected.direction,
        });
    }

    check_attachment(desc, &desc.attachments, &ScopePath::Api, errors);
    for svc in &desc.services {
        check_attachment(desc, &svc.attachments, &ScopePath::service(&svc.name), errors);
        for method in &svc.methods {
            check_attachment(
                desc,
                &method.attachments,
                &ScopePath::method(&svc.name, &method.name),
                errors,
            );
        }
    }
}

fn check_attachment(
    desc: &ApiDescription,
    attachment: &ScopeAttachment,
    scope: &ScopePath,
    errors: &mut Vec<ValidationError>,
) {
    for direction in Direction::ALL {
        for reference in attachment.refs(direction) {
            match reference {
                InterceptorRef::ByName(name) if name.is_empty() => {
                    errors.push(ValidationError::InvalidName {
                        name: String::new(),
                        scope: scope.clone(),
                        what: format!("{} interceptor reference", direction),
                    });
                }
                InterceptorRef::ByName(name) if desc.catalog.lookup(name).is_none() => {
                    errors.push(ValidationError::UndefinedInterceptor {
                        name: name.clone(),
                        scope: scope.clone(),
                        direction,
                    });
                }
                InterceptorRef::ByValue(id) if desc.catalog.get(*id).is_none() => {
                    errors.push(ValidationError::InvalidReference {
                        found: format!("unknown handle {}", id.index()),
                        scope: scope.clone(),
                        direction,
                    });
                }
                _ => {}
            }
        }
    }
}
