//! Generated name validation.
//!
//! Wrapper functions and restricted view types of a service share one
//! document, and their names are built by concatenating case-converted
//! method and interceptor names. Different pairs can concatenate to the same
//! identifier (`GetUser` + `auth` and `Get` + `user-auth`), so every name is
//! claimed per service and a second claimant is an error.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;

use super::effective_chain;
use crate::codegen::naming::{view_type_name, wrapper_name};
use crate::codegen::AccessMode;
use crate::diagnostic::{AccessSide, ValidationError};
use crate::ir::{ApiDescription, Direction, ServiceIR};

/// What a generated name stands for.
#[derive(Debug, Clone, PartialEq)]
enum Origin<'a> {
    Wrapper {
        direction: Direction,
        interceptor: &'a str,
        method: &'a str,
    },
    /// Views carry no direction; server and client wrappers of the same
    /// interceptor and method reuse one view type.
    View {
        side: AccessSide,
        mode: AccessMode,
        interceptor: &'a str,
        method: &'a str,
    },
}

impl fmt::Display for Origin<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Wrapper {
                direction,
                interceptor,
                method,
            } => write!(
                f,
                "{} wrapper of interceptor \"{}\" on method \"{}\"",
                direction, interceptor, method
            ),
            Origin::View {
                side,
                mode,
                interceptor,
                method,
            } => {
                let mode = match mode {
                    AccessMode::ReadOnly => "read",
                    AccessMode::ReadWrite => "write",
                };
                write!(
                    f,
                    "{} {} view of interceptor \"{}\" on method \"{}\"",
                    side, mode, interceptor, method
                )
            }
        }
    }
}

/// Validates that the generated wrapper and view names of each service are distinct.
pub fn validate_generated_names(desc: &ApiDescription, errors: &mut Vec<ValidationError>) {
    for svc in &desc.services {
        validate_service(desc, svc, errors);
    }
}

/// Names claimed so far in one service.
struct Claims<'a> {
    service: &'a str,
    names: HashMap<String, Origin<'a>>,
}

impl<'a> Claims<'a> {
    fn claim(&mut self, identifier: String, origin: Origin<'a>, errors: &mut Vec<ValidationError>) {
        match self.names.entry(identifier) {
            Entry::Vacant(slot) => {
                slot.insert(origin);
            }
            Entry::Occupied(existing) if *existing.get() != origin => {
                errors.push(ValidationError::GeneratedNameCollision {
                    identifier: existing.key().clone(),
                    service: self.service.to_string(),
                    first: existing.get().to_string(),
                    second: origin.to_string(),
                });
            }
            Entry::Occupied(_) => {}
        }
    }
}

fn validate_service(desc: &ApiDescription, svc: &ServiceIR, errors: &mut Vec<ValidationError>) {
    let mut claims = Claims {
        service: &svc.name,
        names: HashMap::new(),
    };

    for direction in Direction::ALL {
        for method in &svc.methods {
            for (_, _, intr) in effective_chain(desc, svc, method, direction) {
                claims.claim(
                    wrapper_name(direction, &method.name, &intr.name),
                    Origin::Wrapper {
                        direction,
                        interceptor: &intr.name,
                        method: &method.name,
                    },
                    errors,
                );

                let views = [
                    (AccessSide::Payload, AccessMode::ReadOnly, &intr.read_payload),
                    (AccessSide::Payload, AccessMode::ReadWrite, &intr.write_payload),
                    (AccessSide::Result, AccessMode::ReadOnly, &intr.read_result),
                    (AccessSide::Result, AccessMode::ReadWrite, &intr.write_result),
                ];
                for (side, mode, selection) in views {
                    if !selection.as_ref().is_some_and(|s| !s.is_empty()) {
                        continue;
                    }
                    claims.claim(
                        view_type_name(&intr.name, &method.name, side, mode),
                        Origin::View {
                            side,
                            mode,
                            interceptor: &intr.name,
                            method: &method.name,
                        },
                        errors,
                    );
                }
            }
        }
    }
}
