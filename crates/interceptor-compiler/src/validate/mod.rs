//! Validation of interceptor declarations and attachments.
//!
//! Validation is exhaustive: every rule runs over the whole description and
//! all problems are returned together. Resolution and code generation never
//! run on a description with errors.

mod access;
mod generated;
mod references;
mod structure;

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::diagnostic::{CompilerError, ScopePath, ValidationError};
use crate::ir::{ApiDescription, Direction, InterceptorIR, InterceptorId, MethodIR, ServiceIR};

/// Validates the whole description, collecting every error.
pub fn validate(desc: &ApiDescription) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    structure::validate_catalog(desc, &mut errors);
    references::validate_references(desc, &mut errors);
    access::validate_access(desc, &mut errors);
    generated::validate_generated_names(desc, &mut errors);

    if errors.is_empty() {
        debug!(
            api = %desc.name,
            interceptors = desc.catalog.len(),
            "interceptor declarations are valid"
        );
        Ok(())
    } else {
        warn!(api = %desc.name, errors = errors.len(), "interceptor validation failed");
        Err(errors)
    }
}

/// Validates the description, wrapping failures in a single compiler error.
pub fn validate_description(desc: &ApiDescription) -> Result<(), CompilerError> {
    validate(desc).map_err(|errors| CompilerError::Validation { errors })
}

/// The resolvable part of a method's chain, deduplicated, each interceptor
/// paired with the scope of its outermost attachment.
///
/// Unresolved references are skipped; the reference checks report them.
fn effective_chain<'a>(
    desc: &'a ApiDescription,
    svc: &'a ServiceIR,
    method: &'a MethodIR,
    direction: Direction,
) -> Vec<(ScopePath, InterceptorId, &'a InterceptorIR)> {
    let mut seen = HashSet::new();
    desc.scoped_refs(svc, method, direction)
        .filter_map(|(scope, reference)| {
            let id = desc.catalog.resolve_ref(reference)?;
            let intr = desc.catalog.get(id)?;
            seen.insert(id).then_some((scope, id, intr))
        })
        .collect()
}
