//! Per-method dispatch.
//!
//! The dispatch of a method wraps its endpoint with the resolved chain. Entry
//! `i` runs before entry `i + 1` and the endpoint runs innermost, so the first
//! (API-scope) interceptor is the outermost wrapper. The wrap statements are
//! emitted unrolled, innermost first, which is the order that produces that
//! nesting.

use serde::Serialize;

use super::naming::{to_pascal_case, wrapper_name};
use super::ServiceContext;
use crate::diagnostic::CompilerError;
use crate::ir::{Direction, MethodIR};
use crate::resolve::ResolvedChain;

/// Dispatch of one method in one direction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodDispatch {
    pub document: String,
    pub slot: String,
    pub service: String,
    pub method: String,
    pub method_var: String,
    pub direction: Direction,
    pub function_name: String,
    /// Invocation order, outermost first.
    pub chain: Vec<ChainLink>,
    /// Wrap statements in emission order, innermost first.
    pub applications: Vec<ChainLink>,
}

/// One position of a chain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainLink {
    /// Zero-based invocation position.
    pub position: usize,
    pub interceptor: String,
    /// Wrapper function applied at this position.
    pub wrapper: String,
}

pub(crate) fn build(
    ctx: &ServiceContext<'_>,
    direction: Direction,
    method: &MethodIR,
    chain: &ResolvedChain,
) -> Result<MethodDispatch, CompilerError> {
    if chain.is_empty() {
        return Err(CompilerError::contract(format!(
            "empty {} chain for method \"{}\" passed to dispatch",
            direction, method.name
        )));
    }

    let links = chain
        .iter()
        .enumerate()
        .map(|(position, id)| {
            let intr = ctx.interceptor(id)?;
            Ok(ChainLink {
                position,
                interceptor: intr.name.clone(),
                wrapper: wrapper_name(direction, &method.name, &intr.name),
            })
        })
        .collect::<Result<Vec<_>, CompilerError>>()?;

    let method_var = to_pascal_case(&method.name);
    let function_name = match direction {
        Direction::Server => format!("Wrap{}Endpoint", method_var),
        Direction::Client => format!("Wrap{}ClientEndpoint", method_var),
    };
    let slot = match direction {
        Direction::Server => "endpoint-wrapper",
        Direction::Client => "client-wrapper",
    };

    Ok(MethodDispatch {
        document: ctx.declarations_document(direction),
        slot: slot.to_string(),
        service: ctx.service_name().to_string(),
        method: method.name.clone(),
        method_var,
        direction,
        function_name,
        applications: links.iter().rev().cloned().collect(),
        chain: links,
    })
}
