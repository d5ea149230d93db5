//! Shared interceptor declarations.
//!
//! One unit per service and direction: the interface a user implements (one
//! hook per interceptor used in that direction) plus the info and access
//! types of each interceptor. An interceptor used in both directions is
//! declared with the server unit only; the client unit reuses it.

use serde::Serialize;

use super::naming::{to_pascal_case, type_ref};
use super::ServiceContext;
use crate::diagnostic::{AccessSide, CompilerError};
use crate::ir::{AttributeSelection, Direction, InterceptorIR, InterceptorId};

/// Shared declarations of one service and direction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SharedDeclarations {
    pub document: String,
    pub slot: String,
    pub service: String,
    pub direction: Direction,
    /// Header title of the document.
    pub title: String,
    /// Name of the interface listing every hook of this direction.
    pub interface_name: String,
    pub hooks: Vec<InterfaceHook>,
    /// Interceptors whose types are declared in this unit.
    pub declarations: Vec<InterceptorDeclaration>,
    /// Whether any declared interceptor needs private access implementation types.
    pub needs_access_types: bool,
}

/// A method of the interceptor interface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterfaceHook {
    pub interceptor: String,
    pub method_name: String,
    pub info_type: String,
    pub description: Option<String>,
}

/// Types declared for one interceptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterceptorDeclaration {
    pub interceptor: String,
    pub type_name: String,
    pub info_type: String,
    pub description: Option<String>,
    pub payload_access: Option<AccessInterface>,
    pub result_access: Option<AccessInterface>,
}

/// Accessor interface over one side of a call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccessInterface {
    pub interface_name: String,
    /// Attributes with a getter.
    pub readable: Vec<AccessorDecl>,
    /// Attributes with a getter and a setter.
    pub writable: Vec<AccessorDecl>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccessorDecl {
    pub name: String,
    pub field_name: String,
    pub type_ref: String,
}

pub(crate) fn build(
    ctx: &ServiceContext<'_>,
    direction: Direction,
    declared: &[InterceptorId],
) -> Result<SharedDeclarations, CompilerError> {
    let service = ctx.service_name();
    let label = to_pascal_case(direction.as_str());

    let hooks = ctx
        .chains
        .interceptors(direction)
        .iter()
        .map(|&id| {
            let intr = ctx.interceptor(id)?;
            let type_name = to_pascal_case(&intr.name);
            Ok(InterfaceHook {
                interceptor: intr.name.clone(),
                info_type: format!("{}Info", type_name),
                method_name: type_name,
                description: intr.description.clone(),
            })
        })
        .collect::<Result<Vec<_>, CompilerError>>()?;

    let mut needs_access_types = false;
    let mut declarations = Vec::with_capacity(declared.len());
    for &id in declared {
        let intr = ctx.interceptor(id)?;
        needs_access_types |= intr.has_access_specs();
        let type_name = to_pascal_case(&intr.name);
        declarations.push(InterceptorDeclaration {
            interceptor: intr.name.clone(),
            info_type: format!("{}Info", type_name),
            payload_access: access_interface(ctx, direction, id, intr, AccessSide::Payload)?,
            result_access: access_interface(ctx, direction, id, intr, AccessSide::Result)?,
            description: intr.description.clone(),
            type_name,
        });
    }

    Ok(SharedDeclarations {
        document: ctx.declarations_document(direction),
        slot: format!("{}-interceptors-type", direction),
        service: service.to_string(),
        direction,
        title: format!("{} {} Interceptors", service, label),
        interface_name: format!("{}Interceptors", label),
        hooks,
        declarations,
        needs_access_types,
    })
}

fn access_interface(
    ctx: &ServiceContext<'_>,
    direction: Direction,
    id: InterceptorId,
    intr: &InterceptorIR,
    side: AccessSide,
) -> Result<Option<AccessInterface>, CompilerError> {
    let (read, write) = match side {
        AccessSide::Payload => (&intr.read_payload, &intr.write_payload),
        AccessSide::Result => (&intr.read_result, &intr.write_result),
    };
    let accessed = match side {
        AccessSide::Payload => intr.accesses_payload(),
        AccessSide::Result => intr.accesses_result(),
    };
    if !accessed {
        return Ok(None);
    }

    let accessors = |selection: &Option<AttributeSelection>| -> Result<Vec<AccessorDecl>, CompilerError> {
        let Some(selection) = selection else {
            return Ok(Vec::new());
        };
        selection
            .attributes
            .iter()
            .map(|attr| {
                let typ = match &attr.typ {
                    Some(typ) => type_ref(typ),
                    None => inherited_type_ref(ctx, direction, id, side, &attr.name)?,
                };
                Ok(AccessorDecl {
                    name: attr.name.clone(),
                    field_name: to_pascal_case(&attr.name),
                    type_ref: typ,
                })
            })
            .collect()
    };

    Ok(Some(AccessInterface {
        interface_name: format!("{}{}Access", to_pascal_case(&intr.name), to_pascal_case(&side.to_string())),
        readable: accessors(read)?,
        writable: accessors(write)?,
    }))
}

/// Type of an untyped selected attribute, taken from the first method the
/// interceptor wraps in this direction.
fn inherited_type_ref(
    ctx: &ServiceContext<'_>,
    direction: Direction,
    id: InterceptorId,
    side: AccessSide,
    attribute: &str,
) -> Result<String, CompilerError> {
    ctx.chains
        .methods
        .iter()
        .filter(|m| m.chain(direction).contains(id))
        .find_map(|m| {
            let source = match side {
                AccessSide::Payload => m.method.payload.as_ref(),
                AccessSide::Result => m.method.result.as_ref(),
            };
            source.and_then(|t| t.object.field(attribute))
        })
        .map(|field| type_ref(&field.typ))
        .ok_or_else(|| {
            CompilerError::contract(format!(
                "no {} method of service \"{}\" defines {} attribute \"{}\"",
                direction,
                ctx.service_name(),
                side,
                attribute
            ))
        })
}
