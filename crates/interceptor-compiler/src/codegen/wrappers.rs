//! Per-interceptor wrapper functions.

use serde::Serialize;

use super::access::{build_view, AccessMode, AccessView};
use super::naming::{to_pascal_case, wrapper_name};
use super::ServiceContext;
use crate::diagnostic::{AccessSide, CompilerError};
use crate::ir::{Direction, InterceptorIR, InterceptorId, MethodIR};

/// Wrapper functions of one interceptor in one direction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterceptorWrapper {
    pub document: String,
    pub slot: String,
    pub service: String,
    pub direction: Direction,
    pub interceptor: String,
    pub type_name: String,
    pub info_type: String,
    /// One wrapper per method the interceptor applies to, in service order.
    pub methods: Vec<WrappedMethod>,
}

/// The wrapper of one interceptor around one method.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WrappedMethod {
    pub method: String,
    pub function_name: String,
    pub metadata: CallMetadata,
    pub read_payload: Option<AccessView>,
    pub write_payload: Option<AccessView>,
    pub read_result: Option<AccessView>,
    pub write_result: Option<AccessView>,
}

impl WrappedMethod {
    /// True when the hook sees nothing but call metadata.
    pub fn metadata_only(&self) -> bool {
        self.read_payload.is_none()
            && self.write_payload.is_none()
            && self.read_result.is_none()
            && self.write_result.is_none()
    }
}

/// Call details every hook receives.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallMetadata {
    pub service: String,
    pub method: String,
    /// Parameter holding the next endpoint; calling it again retries the call.
    pub endpoint_param: String,
}

pub(crate) fn build(
    ctx: &ServiceContext<'_>,
    direction: Direction,
    id: InterceptorId,
) -> Result<InterceptorWrapper, CompilerError> {
    let intr = ctx.interceptor(id)?;
    let service = ctx.service_name();

    let methods = ctx
        .chains
        .methods
        .iter()
        .filter(|m| m.chain(direction).contains(id))
        .map(|m| wrap_method(service, direction, m.method, intr))
        .collect::<Result<Vec<_>, CompilerError>>()?;

    if methods.is_empty() {
        return Err(CompilerError::contract(format!(
            "{} interceptor \"{}\" of service \"{}\" wraps no method",
            direction, intr.name, service
        )));
    }

    let type_name = to_pascal_case(&intr.name);
    Ok(InterceptorWrapper {
        document: ctx.gen_document("interceptor_wrappers"),
        slot: format!("{}-interceptor-wrappers", direction),
        service: service.to_string(),
        direction,
        interceptor: intr.name.clone(),
        info_type: format!("{}Info", type_name),
        type_name,
        methods,
    })
}

fn wrap_method(
    service: &str,
    direction: Direction,
    method: &MethodIR,
    intr: &InterceptorIR,
) -> Result<WrappedMethod, CompilerError> {
    use AccessMode::{ReadOnly, ReadWrite};
    use AccessSide::{Payload, Result as ResultSide};

    let name = intr.name.as_str();

    Ok(WrappedMethod {
        method: method.name.clone(),
        function_name: wrapper_name(direction, &method.name, name),
        metadata: CallMetadata {
            service: service.to_string(),
            method: method.name.clone(),
            endpoint_param: "next".to_string(),
        },
        read_payload: build_view(name, method, Payload, ReadOnly, intr.read_payload.as_ref())?,
        write_payload: build_view(name, method, Payload, ReadWrite, intr.write_payload.as_ref())?,
        read_result: build_view(name, method, ResultSide, ReadOnly, intr.read_result.as_ref())?,
        write_result: build_view(name, method, ResultSide, ReadWrite, intr.write_result.as_ref())?,
    })
}
