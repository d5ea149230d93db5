//! Emission units for interceptor chains.
//!
//! For every service with at least one interceptor the compiler produces:
//! - Shared declarations (one per direction in use): the interceptor
//!   interface and one info/type declaration per distinct interceptor
//! - Wrappers (one per interceptor and direction): hook points with typed
//!   views over the selected payload/result attributes
//! - Dispatch (one per method and direction with a non-empty chain): the
//!   unrolled sequence that wraps the endpoint with its chain
//! - Example stubs (optional): scaffolding a human implementation fills in
//!
//! Units carry structured data only. Rendering them to source text belongs to
//! the template layer.

mod access;
mod declarations;
mod dispatch;
mod examples;
pub(crate) mod naming;
mod wrappers;

use serde::Serialize;
use tracing::debug;

use crate::config::CompilerConfig;
use crate::diagnostic::CompilerError;
use crate::ir::{ApiDescription, Direction, InterceptorIR, InterceptorId};
use crate::resolve::{client_declarations, ServiceChains};
use naming::to_snake_case;

pub use access::{AccessMode, AccessView, ExposedAttribute};
pub use declarations::{AccessInterface, AccessorDecl, InterceptorDeclaration, InterfaceHook, SharedDeclarations};
pub use dispatch::{ChainLink, MethodDispatch};
pub use examples::{ExampleHook, ExampleStub};
pub use wrappers::{CallMetadata, InterceptorWrapper, WrappedMethod};

/// One named, directional unit handed to the template layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "unit", rename_all = "snake_case")]
pub enum EmissionUnit {
    SharedDeclarations(SharedDeclarations),
    Wrapper(InterceptorWrapper),
    Dispatch(MethodDispatch),
    Example(ExampleStub),
}

impl EmissionUnit {
    /// Document the unit is rendered into.
    pub fn document(&self) -> &str {
        match self {
            EmissionUnit::SharedDeclarations(u) => &u.document,
            EmissionUnit::Wrapper(u) => &u.document,
            EmissionUnit::Dispatch(u) => &u.document,
            EmissionUnit::Example(u) => &u.document,
        }
    }

    /// Template slot inside the document.
    pub fn slot(&self) -> &str {
        match self {
            EmissionUnit::SharedDeclarations(u) => &u.slot,
            EmissionUnit::Wrapper(u) => &u.slot,
            EmissionUnit::Dispatch(u) => &u.slot,
            EmissionUnit::Example(u) => &u.slot,
        }
    }

    pub fn service(&self) -> &str {
        match self {
            EmissionUnit::SharedDeclarations(u) => &u.service,
            EmissionUnit::Wrapper(u) => &u.service,
            EmissionUnit::Dispatch(u) => &u.service,
            EmissionUnit::Example(u) => &u.service,
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            EmissionUnit::SharedDeclarations(u) => u.direction,
            EmissionUnit::Wrapper(u) => u.direction,
            EmissionUnit::Dispatch(u) => u.direction,
            EmissionUnit::Example(u) => u.direction,
        }
    }
}

/// Generated units for a whole description.
#[derive(Debug, Default, Serialize)]
pub struct GeneratedUnits {
    pub units: Vec<EmissionUnit>,
}

/// Shared state while compiling one service.
pub(crate) struct ServiceContext<'a> {
    pub desc: &'a ApiDescription,
    pub chains: &'a ServiceChains<'a>,
    pub config: &'a CompilerConfig,
}

impl<'a> ServiceContext<'a> {
    pub fn service_name(&self) -> &'a str {
        &self.chains.service.name
    }

    pub fn interceptor(&self, id: InterceptorId) -> Result<&'a InterceptorIR, CompilerError> {
        self.desc
            .catalog
            .get(id)
            .ok_or_else(|| CompilerError::contract(format!("no catalog entry for {:?}", id)))
    }

    /// Path of a generated document of this service.
    pub fn gen_document(&self, name: &str) -> String {
        let service_dir = to_snake_case(self.service_name());
        self.config
            .document_path(&self.config.gen_dir, &[service_dir.as_str(), name])
    }

    /// Document holding the interface and dispatch of `direction`.
    pub fn declarations_document(&self, direction: Direction) -> String {
        match direction {
            Direction::Server => self.gen_document("service_interceptors"),
            Direction::Client => self.gen_document("client_interceptors"),
        }
    }
}

/// Compiles the resolved chains of one service.
///
/// A service without any interceptor in either direction yields no units.
pub fn compile_service(
    desc: &ApiDescription,
    chains: &ServiceChains<'_>,
    config: &CompilerConfig,
) -> Result<Vec<EmissionUnit>, CompilerError> {
    let ctx = ServiceContext { desc, chains, config };
    let mut units = Vec::new();

    if chains.is_empty() {
        debug!(service = %ctx.service_name(), "no interceptors, skipping");
        return Ok(units);
    }

    for direction in Direction::ALL {
        let used = chains.interceptors(direction);
        if used.is_empty() {
            continue;
        }

        let declared = match direction {
            Direction::Server => used.to_vec(),
            Direction::Client => client_declarations(chains),
        };
        units.push(EmissionUnit::SharedDeclarations(declarations::build(
            &ctx, direction, &declared,
        )?));

        for &id in used {
            units.push(EmissionUnit::Wrapper(wrappers::build(&ctx, direction, id)?));
        }

        for method in chains.methods_with(direction) {
            units.push(EmissionUnit::Dispatch(dispatch::build(
                &ctx,
                direction,
                method.method,
                method.chain(direction),
            )?));
        }
    }

    debug!(service = %ctx.service_name(), units = units.len(), "compiled interceptor chains");
    Ok(units)
}

/// Example stub units for one service.
pub fn example_units(
    desc: &ApiDescription,
    chains: &ServiceChains<'_>,
    config: &CompilerConfig,
) -> Result<Vec<EmissionUnit>, CompilerError> {
    let ctx = ServiceContext { desc, chains, config };
    let mut units = Vec::new();
    for direction in Direction::ALL {
        if chains.interceptors(direction).is_empty() {
            continue;
        }
        units.push(EmissionUnit::Example(examples::build(&ctx, direction)?));
    }
    Ok(units)
}

/// Generates the units of every service.
pub fn generate(
    desc: &ApiDescription,
    services: &[ServiceChains<'_>],
    config: &CompilerConfig,
) -> Result<GeneratedUnits, CompilerError> {
    let mut generated = GeneratedUnits::default();
    for chains in services {
        generated.units.extend(compile_service(desc, chains, config)?);
        if config.emit_examples {
            generated.units.extend(example_units(desc, chains, config)?);
        }
    }
    Ok(generated)
}
