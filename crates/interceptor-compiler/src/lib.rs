//! # Interceptor Compiler
//!
//! This crate resolves the interceptors declared in a service description
//! into per-method chains and compiles those chains into emission units that
//! a template layer renders into wrapper code.
//!
//! ## Architecture
//!
//! ```text
//! Hand-off document (JSON)
//!          │
//!          ▼
//! ┌──────────────────┐
//! │     Frontend     │  Catalog + scope attachments
//! │    (doc → IR)    │
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐
//! │     Validate     │  Names, references, streaming access
//! │       (IR)       │
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐
//! │     Resolve      │  API → service → method, deduplicated
//! │  (IR → chains)   │
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐
//! │     Codegen      │  Declarations, wrappers, dispatch
//! │ (chains → units) │
//! └──────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use interceptor_compiler::{frontend, Compiler, CompilerConfig};
//!
//! let desc = frontend::parse_description(&source)?;
//! let output = Compiler::new(CompilerConfig::default()).compile(&desc)?;
//! for unit in &output.units {
//!     println!("{} [{}]", unit.document(), unit.slot());
//! }
//! ```

pub mod codegen;
pub mod config;
pub mod diagnostic;
pub mod frontend;
pub mod ir;
pub mod resolve;
pub mod validate;

use tracing::info;

pub use codegen::{EmissionUnit, GeneratedUnits};
pub use config::CompilerConfig;
pub use diagnostic::{CompilerError, ValidationError};

/// Runs validation, resolution and code generation over a description.
pub struct Compiler {
    config: CompilerConfig,
}

impl Compiler {
    /// Creates a new compiler with the given configuration.
    pub fn new(config: CompilerConfig) -> Self {
        Self { config }
    }

    /// Compiles the interceptor chains of every service.
    ///
    /// This runs the full pipeline:
    /// 1. Validate the catalog and all attachments, collecting every error
    /// 2. Resolve the server and client chain of each method
    /// 3. Generate emission units for each service that uses interceptors
    ///
    /// Any validation error aborts the whole description; nothing is
    /// generated for any service.
    pub fn compile(&self, desc: &ir::ApiDescription) -> Result<CompileOutput, CompilerError> {
        // Phase 1: Validate
        validate::validate_description(desc)?;

        // Phase 2: Resolve
        let chains = desc
            .services
            .iter()
            .map(|svc| resolve::resolve_service(desc, svc))
            .collect::<Result<Vec<_>, _>>()?;

        // Phase 3: Generate
        let generated = codegen::generate(desc, &chains, &self.config)?;

        let output = CompileOutput {
            services: desc.services.len(),
            services_with_interceptors: chains.iter().filter(|c| !c.is_empty()).count(),
            interceptors: desc.catalog.len(),
            units: generated.units,
        };
        info!(
            api = %desc.name,
            services = output.services,
            with_interceptors = output.services_with_interceptors,
            units = output.units.len(),
            "compiled interceptor chains"
        );
        Ok(output)
    }

    /// Validates a description without generating anything.
    pub fn check(&self, desc: &ir::ApiDescription) -> Result<(), CompilerError> {
        validate::validate_description(desc)
    }
}

/// Result of a successful compilation.
#[derive(Debug)]
pub struct CompileOutput {
    /// Number of services in the description.
    pub services: usize,
    /// Number of services with at least one interceptor.
    pub services_with_interceptors: usize,
    /// Number of catalog interceptors.
    pub interceptors: usize,
    /// Emission units of every service, in service order.
    pub units: Vec<EmissionUnit>,
}

impl CompileOutput {
    /// Units of one service.
    pub fn units_for<'a>(&'a self, service: &'a str) -> impl Iterator<Item = &'a EmissionUnit> + 'a {
        self.units.iter().filter(move |u| u.service() == service)
    }
}
