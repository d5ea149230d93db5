//! Example interceptor implementations.
//!
//! Scaffolding for the human-written side: one stub per service and
//! direction listing every hook and what each one may touch.

use serde::Serialize;

use super::naming::{to_pascal_case, to_snake_case};
use super::ServiceContext;
use crate::diagnostic::CompilerError;
use crate::ir::{AttributeSelection, Direction};

/// Example implementation of one service's interceptors in one direction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExampleStub {
    pub document: String,
    pub slot: String,
    pub service: String,
    pub direction: Direction,
    pub struct_name: String,
    /// Interface the stub implements.
    pub interface_name: String,
    pub hooks: Vec<ExampleHook>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExampleHook {
    pub interceptor: String,
    pub method_name: String,
    pub info_type: String,
    pub description: Option<String>,
    pub reads_payload: Vec<String>,
    pub writes_payload: Vec<String>,
    pub reads_result: Vec<String>,
    pub writes_result: Vec<String>,
}

fn names(selection: &Option<AttributeSelection>) -> Vec<String> {
    selection
        .iter()
        .flat_map(|s| s.attributes.iter().map(|a| a.name.clone()))
        .collect()
}

pub(crate) fn build(ctx: &ServiceContext<'_>, direction: Direction) -> Result<ExampleStub, CompilerError> {
    let service = ctx.service_name();
    let label = to_pascal_case(direction.as_str());

    let hooks = ctx
        .chains
        .interceptors(direction)
        .iter()
        .map(|&id| {
            let intr = ctx.interceptor(id)?;
            let type_name = to_pascal_case(&intr.name);
            Ok(ExampleHook {
                interceptor: intr.name.clone(),
                info_type: format!("{}Info", type_name),
                method_name: type_name,
                description: intr.description.clone(),
                reads_payload: names(&intr.read_payload),
                writes_payload: names(&intr.write_payload),
                reads_result: names(&intr.read_result),
                writes_result: names(&intr.write_result),
            })
        })
        .collect::<Result<Vec<_>, CompilerError>>()?;

    let file = format!(
        "{}_{}_{}",
        to_snake_case(&ctx.desc.name),
        to_snake_case(service),
        direction
    );

    Ok(ExampleStub {
        document: ctx.config.document_path(&ctx.config.examples_dir, &[file.as_str()]),
        slot: format!("example-{}-interceptor", direction),
        service: service.to_string(),
        direction,
        struct_name: format!("{}{}Interceptors", to_pascal_case(service), label),
        interface_name: format!("{}Interceptors", label),
        hooks,
    })
}
