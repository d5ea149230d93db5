//! Debug script to see what the resolver and compiler produce.

use std::path::PathBuf;

use interceptor_compiler::ir::Direction;
use interceptor_compiler::{frontend, resolve, validate, Compiler, CompilerConfig};
use tracing_subscriber::EnvFilter;

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("api.json"));
    let desc = frontend::load_description(&path)?;

    println!("API: {}", desc.name);
    println!("\nCatalog:");
    for (id, intr) in desc.catalog.iter() {
        println!("  #{} {} (declared in {})", id.index(), intr.name, intr.declared_in);
    }

    validate::validate_description(&desc)?;

    println!("\nChains:");
    for svc in &desc.services {
        let chains = resolve::resolve_service(&desc, svc)?;
        for method in &chains.methods {
            for direction in Direction::ALL {
                let names: Vec<&str> = method
                    .chain(direction)
                    .iter()
                    .filter_map(|id| desc.catalog.get(id))
                    .map(|i| i.name.as_str())
                    .collect();
                println!("  {}.{} [{}]: {:?}", svc.name, method.method.name, direction, names);
            }
        }
    }

    let output = Compiler::new(CompilerConfig::default()).compile(&desc)?;
    println!("\nUnits:");
    let json = serde_json::to_string_pretty(&output.units).map_err(|e| miette::miette!("{}", e))?;
    println!("{}", json);
    Ok(())
}
