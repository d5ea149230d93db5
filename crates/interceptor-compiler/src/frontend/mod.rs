//! Frontends that turn the evaluation engine's hand-off into IR.
//!
//! The evaluation engine runs the description DSL and hands the resulting
//! tree over as a document. A frontend is responsible for:
//! 1. Parsing that document
//! 2. Building the catalog and the scope attachments
//! 3. Recording reference values of the wrong kind so the validator can
//!    report them with everything else

pub mod json;

use std::path::Path;

use crate::diagnostic::CompilerError;
use crate::ir::ApiDescription;

pub use json::JsonFrontend;

/// Trait for description frontends.
pub trait Frontend {
    /// Returns the format name (e.g., "json").
    fn format(&self) -> &str;

    /// Returns file extensions this frontend handles.
    fn extensions(&self) -> &[&str];

    /// Builds a description from a hand-off document.
    fn parse_description(&self, source: &str) -> Result<ApiDescription, CompilerError>;
}

/// Creates a frontend for the given format.
pub fn create_frontend(format: &str) -> Result<Box<dyn Frontend>, CompilerError> {
    match format {
        "json" => Ok(Box::new(JsonFrontend)),
        _ => Err(CompilerError::UnsupportedFormat {
            format: format.to_string(),
        }),
    }
}

/// Parses a JSON hand-off document.
pub fn parse_description(source: &str) -> Result<ApiDescription, CompilerError> {
    JsonFrontend.parse_description(source)
}

/// Reads and parses a hand-off document, picking the frontend by extension.
pub fn load_description(path: &Path) -> Result<ApiDescription, CompilerError> {
    let format = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("json");
    let frontend = create_frontend(format)?;
    let source = std::fs::read_to_string(path).map_err(|e| CompilerError::io(path, e.to_string()))?;
    frontend.parse_description(&source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn rejects_unknown_format() {
        let err = create_frontend("yaml").err().unwrap();
        assert!(matches!(err, CompilerError::UnsupportedFormat { .. }));
    }

    #[test]
    fn loads_from_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("api.json");
        std::fs::write(&path, r#"{ "name": "Store" }"#).unwrap();

        let desc = load_description(&path).unwrap();
        assert_eq!(desc.name, "Store");
        assert!(desc.catalog.is_empty());
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = load_description(&dir.path().join("missing.json")).err().unwrap();
        assert!(matches!(err, CompilerError::IoError { .. }));
    }
}
