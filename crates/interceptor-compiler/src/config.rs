//! Compiler configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration for the interceptor compiler.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Root directory of generated documents.
    pub gen_dir: PathBuf,

    /// Root directory of example interceptor stubs.
    pub examples_dir: PathBuf,

    /// Produce example stub units alongside the generated ones.
    pub emit_examples: bool,

    /// Extension appended to document paths (without the dot).
    pub file_extension: Option<String>,
}

impl CompilerConfig {
    /// Builds a document path below `root`, adding the configured extension.
    pub(crate) fn document_path(&self, root: &Path, parts: &[&str]) -> String {
        let mut path = root.to_path_buf();
        for part in parts {
            path.push(part);
        }
        if let Some(ext) = &self.file_extension {
            path.set_extension(ext);
        }
        path.to_string_lossy().replace('\\', "/")
    }
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            gen_dir: PathBuf::from("gen"),
            examples_dir: PathBuf::from("interceptors"),
            emit_examples: true,
            file_extension: None,
        }
    }
}
