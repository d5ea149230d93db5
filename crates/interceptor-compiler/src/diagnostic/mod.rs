//! Diagnostic types for error reporting.

mod error;
mod scope;

pub use error::{AccessSide, CompilerError, ValidationError};
pub use scope::ScopePath;
