//! Compiler error types.
#![allow(unused_assignments)]

use std::fmt;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use super::ScopePath;
use crate::ir::Direction;

/// The side of a method an attribute selection applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessSide {
    Payload,
    Result,
}

impl fmt::Display for AccessSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessSide::Payload => f.write_str("payload"),
            AccessSide::Result => f.write_str("result"),
        }
    }
}

/// User-facing problems found in a description.
///
/// The validator collects every one of these before giving up, so a single
/// report lists all of them.
#[allow(unused_assignments)]
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{what} in {scope} has an invalid interceptor name \"{name}\"")]
    #[diagnostic(
        code(interceptor::validate::invalid_name),
        help("Interceptor names must be non-empty and start with a letter")
    )]
    InvalidName {
        name: String,
        scope: ScopePath,
        what: String,
    },

    #[error("interceptor \"{name}\" declared in {second} is already declared in {first}")]
    #[diagnostic(
        code(interceptor::validate::duplicate_interceptor),
        help("Interceptor names are unique across the whole description; rename one of them")
    )]
    DuplicateInterceptor {
        name: String,
        first: ScopePath,
        second: ScopePath,
    },

    #[error("{direction} interceptor \"{name}\" referenced in {scope} is not defined")]
    #[diagnostic(
        code(interceptor::validate::undefined_interceptor),
        help("Declare the interceptor before referencing it by name")
    )]
    UndefinedInterceptor {
        name: String,
        scope: ScopePath,
        direction: Direction,
    },

    #[error("{direction} interceptor reference in {scope} must be an interceptor or its name, got {found}")]
    #[diagnostic(code(interceptor::validate::invalid_reference))]
    InvalidReference {
        found: String,
        scope: ScopePath,
        direction: Direction,
    },

    #[error(
        "{direction} interceptor \"{interceptor}\" attached in {attached_at} reads or writes payload attributes and cannot be applied because the method payload is streaming ({scope})"
    )]
    #[diagnostic(
        code(interceptor::validate::streaming_payload_conflict),
        help("A streaming payload is a sequence of values; only interceptors without payload access may wrap it")
    )]
    StreamingPayloadConflict {
        interceptor: String,
        scope: ScopePath,
        attached_at: ScopePath,
        direction: Direction,
    },

    #[error(
        "{direction} interceptor \"{interceptor}\" attached in {attached_at} reads or writes result attributes and cannot be applied because the method result is streaming ({scope})"
    )]
    #[diagnostic(
        code(interceptor::validate::streaming_result_conflict),
        help("A streaming result is a sequence of values; only interceptors without result access may wrap it")
    )]
    StreamingResultConflict {
        interceptor: String,
        scope: ScopePath,
        attached_at: ScopePath,
        direction: Direction,
    },

    #[error("{direction} interceptor \"{interceptor}\" selects {side} attribute \"{attribute}\" which {scope} does not define")]
    #[diagnostic(code(interceptor::validate::unknown_attribute))]
    UnknownAttribute {
        interceptor: String,
        attribute: String,
        side: AccessSide,
        scope: ScopePath,
        direction: Direction,
    },

    #[error("interceptors \"{first}\" and \"{second}\" both generate the identifier \"{identifier}\"")]
    #[diagnostic(
        code(interceptor::validate::identifier_collision),
        help("Generated type names must be distinct; rename one of the interceptors")
    )]
    IdentifierCollision {
        identifier: String,
        first: String,
        second: String,
    },

    #[error("{direction} interceptor \"{interceptor}\" declares {side} attribute \"{attribute}\" as {declared} but {scope} defines it as {actual}")]
    #[diagnostic(
        code(interceptor::validate::selection_type_mismatch),
        help("Drop the type from the selection or make it match the field")
    )]
    SelectionTypeMismatch {
        interceptor: String,
        attribute: String,
        side: AccessSide,
        declared: String,
        actual: String,
        scope: ScopePath,
        direction: Direction,
    },

    #[error("{direction} interceptor \"{interceptor}\" sees {side} attribute \"{attribute}\" as {first_type} in {first} but as {second_type} in {second}")]
    #[diagnostic(
        code(interceptor::validate::inconsistent_attribute_type),
        help("Every method an interceptor wraps shares one accessor interface; give the field the same type everywhere")
    )]
    InconsistentAttributeType {
        interceptor: String,
        attribute: String,
        side: AccessSide,
        direction: Direction,
        first: ScopePath,
        first_type: String,
        second: ScopePath,
        second_type: String,
    },

    #[error("service \"{service}\" generates \"{identifier}\" for both the {first} and the {second}")]
    #[diagnostic(
        code(interceptor::validate::generated_name_collision),
        help("Rename one of the interceptors or methods so the generated names differ")
    )]
    GeneratedNameCollision {
        identifier: String,
        service: String,
        first: String,
        second: String,
    },
}

/// Errors that can occur while compiling interceptor chains.
#[allow(unused_assignments)]
#[derive(Error, Diagnostic, Debug)]
pub enum CompilerError {
    #[error("Failed to read file '{path}': {message}")]
    #[diagnostic(code(interceptor::io::read_error))]
    IoError {
        path: PathBuf,
        message: String,
    },

    #[error("Failed to parse description: {message}")]
    #[diagnostic(code(interceptor::frontend::parse_failed))]
    ParseFailed {
        message: String,
    },

    #[error("Unsupported description format: {format}")]
    #[diagnostic(code(interceptor::frontend::unsupported_format))]
    UnsupportedFormat {
        format: String,
    },

    #[error("Description has {} invalid interceptor declaration(s) or attachment(s)", errors.len())]
    #[diagnostic(
        code(interceptor::validate::failed),
        help("No code was generated; fix every listed problem and run again")
    )]
    Validation {
        #[related]
        errors: Vec<ValidationError>,
    },

    /// Resolver or code generator met input the validator should have rejected.
    #[error("Internal error: {message}")]
    #[diagnostic(code(interceptor::codegen::contract_violation))]
    ContractViolation {
        message: String,
    },
}

impl CompilerError {
    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::IoError {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn contract(message: impl Into<String>) -> Self {
        Self::ContractViolation {
            message: message.into(),
        }
    }
}
