//! Services and methods.

use super::{ScopeAttachment, UserType};

/// IR representation of a service.
#[derive(Debug, Clone)]
pub struct ServiceIR {
    /// Name of the service as written in the description.
    pub name: String,

    pub description: Option<String>,

    /// Service-scope attachments.
    pub attachments: ScopeAttachment,

    pub methods: Vec<MethodIR>,
}

impl ServiceIR {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            attachments: ScopeAttachment::default(),
            methods: Vec::new(),
        }
    }
}

/// IR representation of a service method.
#[derive(Debug, Clone)]
pub struct MethodIR {
    pub name: String,

    /// Payload type, if the method takes one.
    pub payload: Option<UserType>,

    /// Result type, if the method returns one.
    pub result: Option<UserType>,

    pub shape: MethodShape,

    /// Method-scope attachments.
    pub attachments: ScopeAttachment,
}

impl MethodIR {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            payload: None,
            result: None,
            shape: MethodShape::default(),
            attachments: ScopeAttachment::default(),
        }
    }
}

/// Whether each side of a method is a single value or a stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MethodShape {
    pub streaming_payload: bool,
    pub streaming_result: bool,
}

impl MethodShape {
    pub fn unary() -> Self {
        Self::default()
    }
}
