//! Interceptor attachments at API, service and method scope.

use std::fmt;

use serde::Serialize;

use super::InterceptorId;
use crate::diagnostic::ScopePath;

/// Which side of a call an interceptor wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Wraps the service's own handling of a call.
    Server,
    /// Wraps a caller's invocation of a remote method.
    Client,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Server, Direction::Client];

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Server => "server",
            Direction::Client => "client",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reference to a catalog interceptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterceptorRef {
    /// Handle held since declaration.
    ByValue(InterceptorId),
    /// Name resolved against the catalog during validation.
    ByName(String),
}

impl InterceptorRef {
    pub fn by_name(name: impl Into<String>) -> Self {
        InterceptorRef::ByName(name.into())
    }
}

impl From<InterceptorId> for InterceptorRef {
    fn from(id: InterceptorId) -> Self {
        InterceptorRef::ByValue(id)
    }
}

/// Interceptor references attached at one scope.
#[derive(Debug, Clone, Default)]
pub struct ScopeAttachment {
    pub server: Vec<InterceptorRef>,
    pub client: Vec<InterceptorRef>,
}

impl ScopeAttachment {
    /// References for the given direction, in declaration order.
    pub fn refs(&self, direction: Direction) -> &[InterceptorRef] {
        match direction {
            Direction::Server => &self.server,
            Direction::Client => &self.client,
        }
    }
}

/// A reference value of the wrong kind, rejected when the description was built.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedReference {
    pub scope: ScopePath,
    pub direction: Direction,
    /// Rendering of the value that was supplied.
    pub found: String,
}
