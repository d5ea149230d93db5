//! Description location tracking.

use std::fmt;

use serde::Serialize;

/// Where in a description something was declared or attached.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "level", rename_all = "snake_case")]
pub enum ScopePath {
    /// The API-wide scope.
    Api,
    /// A service scope.
    Service { service: String },
    /// A method scope inside a service.
    Method { service: String, method: String },
}

impl ScopePath {
    pub fn service(service: impl Into<String>) -> Self {
        Self::Service {
            service: service.into(),
        }
    }

    pub fn method(service: impl Into<String>, method: impl Into<String>) -> Self {
        Self::Method {
            service: service.into(),
            method: method.into(),
        }
    }
}

impl fmt::Display for ScopePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopePath::Api => write!(f, "API"),
            ScopePath::Service { service } => write!(f, "service \"{}\"", service),
            ScopePath::Method { service, method } => {
                write!(f, "method \"{}.{}\"", service, method)
            }
        }
    }
}
