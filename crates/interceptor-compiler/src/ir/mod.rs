//! Intermediate representation of an evaluated service description.
//!
//! The description is built once by the evaluation phase (see [`crate::frontend`])
//! and is read-only for every pass that follows. Only the parts the interceptor
//! passes need are modelled: the catalog, the attachments at each scope, and the
//! payload/result shape of each method.

mod attachment;
mod catalog;
mod service;
mod types;

pub use attachment::{Direction, InterceptorRef, RejectedReference, ScopeAttachment};
pub use catalog::{AttributeSelection, Catalog, InterceptorIR, InterceptorId, SelectedAttribute};
pub use service::{MethodIR, MethodShape, ServiceIR};
pub use types::{AttributeType, FieldDef, ObjectType, UserType};

use crate::diagnostic::ScopePath;

/// The complete description consumed by the interceptor passes.
#[derive(Debug, Clone)]
pub struct ApiDescription {
    /// Name of the API.
    pub name: String,

    /// Every interceptor declared anywhere in the description.
    pub catalog: Catalog,

    /// API-scope attachments.
    pub attachments: ScopeAttachment,

    pub services: Vec<ServiceIR>,

    /// Reference values the builder could not turn into an [`InterceptorRef`].
    pub rejected_references: Vec<RejectedReference>,
}

impl ApiDescription {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            catalog: Catalog::new(),
            attachments: ScopeAttachment::default(),
            services: Vec::new(),
            rejected_references: Vec::new(),
        }
    }

    pub fn service(&self, name: &str) -> Option<&ServiceIR> {
        self.services.iter().find(|s| s.name == name)
    }

    /// References for one method and direction, outermost scope first.
    ///
    /// Yields the API list, then the service list, then the method list, each
    /// in declaration order, paired with the scope it was attached at.
    pub fn scoped_refs<'a>(
        &'a self,
        service: &'a ServiceIR,
        method: &'a MethodIR,
        direction: Direction,
    ) -> impl Iterator<Item = (ScopePath, &'a InterceptorRef)> + 'a {
        let api = self
            .attachments
            .refs(direction)
            .iter()
            .map(|r| (ScopePath::Api, r));
        let svc = service
            .attachments
            .refs(direction)
            .iter()
            .map(move |r| (ScopePath::service(&service.name), r));
        let meth = method
            .attachments
            .refs(direction)
            .iter()
            .map(move |r| (ScopePath::method(&service.name, &method.name), r));
        api.chain(svc).chain(meth)
    }
}
