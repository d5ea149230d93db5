//! Chain resolution.
//!
//! For each method and direction the effective chain is the API list, then the
//! service list, then the method list, resolved to catalog entries and
//! deduplicated by identity. The first (outermost) attachment of an
//! interceptor fixes its position.
//!
//! Resolution assumes a validated description. A reference that does not
//! resolve here is a contract violation, not a user error.

use std::collections::HashSet;

use crate::diagnostic::CompilerError;
use crate::ir::{ApiDescription, Direction, InterceptorId, MethodIR, ServiceIR};

/// The ordered, deduplicated interceptors for one method and direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedChain {
    pub direction: Direction,
    /// Outermost first.
    pub interceptors: Vec<InterceptorId>,
}

impl ResolvedChain {
    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    pub fn contains(&self, id: InterceptorId) -> bool {
        self.interceptors.contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = InterceptorId> + '_ {
        self.interceptors.iter().copied()
    }
}

/// Resolves the chain of one method in one direction.
pub fn resolve(
    desc: &ApiDescription,
    service: &ServiceIR,
    method: &MethodIR,
    direction: Direction,
) -> Result<ResolvedChain, CompilerError> {
    let mut seen = HashSet::new();
    let mut interceptors = Vec::new();

    for (scope, reference) in desc.scoped_refs(service, method, direction) {
        let id = desc.catalog.resolve_ref(reference).ok_or_else(|| {
            CompilerError::contract(format!(
                "unresolved {} interceptor reference {:?} in {}",
                direction, reference, scope
            ))
        })?;
        if seen.insert(id) {
            interceptors.push(id);
        }
    }

    Ok(ResolvedChain {
        direction,
        interceptors,
    })
}

/// Both chains of one method.
#[derive(Debug, Clone)]
pub struct MethodChains<'a> {
    pub method: &'a MethodIR,
    pub server: ResolvedChain,
    pub client: ResolvedChain,
}

impl MethodChains<'_> {
    pub fn chain(&self, direction: Direction) -> &ResolvedChain {
        match direction {
            Direction::Server => &self.server,
            Direction::Client => &self.client,
        }
    }
}

/// Resolved chains for every method of a service.
#[derive(Debug, Clone)]
pub struct ServiceChains<'a> {
    pub service: &'a ServiceIR,
    pub methods: Vec<MethodChains<'a>>,
    /// Distinct server interceptors across all methods, in first-use order.
    pub server: Vec<InterceptorId>,
    /// Distinct client interceptors across all methods, in first-use order.
    pub client: Vec<InterceptorId>,
}

impl<'a> ServiceChains<'a> {
    pub fn interceptors(&self, direction: Direction) -> &[InterceptorId] {
        match direction {
            Direction::Server => &self.server,
            Direction::Client => &self.client,
        }
    }

    /// True when no method has an interceptor in either direction.
    pub fn is_empty(&self) -> bool {
        self.server.is_empty() && self.client.is_empty()
    }

    /// Methods whose chain in `direction` is non-empty.
    pub fn methods_with<'s>(
        &'s self,
        direction: Direction,
    ) -> impl Iterator<Item = &'s MethodChains<'a>> + 's {
        self.methods
            .iter()
            .filter(move |m| !m.chain(direction).is_empty())
    }
}

/// Resolves both directions for every method of a service.
pub fn resolve_service<'a>(
    desc: &'a ApiDescription,
    service: &'a ServiceIR,
) -> Result<ServiceChains<'a>, CompilerError> {
    let mut methods = Vec::with_capacity(service.methods.len());
    let mut server = Vec::new();
    let mut client = Vec::new();

    for method in &service.methods {
        let chains = MethodChains {
            method,
            server: resolve(desc, service, method, Direction::Server)?,
            client: resolve(desc, service, method, Direction::Client)?,
        };
        merge_distinct(&mut server, &chains.server);
        merge_distinct(&mut client, &chains.client);
        methods.push(chains);
    }

    Ok(ServiceChains {
        service,
        methods,
        server,
        client,
    })
}

fn merge_distinct(into: &mut Vec<InterceptorId>, chain: &ResolvedChain) {
    for id in chain.iter() {
        if !into.contains(&id) {
            into.push(id);
        }
    }
}

/// Client interceptors that still need a shared declaration.
///
/// Anything the service already uses on the server side, on any method, is
/// declared with the server declarations and reused by the client.
pub fn client_declarations(chains: &ServiceChains<'_>) -> Vec<InterceptorId> {
    chains
        .client
        .iter()
        .copied()
        .filter(|id| !chains.server.contains(id))
        .collect()
}
