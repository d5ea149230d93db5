//! The interceptor catalog.

use serde::Serialize;

use super::{AttributeType, InterceptorRef};
use crate::diagnostic::ScopePath;

/// Handle to a catalog entry, obtained when the interceptor is declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct InterceptorId(pub(crate) usize);

impl InterceptorId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A catalog interceptor declaration.
#[derive(Debug, Clone)]
pub struct InterceptorIR {
    /// Catalog-wide unique name.
    pub name: String,

    pub description: Option<String>,

    /// Payload attributes exposed read-only.
    pub read_payload: Option<AttributeSelection>,

    /// Payload attributes exposed read-write.
    pub write_payload: Option<AttributeSelection>,

    /// Result attributes exposed read-only.
    pub read_result: Option<AttributeSelection>,

    /// Result attributes exposed read-write.
    pub write_result: Option<AttributeSelection>,

    /// Scope the declaration appeared in.
    pub declared_in: ScopePath,
}

impl InterceptorIR {
    /// Creates an interceptor with no attribute access.
    pub fn new(name: impl Into<String>, declared_in: ScopePath) -> Self {
        Self {
            name: name.into(),
            description: None,
            read_payload: None,
            write_payload: None,
            read_result: None,
            write_result: None,
            declared_in,
        }
    }

    /// Whether the interceptor reads or writes payload attributes.
    pub fn accesses_payload(&self) -> bool {
        non_empty(&self.read_payload) || non_empty(&self.write_payload)
    }

    /// Whether the interceptor reads or writes result attributes.
    pub fn accesses_result(&self) -> bool {
        non_empty(&self.read_result) || non_empty(&self.write_result)
    }

    /// Whether any of the four attribute selections is declared.
    pub fn has_access_specs(&self) -> bool {
        self.read_payload.is_some()
            || self.write_payload.is_some()
            || self.read_result.is_some()
            || self.write_result.is_some()
    }
}

fn non_empty(selection: &Option<AttributeSelection>) -> bool {
    selection.as_ref().is_some_and(|s| !s.is_empty())
}

/// A set of named attributes exposed to an interceptor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeSelection {
    pub attributes: Vec<SelectedAttribute>,
}

impl AttributeSelection {
    pub fn new(names: &[&str]) -> Self {
        Self {
            attributes: names
                .iter()
                .map(|n| SelectedAttribute {
                    name: n.to_string(),
                    typ: None,
                })
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

/// An attribute named in a selection.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedAttribute {
    pub name: String,
    /// Declared type; when absent the type comes from the method payload or result.
    pub typ: Option<AttributeType>,
}

/// All interceptors declared in a description, in declaration order.
///
/// Duplicate names are kept as separate entries so the validator can report
/// them; lookups by name always see the first declaration.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    interceptors: Vec<InterceptorIR>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a declaration and returns its handle.
    pub fn declare(&mut self, interceptor: InterceptorIR) -> InterceptorId {
        self.interceptors.push(interceptor);
        InterceptorId(self.interceptors.len() - 1)
    }

    pub fn get(&self, id: InterceptorId) -> Option<&InterceptorIR> {
        self.interceptors.get(id.0)
    }

    /// Finds the first declaration with the given name.
    pub fn lookup(&self, name: &str) -> Option<InterceptorId> {
        self.interceptors
            .iter()
            .position(|i| i.name == name)
            .map(InterceptorId)
    }

    /// Resolves a reference to a catalog entry.
    pub fn resolve_ref(&self, reference: &InterceptorRef) -> Option<InterceptorId> {
        match reference {
            InterceptorRef::ByValue(id) => self.get(*id).map(|_| *id),
            InterceptorRef::ByName(name) if name.is_empty() => None,
            InterceptorRef::ByName(name) => self.lookup(name),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (InterceptorId, &InterceptorIR)> {
        self.interceptors
            .iter()
            .enumerate()
            .map(|(i, intr)| (InterceptorId(i), intr))
    }

    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }
}
