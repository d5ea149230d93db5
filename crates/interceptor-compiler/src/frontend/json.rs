//! JSON hand-off documents.
//!
//! ```json
//! {
//!   "name": "Store",
//!   "interceptors": [{ "name": "logging" }],
//!   "server_interceptors": ["logging"],
//!   "services": [{
//!     "name": "Catalog",
//!     "interceptors": [{ "name": "cache", "read_result": ["id"] }],
//!     "client_interceptors": [{ "handle": 1 }],
//!     "methods": [{
//!       "name": "Get",
//!       "payload": { "name": "GetPayload", "fields": [{ "name": "id", "type": "string", "required": true }] },
//!       "streaming_result": false
//!     }]
//!   }]
//! }
//! ```
//!
//! Declarations are numbered in document order (API first, then each service
//! followed by its methods); `{ "handle": n }` refers to the n-th one.

use serde::Deserialize;
use serde_json::Value;

use super::Frontend;
use crate::diagnostic::{CompilerError, ScopePath};
use crate::ir::{
    ApiDescription, AttributeSelection, AttributeType, Direction, InterceptorIR, InterceptorId,
    InterceptorRef, MethodIR, MethodShape, RejectedReference, ScopeAttachment, SelectedAttribute,
    ServiceIR, UserType,
};

/// Frontend for JSON hand-off documents.
pub struct JsonFrontend;

impl Frontend for JsonFrontend {
    fn format(&self) -> &str {
        "json"
    }

    fn extensions(&self) -> &[&str] {
        &["json"]
    }

    fn parse_description(&self, source: &str) -> Result<ApiDescription, CompilerError> {
        let doc: DescriptionDoc = serde_json::from_str(source).map_err(|e| CompilerError::ParseFailed {
            message: e.to_string(),
        })?;
        Ok(build_description(doc))
    }
}

#[derive(Deserialize)]
struct DescriptionDoc {
    name: String,
    #[serde(default)]
    interceptors: Vec<InterceptorDoc>,
    #[serde(default)]
    server_interceptors: Vec<Value>,
    #[serde(default)]
    client_interceptors: Vec<Value>,
    #[serde(default)]
    services: Vec<ServiceDoc>,
}

#[derive(Deserialize)]
struct InterceptorDoc {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    read_payload: Option<Vec<SelectionDoc>>,
    #[serde(default)]
    write_payload: Option<Vec<SelectionDoc>>,
    #[serde(default)]
    read_result: Option<Vec<SelectionDoc>>,
    #[serde(default)]
    write_result: Option<Vec<SelectionDoc>>,
}

/// A selected attribute, either just its name or a name with a type.
#[derive(Deserialize)]
#[serde(untagged)]
enum SelectionDoc {
    Name(String),
    Typed {
        name: String,
        #[serde(rename = "type", default)]
        typ: Option<AttributeType>,
    },
}

#[derive(Deserialize)]
struct ServiceDoc {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    interceptors: Vec<InterceptorDoc>,
    #[serde(default)]
    server_interceptors: Vec<Value>,
    #[serde(default)]
    client_interceptors: Vec<Value>,
    #[serde(default)]
    methods: Vec<MethodDoc>,
}

#[derive(Deserialize)]
struct MethodDoc {
    name: String,
    #[serde(default)]
    interceptors: Vec<InterceptorDoc>,
    #[serde(default)]
    payload: Option<UserType>,
    #[serde(default)]
    result: Option<UserType>,
    #[serde(default)]
    streaming_payload: bool,
    #[serde(default)]
    streaming_result: bool,
    #[serde(default)]
    server_interceptors: Vec<Value>,
    #[serde(default)]
    client_interceptors: Vec<Value>,
}

fn build_description(doc: DescriptionDoc) -> ApiDescription {
    let mut desc = ApiDescription::new(doc.name);

    // Declarations first so handles can point anywhere in the document.
    declare_all(&mut desc, &doc.interceptors, ScopePath::Api);
    for svc in &doc.services {
        declare_all(&mut desc, &svc.interceptors, ScopePath::service(&svc.name));
        for method in &svc.methods {
            declare_all(
                &mut desc,
                &method.interceptors,
                ScopePath::method(&svc.name, &method.name),
            );
        }
    }

    let mut rejected = Vec::new();
    let catalog_len = desc.catalog.len();
    desc.attachments = build_attachment(
        &doc.server_interceptors,
        &doc.client_interceptors,
        ScopePath::Api,
        catalog_len,
        &mut rejected,
    );

    for svc in doc.services {
        let mut service = ServiceIR::new(&svc.name);
        service.description = svc.description;
        service.attachments = build_attachment(
            &svc.server_interceptors,
            &svc.client_interceptors,
            ScopePath::service(&svc.name),
            catalog_len,
            &mut rejected,
        );
        for m in svc.methods {
            let mut method = MethodIR::new(&m.name);
            method.payload = m.payload;
            method.result = m.result;
            method.shape = MethodShape {
                streaming_payload: m.streaming_payload,
                streaming_result: m.streaming_result,
            };
            method.attachments = build_attachment(
                &m.server_interceptors,
                &m.client_interceptors,
                ScopePath::method(&svc.name, &m.name),
                catalog_len,
                &mut rejected,
            );
            service.methods.push(method);
        }
        desc.services.push(service);
    }

    desc.rejected_references = rejected;
    desc
}

fn declare_all(desc: &mut ApiDescription, docs: &[InterceptorDoc], scope: ScopePath) {
    for doc in docs {
        let mut intr = InterceptorIR::new(&doc.name, scope.clone());
        intr.description = doc.description.clone();
        intr.read_payload = doc.read_payload.as_deref().map(selection);
        intr.write_payload = doc.write_payload.as_deref().map(selection);
        intr.read_result = doc.read_result.as_deref().map(selection);
        intr.write_result = doc.write_result.as_deref().map(selection);
        desc.catalog.declare(intr);
    }
}

fn selection(entries: &[SelectionDoc]) -> AttributeSelection {
    AttributeSelection {
        attributes: entries
            .iter()
            .map(|entry| match entry {
                SelectionDoc::Name(name) => SelectedAttribute {
                    name: name.clone(),
                    typ: None,
                },
                SelectionDoc::Typed { name, typ } => SelectedAttribute {
                    name: name.clone(),
                    typ: typ.clone(),
                },
            })
            .collect(),
    }
}

fn build_attachment(
    server: &[Value],
    client: &[Value],
    scope: ScopePath,
    catalog_len: usize,
    rejected: &mut Vec<RejectedReference>,
) -> ScopeAttachment {
    let mut attachment = ScopeAttachment::default();
    for (direction, values) in [(Direction::Server, server), (Direction::Client, client)] {
        for value in values {
            match reference_from_value(value, catalog_len) {
                Some(reference) => match direction {
                    Direction::Server => attachment.server.push(reference),
                    Direction::Client => attachment.client.push(reference),
                },
                None => rejected.push(RejectedReference {
                    scope: scope.clone(),
                    direction,
                    found: value.to_string(),
                }),
            }
        }
    }
    attachment
}

/// Converts a reference value: a string is a name, `{ "handle": n }` a declared interceptor.
fn reference_from_value(value: &Value, catalog_len: usize) -> Option<InterceptorRef> {
    match value {
        Value::String(name) => Some(InterceptorRef::ByName(name.clone())),
        Value::Object(map) if map.len() == 1 => {
            let handle = map.get("handle")?.as_u64()?;
            let index = usize::try_from(handle).ok().filter(|i| *i < catalog_len)?;
            Some(InterceptorRef::ByValue(InterceptorId(index)))
        }
        _ => None,
    }
}
