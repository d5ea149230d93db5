//! Restricted payload/result views.
//!
//! A view exposes exactly the attributes an interceptor selected, taken from
//! the full payload or result type of the method it wraps.

use serde::Serialize;

use super::naming::{to_pascal_case, type_ref, view_type_name};
use crate::diagnostic::{AccessSide, CompilerError};
use crate::ir::{AttributeSelection, MethodIR, ObjectType};

/// An attribute exposed through a view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExposedAttribute {
    /// Name in the description.
    pub name: String,
    /// Generated field name.
    pub field_name: String,
    pub type_ref: String,
    /// Whether the generated field is a pointer (optional primitive or forced).
    pub pointer: bool,
}

/// Read-only or read-write access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessMode {
    ReadOnly,
    ReadWrite,
}

impl AccessMode {
    pub(crate) fn suffix(self) -> &'static str {
        match self {
            AccessMode::ReadOnly => "Reader",
            AccessMode::ReadWrite => "Writer",
        }
    }
}

/// A typed view over one side of a method for one interceptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccessView {
    /// Name of the restricted view type.
    pub type_name: String,
    /// Full payload or result type the view is built from.
    pub source_type: String,
    pub side: String,
    pub mode: AccessMode,
    pub attributes: Vec<ExposedAttribute>,
}

/// Looks up each selected attribute in `parent`.
///
/// Selections were checked by the validator, so a missing attribute here is a
/// contract violation.
pub fn collect_attributes(
    selection: &AttributeSelection,
    parent: &ObjectType,
) -> Result<Vec<ExposedAttribute>, CompilerError> {
    selection
        .attributes
        .iter()
        .map(|attr| {
            let field = parent.field(&attr.name).ok_or_else(|| {
                CompilerError::contract(format!("selected attribute \"{}\" is not defined", attr.name))
            })?;
            Ok(ExposedAttribute {
                name: attr.name.clone(),
                field_name: to_pascal_case(&attr.name),
                type_ref: type_ref(&field.typ),
                pointer: field.pointer || (!field.required && field.typ.is_primitive()),
            })
        })
        .collect()
}

/// Builds the view for one selection of `interceptor` on `method`, if any.
pub(crate) fn build_view(
    interceptor: &str,
    method: &MethodIR,
    side: AccessSide,
    mode: AccessMode,
    selection: Option<&AttributeSelection>,
) -> Result<Option<AccessView>, CompilerError> {
    let Some(selection) = selection.filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    let source = match side {
        AccessSide::Payload => method.payload.as_ref(),
        AccessSide::Result => method.result.as_ref(),
    }
    .ok_or_else(|| {
        CompilerError::contract(format!(
            "interceptor \"{}\" accesses the {} of method \"{}\" which has none",
            interceptor, side, method.name
        ))
    })?;

    Ok(Some(AccessView {
        type_name: view_type_name(interceptor, &method.name, side, mode),
        source_type: to_pascal_case(&source.name),
        side: side.to_string(),
        mode,
        attributes: collect_attributes(selection, &source.object)?,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{AttributeType, FieldDef, UserType};

    fn field(name: &str, typ: AttributeType, required: bool, pointer: bool) -> FieldDef {
        FieldDef {
            name: name.to_string(),
            typ,
            required,
            pointer,
        }
    }

    #[test]
    fn required_primitive_is_not_pointer() {
        let parent = ObjectType {
            fields: vec![field("name", AttributeType::String, true, false)],
        };
        let got = collect_attributes(&AttributeSelection::new(&["name"]), &parent).unwrap();
        assert_eq!(
            got,
            vec![ExposedAttribute {
                name: "name".to_string(),
                field_name: "Name".to_string(),
                type_ref: "string".to_string(),
                pointer: false,
            }]
        );
    }

    #[test]
    fn optional_or_forced_fields_are_pointers() {
        let parent = ObjectType {
            fields: vec![
                field("age", AttributeType::Int, false, false),
                field("count", AttributeType::Int, true, true),
                field("tags", AttributeType::Array(Box::new(AttributeType::String)), false, false),
            ],
        };
        let got = collect_attributes(&AttributeSelection::new(&["age", "count", "tags"]), &parent)
            .unwrap();
        let pointers: Vec<bool> = got.iter().map(|a| a.pointer).collect();
        assert_eq!(pointers, vec![true, true, false]);
        assert_eq!(got[2].type_ref, "[]string");
    }

    #[test]
    fn missing_attribute_is_contract_violation() {
        let parent = ObjectType::default();
        let err = collect_attributes(&AttributeSelection::new(&["missing"]), &parent).unwrap_err();
        assert!(matches!(err, CompilerError::ContractViolation { .. }));
    }

    #[test]
    fn builds_named_view() {
        let mut method = MethodIR::new("create");
        method.payload = Some(UserType {
            name: "CreatePayload".to_string(),
            object: ObjectType {
                fields: vec![field("name", AttributeType::String, true, false)],
            },
        });

        let view = build_view(
            "validation",
            &method,
            AccessSide::Payload,
            AccessMode::ReadOnly,
            Some(&AttributeSelection::new(&["name"])),
        )
        .unwrap()
        .unwrap();
        assert_eq!(view.type_name, "validationCreatePayloadReader");
        assert_eq!(view.source_type, "CreatePayload");
        assert_eq!(view.attributes.len(), 1);

        let none = build_view("validation", &method, AccessSide::Result, AccessMode::ReadWrite, None)
            .unwrap();
        assert!(none.is_none());
    }
}
