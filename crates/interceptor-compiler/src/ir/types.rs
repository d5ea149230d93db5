//! Attribute types of method payloads and results.

use serde::{Deserialize, Serialize};

/// Types an attribute can carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    String,
    Int,
    Int64,
    Float64,
    Boolean,
    Bytes,
    Any,
    Array(Box<AttributeType>),
    Map(Box<AttributeType>, Box<AttributeType>),
    Object(ObjectType),
    /// A named user type defined elsewhere in the description.
    Reference(String),
}

impl AttributeType {
    /// Whether values of this type are scalars.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            AttributeType::String
                | AttributeType::Int
                | AttributeType::Int64
                | AttributeType::Float64
                | AttributeType::Boolean
                | AttributeType::Bytes
                | AttributeType::Any
        )
    }
}

/// An object type with named fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectType {
    pub fields: Vec<FieldDef>,
}

impl ObjectType {
    /// Looks up a field by its description name.
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A field definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    #[serde(rename = "type")]
    pub typ: AttributeType,
    #[serde(default)]
    pub required: bool,
    /// Forces pointer semantics on the generated field even when required.
    #[serde(default)]
    pub pointer: bool,
}

/// A named payload or result type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserType {
    pub name: String,
    #[serde(flatten)]
    pub object: ObjectType,
}
