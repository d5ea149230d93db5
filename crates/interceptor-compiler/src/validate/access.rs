//! Attribute access validation.
//!
//! Interceptors that read or write payload/result attributes need a single
//! value on that side of the method. A stream yields zero or more chunks, so
//! attribute access has no meaning there; plain interceptors are still fine.
//! The check runs over the effective chain, so an interceptor inherited from
//! the API or service scope is checked against every method it reaches.
//!
//! Selected attributes must also keep one type. A typed selection has to
//! match the field it picks, and an untyped one has to resolve to the same
//! type on every method the interceptor wraps in a direction, since all of
//! those methods share one accessor interface.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use super::effective_chain;
use crate::codegen::naming::type_ref;
use crate::diagnostic::{AccessSide, ScopePath, ValidationError};
use crate::ir::{
    ApiDescription, AttributeSelection, Direction, InterceptorIR, InterceptorId, MethodIR,
    ServiceIR, UserType,
};

/// First resolved type of each untyped selection in one service and direction.
type InheritedTypes<'a> = HashMap<(InterceptorId, AccessSide, &'a str), (ScopePath, String)>;

/// Validates attribute access of every interceptor on every method it applies to.
pub fn validate_access(desc: &ApiDescription, errors: &mut Vec<ValidationError>) {
    for svc in &desc.services {
        for direction in Direction::ALL {
            let mut inherited = InheritedTypes::new();
            for method in &svc.methods {
                validate_method(desc, svc, method, direction, &mut inherited, errors);
            }
        }
    }
}

fn validate_method<'a>(
    desc: &'a ApiDescription,
    svc: &'a ServiceIR,
    method: &'a MethodIR,
    direction: Direction,
    inherited: &mut InheritedTypes<'a>,
    errors: &mut Vec<ValidationError>,
) {
    let method_scope = ScopePath::method(&svc.name, &method.name);

    for (attached_at, id, intr) in effective_chain(desc, svc, method, direction) {
        if intr.accesses_payload() {
            if method.shape.streaming_payload {
                errors.push(ValidationError::StreamingPayloadConflict {
                    interceptor: intr.name.clone(),
                    scope: method_scope.clone(),
                    attached_at: attached_at.clone(),
                    direction,
                });
            } else {
                let side = Side {
                    side: AccessSide::Payload,
                    id,
                    typ: method.payload.as_ref(),
                    scope: &method_scope,
                    direction,
                };
                side.check(intr, [&intr.read_payload, &intr.write_payload], inherited, errors);
            }
        }

        if intr.accesses_result() {
            if method.shape.streaming_result {
                errors.push(ValidationError::StreamingResultConflict {
                    interceptor: intr.name.clone(),
                    scope: method_scope.clone(),
                    attached_at,
                    direction,
                });
            } else {
                let side = Side {
                    side: AccessSide::Result,
                    id,
                    typ: method.result.as_ref(),
                    scope: &method_scope,
                    direction,
                };
                side.check(intr, [&intr.read_result, &intr.write_result], inherited, errors);
            }
        }
    }
}

/// One side of a method, checked against an interceptor's selections.
struct Side<'s> {
    side: AccessSide,
    id: InterceptorId,
    typ: Option<&'s UserType>,
    scope: &'s ScopePath,
    direction: Direction,
}

impl Side<'_> {
    fn check<'a>(
        &self,
        intr: &'a InterceptorIR,
        selections: [&'a Option<AttributeSelection>; 2],
        inherited: &mut InheritedTypes<'a>,
        errors: &mut Vec<ValidationError>,
    ) {
        let mut unknown = HashSet::new();
        let mut checked = HashSet::new();
        for selection in selections.into_iter().flatten() {
            for attr in &selection.attributes {
                let Some(field) = self.typ.and_then(|t| t.object.field(&attr.name)) else {
                    if unknown.insert(attr.name.as_str()) {
                        errors.push(ValidationError::UnknownAttribute {
                            interceptor: intr.name.clone(),
                            attribute: attr.name.clone(),
                            side: self.side,
                            scope: self.scope.clone(),
                            direction: self.direction,
                        });
                    }
                    continue;
                };
                let declared = attr.typ.as_ref().map(type_ref);
                if !checked.insert((attr.name.as_str(), declared.clone())) {
                    continue;
                }
                let actual = type_ref(&field.typ);

                match declared {
                    Some(declared) if declared != actual => {
                        errors.push(ValidationError::SelectionTypeMismatch {
                            interceptor: intr.name.clone(),
                            attribute: attr.name.clone(),
                            side: self.side,
                            declared,
                            actual,
                            scope: self.scope.clone(),
                            direction: self.direction,
                        });
                    }
                    Some(_) => {}
                    None => match inherited.entry((self.id, self.side, attr.name.as_str())) {
                        Entry::Vacant(slot) => {
                            slot.insert((self.scope.clone(), actual));
                        }
                        Entry::Occupied(first) => {
                            let (first_scope, first_type) = first.get();
                            if *first_type != actual {
                                errors.push(ValidationError::InconsistentAttributeType {
                                    interceptor: intr.name.clone(),
                                    attribute: attr.name.clone(),
                                    side: self.side,
                                    direction: self.direction,
                                    first: first_scope.clone(),
                                    first_type: first_type.clone(),
                                    second: self.scope.clone(),
                                    second_type: actual,
                                });
                            }
                        }
                    },
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{
        AttributeType, FieldDef, InterceptorRef, MethodShape, ObjectType, SelectedAttribute,
    };

    fn make_type(name: &str, fields: &[&str]) -> UserType {
        UserType {
            name: name.to_string(),
            object: ObjectType {
                fields: fields
                    .iter()
                    .map(|f| FieldDef {
                        name: f.to_string(),
                        typ: AttributeType::String,
                        required: true,
                        pointer: false,
                    })
                    .collect(),
            },
        }
    }

    fn make_description(intr: InterceptorIR, shape: MethodShape) -> ApiDescription {
        let mut desc = ApiDescription::new("API");
        desc.catalog.declare(intr);
        let mut svc = ServiceIR::new("Service");
        svc.attachments.server.push(InterceptorRef::by_name("logging"));
        let mut method = MethodIR::new("Method");
        method.payload = Some(make_type("MethodPayload", &["initial"]));
        method.result = Some(make_type("MethodResult", &["data"]));
        method.shape = shape;
        svc.methods.push(method);
        desc.services.push(svc);
        desc
    }

    fn check(desc: &ApiDescription) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        validate_access(desc, &mut errors);
        errors
    }

    fn reading_result() -> InterceptorIR {
        let mut intr = InterceptorIR::new("logging", ScopePath::Api);
        intr.read_result = Some(AttributeSelection::new(&["data"]));
        intr
    }

    #[test]
    fn rejects_result_access_on_streaming_result() {
        let desc = make_description(
            reading_result(),
            MethodShape {
                streaming_payload: false,
                streaming_result: true,
            },
        );

        let errors = check(&desc);
        assert_eq!(
            errors,
            vec![ValidationError::StreamingResultConflict {
                interceptor: "logging".to_string(),
                scope: ScopePath::method("Service", "Method"),
                attached_at: ScopePath::service("Service"),
                direction: Direction::Server,
            }]
        );
        assert!(errors[0]
            .to_string()
            .contains("cannot be applied because the method result is streaming"));
    }

    #[test]
    fn accepts_result_access_with_streaming_payload() {
        let desc = make_description(
            reading_result(),
            MethodShape {
                streaming_payload: true,
                streaming_result: false,
            },
        );
        assert!(check(&desc).is_empty());
    }

    #[test]
    fn rejects_payload_access_on_streaming_payload() {
        let mut intr = InterceptorIR::new("logging", ScopePath::Api);
        intr.write_payload = Some(AttributeSelection::new(&["initial"]));
        let desc = make_description(
            intr,
            MethodShape {
                streaming_payload: true,
                streaming_result: true,
            },
        );

        let errors = check(&desc);
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ValidationError::StreamingPayloadConflict { .. }));
    }

    #[test]
    fn plain_interceptor_allowed_on_streams() {
        let desc = make_description(
            InterceptorIR::new("logging", ScopePath::Api),
            MethodShape {
                streaming_payload: true,
                streaming_result: true,
            },
        );
        assert!(check(&desc).is_empty());
    }

    #[test]
    fn reports_unknown_attribute_once() {
        let mut intr = InterceptorIR::new("logging", ScopePath::Api);
        intr.read_payload = Some(AttributeSelection::new(&["missing"]));
        intr.write_payload = Some(AttributeSelection::new(&["missing", "initial"]));
        let desc = make_description(intr, MethodShape::unary());

        assert_eq!(
            check(&desc),
            vec![ValidationError::UnknownAttribute {
                interceptor: "logging".to_string(),
                attribute: "missing".to_string(),
                side: AccessSide::Payload,
                scope: ScopePath::method("Service", "Method"),
                direction: Direction::Server,
            }]
        );
    }

    #[test]
    fn inherited_conflict_reported_per_method() {
        let mut desc = make_description(
            reading_result(),
            MethodShape {
                streaming_payload: false,
                streaming_result: true,
            },
        );
        let mut second = MethodIR::new("Other");
        second.shape.streaming_result = true;
        desc.services[0].methods.push(second);
        desc.services[0].methods[0]
            .attachments
            .server
            .push(InterceptorRef::by_name("logging"));

        // Repeated at method scope, still one error per method.
        assert_eq!(check(&desc).len(), 2);
    }

    fn typed_selection(name: &str, typ: AttributeType) -> AttributeSelection {
        AttributeSelection {
            attributes: vec![SelectedAttribute {
                name: name.to_string(),
                typ: Some(typ),
            }],
        }
    }

    fn with_other_method(desc: &mut ApiDescription, data: AttributeType) {
        let mut other = MethodIR::new("Other");
        other.result = Some(UserType {
            name: "OtherResult".to_string(),
            object: ObjectType {
                fields: vec![FieldDef {
                    name: "data".to_string(),
                    typ: data,
                    required: true,
                    pointer: false,
                }],
            },
        });
        desc.services[0].methods.push(other);
    }

    #[test]
    fn rejects_selection_type_differing_from_field() {
        let mut intr = InterceptorIR::new("logging", ScopePath::Api);
        intr.read_payload = Some(typed_selection("initial", AttributeType::Int));
        let desc = make_description(intr, MethodShape::unary());

        assert_eq!(
            check(&desc),
            vec![ValidationError::SelectionTypeMismatch {
                interceptor: "logging".to_string(),
                attribute: "initial".to_string(),
                side: AccessSide::Payload,
                declared: "int".to_string(),
                actual: "string".to_string(),
                scope: ScopePath::method("Service", "Method"),
                direction: Direction::Server,
            }]
        );
    }

    #[test]
    fn accepts_selection_type_matching_field() {
        let mut intr = InterceptorIR::new("logging", ScopePath::Api);
        intr.read_payload = Some(typed_selection("initial", AttributeType::String));
        let desc = make_description(intr, MethodShape::unary());
        assert!(check(&desc).is_empty());
    }

    #[test]
    fn rejects_untyped_attribute_with_differing_field_types() {
        let mut desc = make_description(reading_result(), MethodShape::unary());
        with_other_method(&mut desc, AttributeType::Int64);

        assert_eq!(
            check(&desc),
            vec![ValidationError::InconsistentAttributeType {
                interceptor: "logging".to_string(),
                attribute: "data".to_string(),
                side: AccessSide::Result,
                direction: Direction::Server,
                first: ScopePath::method("Service", "Method"),
                first_type: "string".to_string(),
                second: ScopePath::method("Service", "Other"),
                second_type: "int64".to_string(),
            }]
        );
    }

    #[test]
    fn untyped_attribute_types_compared_per_direction() {
        let mut desc = make_description(reading_result(), MethodShape::unary());
        with_other_method(&mut desc, AttributeType::Int64);
        let svc = &mut desc.services[0];
        svc.attachments.server.clear();
        svc.methods[0].attachments.server.push(InterceptorRef::by_name("logging"));
        svc.methods[1].attachments.client.push(InterceptorRef::by_name("logging"));

        assert!(check(&desc).is_empty());
    }
}
