//! End-to-end tests from hand-off document to emission units.

use interceptor_compiler::codegen::SharedDeclarations;
use interceptor_compiler::diagnostic::ScopePath;
use interceptor_compiler::ir::Direction;
use interceptor_compiler::{
    frontend, Compiler, CompilerConfig, CompilerError, EmissionUnit, ValidationError,
};
use serde_json::{json, Value};

fn compile(doc: Value) -> Result<Vec<EmissionUnit>, CompilerError> {
    let desc = frontend::parse_description(&doc.to_string())?;
    let config = CompilerConfig {
        emit_examples: false,
        ..CompilerConfig::default()
    };
    Compiler::new(config).compile(&desc).map(|out| out.units)
}

fn validation_errors(doc: Value) -> Vec<ValidationError> {
    match compile(doc) {
        Err(CompilerError::Validation { errors }) => errors,
        other => panic!("expected validation errors, got {:?}", other),
    }
}

fn shared(units: &[EmissionUnit]) -> Vec<&SharedDeclarations> {
    units
        .iter()
        .filter_map(|u| match u {
            EmissionUnit::SharedDeclarations(d) => Some(d),
            _ => None,
        })
        .collect()
}

#[test]
fn api_logging_scenario() {
    let units = compile(json!({
        "name": "API",
        "interceptors": [{ "name": "logging" }],
        "server_interceptors": ["logging"],
        "services": [{ "name": "S", "methods": [{ "name": "M1" }, { "name": "M2" }] }]
    }))
    .unwrap();

    let decls = shared(&units);
    assert_eq!(decls.len(), 1);
    assert_eq!(decls[0].direction, Direction::Server);

    let dispatched: Vec<_> = units
        .iter()
        .filter_map(|u| match u {
            EmissionUnit::Dispatch(d) => Some((d.method.as_str(), d.chain.len())),
            _ => None,
        })
        .collect();
    assert_eq!(dispatched, vec![("M1", 1), ("M2", 1)]);
}

#[test]
fn validation_both_directions_scenario() {
    let units = compile(json!({
        "name": "API",
        "interceptors": [{ "name": "validation", "read_payload": ["name"] }],
        "services": [{
            "name": "S",
            "server_interceptors": ["validation"],
            "client_interceptors": ["validation"],
            "methods": [{
                "name": "M",
                "payload": {
                    "name": "MPayload",
                    "fields": [{ "name": "name", "type": "string", "required": true }]
                }
            }]
        }]
    }))
    .unwrap();

    let dispatch: Vec<_> = units
        .iter()
        .filter_map(|u| match u {
            EmissionUnit::Dispatch(d) => Some(d),
            _ => None,
        })
        .collect();
    assert_eq!(dispatch.len(), 2);
    assert!(dispatch.iter().all(|d| d.chain[0].interceptor == "validation"));

    let declared = shared(&units)
        .iter()
        .flat_map(|d| d.declarations.iter())
        .filter(|d| d.interceptor == "validation")
        .count();
    assert_eq!(declared, 1);
}

#[test]
fn service_without_interceptors_emits_nothing() {
    let units = compile(json!({
        "name": "API",
        "interceptors": [{ "name": "logging" }],
        "services": [
            { "name": "Plain", "methods": [{ "name": "Get" }] },
            { "name": "Logged", "server_interceptors": ["logging"], "methods": [{ "name": "Get" }] }
        ]
    }))
    .unwrap();

    assert!(!units.is_empty());
    assert!(units.iter().all(|u| u.service() == "Logged"));
}

#[test]
fn examples_follow_config() {
    let desc = frontend::parse_description(
        &json!({
            "name": "API",
            "interceptors": [{ "name": "logging" }],
            "client_interceptors": ["logging"],
            "services": [{ "name": "S", "methods": [{ "name": "M" }] }]
        })
        .to_string(),
    )
    .unwrap();

    let output = Compiler::new(CompilerConfig::default()).compile(&desc).unwrap();
    assert_eq!(output.services_with_interceptors, 1);
    let examples: Vec<_> = output
        .units_for("S")
        .filter(|u| matches!(u, EmissionUnit::Example(_)))
        .map(|u| u.document())
        .collect();
    assert_eq!(examples, vec!["interceptors/api_s_client"]);
}

#[test]
fn duplicate_declaration_rejected() {
    let errors = validation_errors(json!({
        "name": "API",
        "interceptors": [{ "name": "duplicate" }],
        "services": [{
            "name": "Service",
            "methods": [{ "name": "Method", "interceptors": [{ "name": "duplicate" }] }]
        }]
    }));

    assert_eq!(
        errors,
        vec![ValidationError::DuplicateInterceptor {
            name: "duplicate".to_string(),
            first: ScopePath::Api,
            second: ScopePath::method("Service", "Method"),
        }]
    );
}

#[test]
fn streaming_result_rejected() {
    let errors = validation_errors(json!({
        "name": "API",
        "interceptors": [{ "name": "logging", "read_result": ["data"] }],
        "services": [{
            "name": "StreamingResultInterceptor",
            "server_interceptors": ["logging"],
            "methods": [{
                "name": "Method",
                "result": { "name": "MethodResult", "fields": [{ "name": "data", "type": "string" }] },
                "streaming_result": true
            }]
        }]
    }));

    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], ValidationError::StreamingResultConflict { .. }));
    assert!(errors[0]
        .to_string()
        .contains("cannot be applied because the method result is streaming"));
}

#[test]
fn read_result_with_streaming_payload_accepted() {
    let units = compile(json!({
        "name": "API",
        "interceptors": [{ "name": "logging", "read_result": ["data"] }],
        "services": [{
            "name": "StreamingInterceptorsWithReadResult",
            "server_interceptors": ["logging"],
            "methods": [{
                "name": "Method",
                "payload": { "name": "MethodPayload", "fields": [{ "name": "initial", "type": "string" }] },
                "result": { "name": "MethodResult", "fields": [{ "name": "data", "type": "string" }] },
                "streaming_payload": true
            }]
        }]
    }))
    .unwrap();

    assert_eq!(shared(&units).len(), 1);
}

#[test]
fn all_errors_reported_together() {
    let errors = validation_errors(json!({
        "name": "API",
        "interceptors": [{ "name": "" }, { "name": "ok" }],
        "server_interceptors": ["missing"],
        "services": [{
            "name": "Service",
            "client_interceptors": [42, ""],
            "methods": [{ "name": "Method", "server_interceptors": ["ok"] }]
        }]
    }));

    assert_eq!(errors.len(), 4);
    assert!(errors.iter().any(|e| matches!(e, ValidationError::UndefinedInterceptor { name, .. } if name == "missing")));
    assert!(errors.iter().any(|e| matches!(e, ValidationError::InvalidReference { found, .. } if found == "42")));
    assert_eq!(
        errors
            .iter()
            .filter(|e| matches!(e, ValidationError::InvalidName { .. }))
            .count(),
        2
    );
}

#[test]
fn colliding_wrapper_names_rejected() {
    let errors = validation_errors(json!({
        "name": "API",
        "interceptors": [{ "name": "auth" }, { "name": "user-auth" }],
        "services": [{
            "name": "S",
            "methods": [
                { "name": "GetUser", "server_interceptors": ["auth"] },
                { "name": "Get", "server_interceptors": ["user-auth"] }
            ]
        }]
    }));

    assert_eq!(errors.len(), 1);
    assert!(matches!(
        &errors[0],
        ValidationError::GeneratedNameCollision { identifier, service, .. }
            if identifier == "wrapGetUserAuth" && service == "S"
    ));
}

#[test]
fn typed_selection_must_match_field() {
    let errors = validation_errors(json!({
        "name": "API",
        "interceptors": [{ "name": "validation", "read_payload": [{ "name": "name", "type": "int" }] }],
        "server_interceptors": ["validation"],
        "services": [{
            "name": "S",
            "methods": [{
                "name": "M",
                "payload": { "name": "MPayload", "fields": [{ "name": "name", "type": "string" }] }
            }]
        }]
    }));

    assert_eq!(errors.len(), 1);
    assert!(matches!(
        &errors[0],
        ValidationError::SelectionTypeMismatch { declared, actual, .. }
            if declared == "int" && actual == "string"
    ));
}

#[test]
fn untyped_selection_needs_one_type_across_methods() {
    let errors = validation_errors(json!({
        "name": "API",
        "interceptors": [{ "name": "cache", "read_result": ["id"] }],
        "services": [{
            "name": "S",
            "server_interceptors": ["cache"],
            "methods": [
                { "name": "A", "result": { "name": "AResult", "fields": [{ "name": "id", "type": "string" }] } },
                { "name": "B", "result": { "name": "BResult", "fields": [{ "name": "id", "type": "int64" }] } }
            ]
        }]
    }));

    assert_eq!(errors.len(), 1);
    assert!(matches!(
        &errors[0],
        ValidationError::InconsistentAttributeType { first_type, second_type, second, .. }
            if first_type == "string" && second_type == "int64" && *second == ScopePath::method("S", "B")
    ));
}

#[test]
fn accessor_interface_matches_every_view() {
    let units = compile(json!({
        "name": "API",
        "interceptors": [{ "name": "cache", "read_result": ["id"] }],
        "services": [{
            "name": "S",
            "server_interceptors": ["cache"],
            "methods": [
                { "name": "A", "result": { "name": "AResult", "fields": [{ "name": "id", "type": "string" }] } },
                { "name": "B", "result": { "name": "BResult", "fields": [{ "name": "id", "type": "string", "required": true }] } }
            ]
        }]
    }))
    .unwrap();

    let interface_type = shared(&units)[0].declarations[0]
        .result_access
        .as_ref()
        .map(|access| access.readable[0].type_ref.clone());
    assert_eq!(interface_type.as_deref(), Some("string"));

    for unit in &units {
        if let EmissionUnit::Wrapper(wrapper) = unit {
            for method in &wrapper.methods {
                let view = method.read_result.as_ref().unwrap();
                assert_eq!(view.attributes[0].type_ref, "string");
            }
        }
    }
}
