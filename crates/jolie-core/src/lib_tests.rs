use crate::{
    Cardinality, Declaration, ExecutionMode, Expression, NativeType, OperationType,
    ParsingContext, PathType, Statement, TypeDefinition, VariablePath, native_type_map,
    parse_program, parse_type_map,
};

const SAMPLE_PROGRAM: &str = r#"{
    "children": [
        {"type": {"inline": {
            "id": "Req",
            "native_type": "void",
            "sub_types": {
                "id": {"inline": {"id": "id", "native_type": "string"}},
                "tags": {"inline": {
                    "id": "tags",
                    "native_type": "string",
                    "cardinality": {"min": 0, "max": 2147483647}
                }}
            }
        }}},
        {"input_port": {
            "id": "In",
            "location": "socket://localhost:8000",
            "operations": [{"request_response": {
                "id": "op",
                "request_type": {"link": {"id": "Req", "linked_type_name": "Req"}},
                "response_type": {"link": {"id": "void", "linked_type_name": "void"}},
                "faults": {"Bad": {"link": {"id": "void", "linked_type_name": "void"}}}
            }}]
        }},
        {"execution": {"mode": "concurrent"}},
        {"procedure": {
            "ctx": {"source": "main.ol", "line": 7},
            "id": "main",
            "body": {"request_response": {
                "id": "op",
                "input_path": {"path_type": "normal", "steps": [{"key": {"constant": {"string": "req"}}}]},
                "process": {"throw": {"ctx": {"source": "main.ol", "line": 8}, "id": "Bad"}}
            }}
        }}
    ]
}"#;

#[test]
fn parse_program_from_json() {
    let program = parse_program(SAMPLE_PROGRAM).unwrap();
    assert_eq!(program.children.len(), 4);

    let Declaration::Type(TypeDefinition::Inline(req)) = &program.children[0] else {
        panic!("expected inline type");
    };
    assert_eq!(req.id, "Req");
    assert_eq!(req.native_type, NativeType::Void);
    assert_eq!(req.cardinality, Cardinality::ONE);
    assert_eq!(req.get_sub_type("tags").unwrap().cardinality(), Cardinality::ANY);
    assert!(!req.untyped_sub_types);

    let Declaration::InputPort(port) = &program.children[1] else {
        panic!("expected input port");
    };
    let op = port.find_operation("op").unwrap();
    assert_eq!(op.operation_type(), OperationType::RequestResponse);
    assert!(op.as_request_response().unwrap().faults.contains_key("Bad"));

    let Declaration::Execution(execution) = &program.children[2] else {
        panic!("expected execution info");
    };
    assert_eq!(execution.mode, ExecutionMode::Concurrent);

    let main = program.procedures().next().unwrap();
    assert!(main.is_main());
    assert_eq!(main.ctx, ParsingContext::new("main.ol", 7));
    assert_eq!(main.body.input_operation(), Some("op"));
    let Statement::RequestResponse(rr) = &main.body else {
        panic!("expected request-response input");
    };
    assert!(rr.input_path.as_ref().unwrap().same_path(&VariablePath::of(&["req"])));
    assert_eq!(rr.process.context().unwrap().line, 8);
}

#[test]
fn parse_program_rejects_unknown_declaration() {
    let err = parse_program(r#"{"children": [{"service": {}}]}"#).unwrap_err();
    assert!(err.to_string().contains("unknown variant `service`"));
}

#[test]
fn parse_type_map_from_json() {
    let types = parse_type_map(
        r#"{"Alias": {"link": {"id": "Alias", "linked_type_name": "string"}}}"#,
    )
    .unwrap();
    let TypeDefinition::Link(link) = &types["Alias"] else {
        panic!("expected link");
    };
    assert_eq!(link.linked_type_name, "string");
}

#[test]
fn native_type_map_contents() {
    let types = native_type_map();
    let ids: Vec<_> = types.keys().map(String::as_str).collect();
    assert_eq!(
        ids,
        ["void", "bool", "int", "long", "double", "string", "raw", "any", "undefined"]
    );

    let TypeDefinition::Inline(undefined) = &types["undefined"] else {
        panic!("expected inline type");
    };
    assert_eq!(undefined.native_type, NativeType::Any);
    assert!(undefined.untyped_sub_types);
}

#[test]
fn cardinality_display() {
    assert_eq!(Cardinality::ONE.to_string(), "[1,1]");
    assert_eq!(Cardinality::ANY.to_string(), "[0,*]");
    assert_eq!(Cardinality::new(-1, 3).to_string(), "[-1,3]");
}

#[test]
fn variable_path_queries() {
    let static_path = VariablePath::of(&["a", "b"]).with_type(PathType::CorrelationSet);
    assert!(static_path.is_cset());
    assert!(static_path.is_static());
    assert_eq!(static_path.static_keys(), Some(vec!["a", "b"]));

    let key = Expression::Variable(VariablePath::of(&["k"]));
    let dynamic = VariablePath::of(&["a"]).dynamic_step(key);
    assert!(!dynamic.is_static());
    assert_eq!(dynamic.static_keys(), None);
    assert_eq!(dynamic.root_name(), Some("a"));
}
