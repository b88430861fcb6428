use jolie_core::{Declaration, InputChoiceStatement, InstallStatement, Program, Statement};

use super::{CODE_QUALITY_PREFIX, FaultFlowVerifier};
use crate::test_utils::*;

/// `inputPort Svc { get( string )( string ) throws <faults> }` plus `main`.
fn serve(faults: &[&str], main_body: Statement) -> Program {
    service(faults, main_body, [])
}

fn service(
    faults: &[&str],
    main_body: Statement,
    extra: impl IntoIterator<Item = Declaration>,
) -> Program {
    let mut get = request_response_op("get", "string", "string", 3);
    for fault in faults {
        get = get.fault(*fault, "void");
    }
    let mut children: Vec<Declaration> = vec![input_port("Svc", 2).operation(get).into()];
    children.extend(extra);
    children.push(main(main_body));
    Program::new(children)
}

#[test]
fn undeclared_fault_escapes() {
    let program = serve(&[], request_response("get", Statement::throw("Bad")));

    assert_eq!(
        fault_flow_lines(&program),
        ["CODE QUALITY WARNING: fault Bad could be thrown inside operation get but it is not declared in the interface"]
    );
}

#[test]
fn default_handler_catches_everything() {
    let body = Statement::sequence([
        InstallStatement::new()
            .handler("default", Statement::Nullprocess)
            .into(),
        Statement::throw("Bad"),
        Statement::throw("Worse"),
    ]);
    let program = serve(&[], request_response("get", body));

    assert!(fault_flow_lines(&program).is_empty());
}

#[test]
fn declared_fault_never_thrown() {
    let inner = Statement::scope(
        "guarded",
        Statement::sequence([
            InstallStatement::new()
                .handler("Other", Statement::Nullprocess)
                .into(),
            Statement::throw("Other"),
        ]),
    );
    let body = Statement::sequence([Statement::throw("Declared"), inner]);
    let program = serve(&["Bad", "Declared"], request_response("get", body));

    assert_eq!(
        fault_flow_lines(&program),
        ["CODE QUALITY WARNING: fault Bad is never thrown by operation get even if it is declared in the interface"]
    );
}

#[test]
fn unused_declarations_ignored_when_nothing_escapes() {
    let program = serve(&["Bad"], request_response("get", Statement::Nullprocess));

    assert!(fault_flow_lines(&program).is_empty());
}

#[test]
fn solicited_operation_faults_name_their_origin() {
    let backend = output_port("Backend", 5)
        .operation(request_response_op("fetch", "string", "string", 5).fault("Timeout", "void"));
    let program = service(
        &[],
        request_response("get", solicit("fetch", "Backend", 8)),
        [Declaration::from(backend)],
    );

    assert_eq!(
        fault_flow_lines(&program),
        ["CODE QUALITY WARNING: fault Timeout could be thrown inside operation get raised by fetch@Backend but it is not declared in the interface"]
    );
}

#[test]
fn called_procedures_are_inlined() {
    let helper = define(
        "helper",
        6,
        Statement::sequence([Statement::throw("Bad"), Statement::call("helper")]),
    );
    let program = service(
        &[],
        request_response("get", Statement::call("helper")),
        [helper],
    );

    assert_eq!(
        fault_flow_lines(&program),
        ["CODE QUALITY WARNING: fault Bad could be thrown inside operation get but it is not declared in the interface"]
    );
}

#[test]
fn handler_faults_escape_the_guarded_scope() {
    let body = Statement::sequence([
        InstallStatement::new()
            .handler("Bad", Statement::throw("Rethrown"))
            .into(),
        Statement::throw("Bad"),
    ]);
    let program = serve(&["Bad"], request_response("get", body));

    assert_eq!(
        fault_flow_lines(&program),
        [
            "CODE QUALITY WARNING: fault Bad is never thrown by operation get even if it is declared in the interface",
            "CODE QUALITY WARNING: fault Rethrown could be thrown inside operation get but it is not declared in the interface",
        ]
    );
}

#[test]
fn each_choice_branch_is_analyzed() {
    let choice = InputChoiceStatement::new()
        .branch(
            request_response("get", Statement::throw("Inner")),
            Statement::Nullprocess,
        )
        .branch(one_way("ping", 4), Statement::throw("Outer"));
    let port = input_port("Svc", 2)
        .operation(request_response_op("get", "string", "string", 3))
        .operation(one_way_op("ping", "void", 4));
    let program = Program::new([port.into(), main(choice.into())]);

    let report = FaultFlowVerifier::new(&program).validate();
    assert_eq!(report.thrown_faults("get"), Some(&["Inner".to_owned()][..]));
    assert_eq!(report.thrown_faults("ping"), Some(&["Outer".to_owned()][..]));
    assert_eq!(
        report.lines().collect::<Vec<_>>(),
        ["CODE QUALITY WARNING: fault Inner could be thrown inside operation get but it is not declared in the interface"]
    );
}

#[test]
fn repeated_choice_guard_analyzed_once() {
    let choice = InputChoiceStatement::new()
        .branch(
            request_response("get", Statement::throw("First")),
            Statement::Nullprocess,
        )
        .branch(
            request_response("get", Statement::throw("Second")),
            Statement::Nullprocess,
        );
    let program = serve(&[], choice.into());

    let report = FaultFlowVerifier::new(&program).validate();
    assert_eq!(report.thrown_faults("get"), Some(&["First".to_owned()][..]));
    assert_eq!(
        report.lines().collect::<Vec<_>>(),
        ["CODE QUALITY WARNING: fault First could be thrown inside operation get but it is not declared in the interface"]
    );
}

#[test]
fn findings_are_warnings() {
    let program = serve(&["Unused"], request_response("get", Statement::throw("Bad")));

    let report = FaultFlowVerifier::new(&program).validate();
    let diagnostics = report.diagnostics();
    assert!(!diagnostics.has_errors());
    assert_eq!(diagnostics.warning_count(), 2);
    assert!(report.lines().all(|line| line.starts_with(CODE_QUALITY_PREFIX)));
    insta::assert_snapshot!(diagnostics.render(), @r"
    main.ol:3: warning: fault Unused is never thrown by operation get even if it is declared in the interface
    main.ol:3: warning: fault Bad could be thrown inside operation get but it is not declared in the interface
    ");
}

#[test]
fn program_without_main() {
    let program = Program::new([define("helper", 1, Statement::throw("Bad"))]);

    let report = FaultFlowVerifier::new(&program).validate();
    assert!(report.is_empty());
    assert_eq!(report.thrown_faults("helper"), None);
}

#[test]
fn main_without_request_response_is_not_reported() {
    let program = serve(&[], Statement::throw("Bad"));

    let report = FaultFlowVerifier::new(&program).validate();
    assert!(report.is_empty());
    assert_eq!(report.thrown_faults("get"), None);
}
