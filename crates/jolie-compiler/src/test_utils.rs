//! Test utilities: compact program builders and verifier shortcuts.

use jolie_core::{
    Declaration, DefinitionCallStatement, DefinitionNode, ExecutionInfo, ExecutionMode,
    Expression, InputPortInfo, NotificationOperationStatement, OneWayOperationDeclaration,
    OneWayOperationStatement, OutputPortInfo, ParsingContext, PathType, Program,
    RequestResponseOperationDeclaration, RequestResponseOperationStatement,
    SolicitResponseOperationStatement, Statement, VariablePath, native_type_map,
};

use crate::{Config, Diagnostics, Error, FaultFlowVerifier, SemanticVerifier, Validated};

/// Source name used by every located node built here.
pub const SOURCE: &str = "main.ol";

pub fn at(line: u32) -> ParsingContext {
    ParsingContext::new(SOURCE, line)
}

pub fn path(keys: &[&str]) -> VariablePath {
    VariablePath::of(keys)
}

pub fn path_at(keys: &[&str], line: u32) -> VariablePath {
    VariablePath::of(keys).with_context(at(line))
}

pub fn cset_path(keys: &[&str], line: u32) -> VariablePath {
    path_at(keys, line).with_type(PathType::CorrelationSet)
}

pub fn input_port(id: &str, line: u32) -> InputPortInfo {
    let mut port = InputPortInfo::new(id);
    port.ctx = at(line);
    port
}

pub fn output_port(id: &str, line: u32) -> OutputPortInfo {
    let mut port = OutputPortInfo::new(id);
    port.ctx = at(line);
    port
}

pub fn one_way_op(id: &str, request: &str, line: u32) -> OneWayOperationDeclaration {
    let mut op = OneWayOperationDeclaration::new(id, request);
    op.ctx = at(line);
    op
}

pub fn request_response_op(
    id: &str,
    request: &str,
    response: &str,
    line: u32,
) -> RequestResponseOperationDeclaration {
    let mut op = RequestResponseOperationDeclaration::new(id, request, response);
    op.ctx = at(line);
    op
}

pub fn one_way(id: &str, line: u32) -> Statement {
    let mut s = OneWayOperationStatement::new(id);
    s.ctx = at(line);
    s.into()
}

pub fn request_response(id: &str, body: Statement) -> Statement {
    RequestResponseOperationStatement::new(id, body).into()
}

pub fn notify(id: &str, port: &str, line: u32) -> Statement {
    let mut s = NotificationOperationStatement::new(id, port);
    s.ctx = at(line);
    s.into()
}

pub fn solicit(id: &str, port: &str, line: u32) -> Statement {
    let mut s = SolicitResponseOperationStatement::new(id, port);
    s.ctx = at(line);
    s.into()
}

pub fn call(id: &str, line: u32) -> Statement {
    Statement::Call(DefinitionCallStatement {
        ctx: at(line),
        id: id.to_owned(),
    })
}

pub fn assign(path: VariablePath) -> Statement {
    Statement::assign(path, Expression::int(1))
}

pub fn main(body: Statement) -> Declaration {
    DefinitionNode::main(body).with_context(at(1)).into()
}

pub fn define(id: &str, line: u32, body: Statement) -> Declaration {
    DefinitionNode::new(id, body).with_context(at(line)).into()
}

pub fn execution(mode: ExecutionMode) -> Declaration {
    ExecutionInfo::new(mode).into()
}

pub fn verify(program: &Program) -> crate::Result<Validated> {
    verify_with(program, Config::default())
}

pub fn verify_with(program: &Program, config: Config) -> crate::Result<Validated> {
    SemanticVerifier::new(program, native_type_map(), config).validate()
}

pub fn expect_valid(program: &Program) -> Validated {
    match verify(program) {
        Ok(validated) => validated,
        Err(err) => panic!(
            "expected a valid program, got:\n{}",
            err.diagnostics().render()
        ),
    }
}

pub fn expect_invalid(program: &Program) -> Diagnostics {
    match verify(program) {
        Ok(_) => panic!("expected the program to be rejected"),
        Err(Error::SemanticError(diagnostics)) => diagnostics,
    }
}

/// Advisory lines produced by the fault-flow analysis.
pub fn fault_flow_lines(program: &Program) -> Vec<String> {
    FaultFlowVerifier::new(program).validate().lines().collect()
}
