#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for Jolie programs.
//!
//! The tree is produced by the parser and consumed read-only by the
//! semantic verifiers and the interpreter:
//! - **Types**: message type declarations and the native type map
//! - **Ports**: operations, interfaces, input and output ports
//! - **Processes**: statements and expressions of the behaviour
//! - **Program**: top-level declarations

mod context;
mod expression;
mod port;
mod process;
mod program;
mod types;

pub use context::ParsingContext;
pub use expression::{
    CompareOperator, Constant, Expression, InlineTreeOperation, OperandType, PathStep, PathType,
    VariablePath,
};
pub use port::{
    AggregationItem, InputPortInfo, InterfaceDefinition, OneWayOperationDeclaration,
    OperationDeclaration, OperationType, OutputPortInfo, RequestResponseOperationDeclaration,
};
pub use process::{
    AssignOperator, CourierBranch, CourierChoiceStatement, CourierTarget, DEFAULT_HANDLER_NAME,
    DefinitionCallStatement, ForEachKind, InputChoiceStatement, InstallStatement,
    NotificationOperationStatement, OneWayOperationStatement, RequestResponseOperationStatement,
    SolicitResponseOperationStatement, Statement, StepKind,
};
pub use program::{
    CorrelationAliasInfo, CorrelationSetInfo, CorrelationVariableInfo, CourierDefinition,
    Declaration, DefinitionNode, EmbeddedServiceNode, ExecutionInfo, ExecutionMode,
    INIT_PROCEDURE, MAIN_PROCEDURE, Program,
};
pub use types::{
    Cardinality, NativeType, TypeChoiceDefinition, TypeDefinition, TypeDefinitionLink,
    TypeInlineDefinition, TypeMap, UNDEFINED_TYPE, native_type_map,
};

/// Decode a program handed over by the parser as JSON.
pub fn parse_program(json: &str) -> Result<Program, serde_json::Error> {
    serde_json::from_str(json)
}

/// Decode the type-declaration map handed over alongside a program.
pub fn parse_type_map(json: &str) -> Result<TypeMap, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod lib_tests;
