//! Structural verification.
//!
//! One document-order traversal registers ports, operations, types and
//! procedures, checking everything that can be checked in place. Checks that
//! need the whole program run afterwards, in a fixed order:
//!
//! 1. Type links are resolved against the complete type map.
//! 2. Redeclared types and operations are compared with their first
//!    declaration.
//! 3. Correlation sets are validated and the correlation function is built.
//! 4. The presence of `main` is checked.
//!
//! Problems never stop the traversal; every diagnostic is returned at once.

mod declarations;
mod statements;


use std::collections::HashSet;

use indexmap::IndexMap;

use jolie_core::{
    CorrelationSetInfo, CourierDefinition, Declaration, DefinitionNode, ExecutionMode,
    InputPortInfo, OperationDeclaration, OperationType, OutputPortInfo, Program, Statement,
    TypeDefinition, TypeDefinitionLink, TypeMap, VariablePath,
};

use crate::analyze::correlation::{CorrelationCheck, CorrelationFunction};
use crate::analyze::type_equiv::is_equivalent;
use crate::analyze::visitor::{
    Visitor, walk_courier, walk_declaration, walk_procedure, walk_type_definition,
    walk_variable_path,
};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::{Config, Error, Result};

/// What a successfully verified program hands to later stages.
#[derive(Debug, Clone, PartialEq)]
pub struct Validated {
    pub correlation_function: CorrelationFunction,
    pub execution_mode: ExecutionMode,
    /// Per top-level variable name: assigned at most once.
    pub is_constant: IndexMap<String, bool>,
}

/// Single-use structural verifier for one program.
pub struct SemanticVerifier<'a> {
    program: &'a Program,
    config: Config,
    diag: Diagnostics,

    /// Starts as the caller's map; top-level declarations are added on first sight.
    types: TypeMap,
    /// Owner of the type definition being visited, for link diagnostics.
    current_type: Option<&'a str>,
    links: Vec<(&'a TypeDefinitionLink, &'a str)>,
    type_redeclarations: Vec<&'a TypeDefinition>,

    input_ports: IndexMap<&'a str, &'a InputPortInfo>,
    output_ports: IndexMap<&'a str, &'a OutputPortInfo>,
    operations: IndexMap<&'a str, &'a OperationDeclaration>,
    operation_redeclarations: Vec<&'a OperationDeclaration>,
    operations_by_request_type: IndexMap<String, Vec<String>>,

    procedure_names: HashSet<&'a str>,
    procedures: IndexMap<&'a str, &'a DefinitionNode>,
    main_defined: bool,
    inside_init: bool,
    execution_mode: ExecutionMode,

    correlation_sets: Vec<&'a CorrelationSetInfo>,
    is_constant: IndexMap<String, bool>,
    courier_kind: Option<OperationType>,
}

impl<'a> SemanticVerifier<'a> {
    pub fn new(program: &'a Program, types: TypeMap, config: Config) -> Self {
        let procedure_names = program.procedures().map(|p| p.id.as_str()).collect();
        let execution_mode = program
            .children
            .iter()
            .filter_map(|d| match d {
                Declaration::Execution(info) => Some(info.mode),
                _ => None,
            })
            .last()
            .unwrap_or_default();

        Self {
            program,
            config,
            diag: Diagnostics::new(),
            types,
            current_type: None,
            links: Vec::new(),
            type_redeclarations: Vec::new(),
            input_ports: IndexMap::new(),
            output_ports: IndexMap::new(),
            operations: IndexMap::new(),
            operation_redeclarations: Vec::new(),
            operations_by_request_type: IndexMap::new(),
            procedure_names,
            procedures: IndexMap::new(),
            main_defined: false,
            inside_init: false,
            execution_mode,
            correlation_sets: Vec::new(),
            is_constant: IndexMap::new(),
            courier_kind: None,
        }
    }

    /// Run every check. Fails with all collected diagnostics if any is an error.
    pub fn validate(mut self) -> Result<Validated> {
        let program = self.program;
        self.visit_program(program);

        self.resolve_links();
        self.check_equivalences();
        let correlation_function = CorrelationCheck {
            types: &self.types,
            operations_by_request_type: &self.operations_by_request_type,
            diag: &mut self.diag,
        }
        .run(&self.correlation_sets);
        tracing::debug!(
            sets = self.correlation_sets.len(),
            "correlation sets processed"
        );

        if self.config.check_for_main && !self.main_defined {
            self.diag
                .report_unlocated(DiagnosticKind::MainProcedureMissing)
                .emit();
        }

        if self.diag.has_errors() {
            tracing::error!(
                "aborting: {} semantic errors found",
                self.diag.error_count()
            );
            for message in &self.diag {
                tracing::error!("{message}");
            }
            return Err(Error::SemanticError(self.diag));
        }

        Ok(Validated {
            correlation_function,
            execution_mode: self.execution_mode,
            is_constant: self.is_constant,
        })
    }

    fn resolve_links(&mut self) {
        for (link, owner) in &self.links {
            if self.types.contains_key(&link.linked_type_name) {
                continue;
            }
            self.diag
                .report(DiagnosticKind::UnknownTypeReference, &link.ctx)
                .message(&link.linked_type_name)
                .hint(format!("referenced by type `{owner}`"))
                .emit();
        }
        tracing::debug!(links = self.links.len(), "type links resolved");
    }

    fn check_equivalences(&mut self) {
        for later in &self.type_redeclarations {
            let Some(first) = self.types.get(later.id()) else {
                continue;
            };
            if is_equivalent(&self.types, first, later) {
                continue;
            }
            self.diag
                .report(DiagnosticKind::TypeEquivalenceMismatch, later.context())
                .message(later.id())
                .related_to("first defined here", first.context())
                .emit();
        }

        for later in &self.operation_redeclarations {
            let Some(first) = self.operations.get(later.id()) else {
                continue;
            };
            let divergent = signature_differences(&self.types, first, later);
            if divergent.is_empty() {
                continue;
            }
            self.diag
                .report(DiagnosticKind::OperationSignatureMismatch, later.context())
                .message(later.id())
                .related_to("first declared here", first.context())
                .hint(format!("differs in {}", divergent.join(", ")))
                .emit();
        }

        tracing::debug!(
            types = self.type_redeclarations.len(),
            operations = self.operation_redeclarations.len(),
            "redeclarations checked"
        );
    }

    /// Record an assignment to the top-level variable `name`.
    fn encountered_assignment(&mut self, name: &str) {
        match self.is_constant.get_mut(name) {
            Some(constant) => *constant = false,
            None => {
                self.is_constant.insert(name.to_owned(), true);
            }
        }
    }
}

/// The parts in which two same-named operation declarations disagree.
fn signature_differences(
    types: &TypeMap,
    first: &OperationDeclaration,
    later: &OperationDeclaration,
) -> Vec<&'static str> {
    let mut parts = Vec::new();
    if first.operation_type() != later.operation_type() {
        parts.push("kind");
    }
    if !is_equivalent(types, first.request_type(), later.request_type()) {
        parts.push("request type");
    }

    let (Some(a), Some(b)) = (first.as_request_response(), later.as_request_response()) else {
        return parts;
    };
    if !is_equivalent(types, &a.response_type, &b.response_type) {
        parts.push("response type");
    }
    let same_faults = a.faults.len() == b.faults.len()
        && a.faults.iter().all(|(name, fault)| {
            b.faults
                .get(name)
                .is_some_and(|other| is_equivalent(types, fault, other))
        });
    if !same_faults {
        parts.push("faults");
    }
    parts
}

impl<'a> Visitor<'a> for SemanticVerifier<'a> {
    fn visit_declaration(&mut self, decl: &'a Declaration) {
        match decl {
            Declaration::Type(def) => {
                self.register_type(def);
                self.current_type = Some(def.id());
                self.visit_type_definition(def);
                self.current_type = None;
            }
            _ => walk_declaration(self, decl),
        }
    }

    fn visit_type_definition(&mut self, def: &'a TypeDefinition) {
        self.check_type_definition(def);
        walk_type_definition(self, def);
    }

    fn visit_input_port(&mut self, port: &'a InputPortInfo) {
        self.check_input_port(port);
    }

    fn visit_output_port(&mut self, port: &'a OutputPortInfo) {
        self.check_output_port(port);
    }

    fn visit_correlation_set(&mut self, cset: &'a CorrelationSetInfo) {
        self.check_correlation_set(cset);
    }

    fn visit_procedure(&mut self, def: &'a DefinitionNode) {
        self.check_procedure(def);
        self.inside_init = def.is_init();
        walk_procedure(self, def);
        self.inside_init = false;
    }

    fn visit_courier(&mut self, courier: &'a CourierDefinition) {
        if !self.input_ports.contains_key(courier.input_port_name.as_str()) {
            self.diag
                .report(DiagnosticKind::UndefinedInputPort, &courier.ctx)
                .message(&courier.input_port_name)
                .emit();
        }
        walk_courier(self, courier);
    }

    fn visit_statement(&mut self, stmt: &'a Statement) {
        self.check_statement(stmt);
    }

    fn visit_variable_path(&mut self, path: &'a VariablePath) {
        self.check_variable_path(path);
        walk_variable_path(self, path);
    }
}
