//! Checks on top-level declarations: types, ports, procedures and
//! correlation sets.

use std::collections::HashSet;

use jolie_core::{
    CorrelationSetInfo, DefinitionNode, InputPortInfo, OperationDeclaration, OutputPortInfo,
    ParsingContext, Statement, TypeDefinition, VariablePath,
};

use super::SemanticVerifier;
use crate::analyze::correlation::display_path;
use crate::diagnostics::DiagnosticKind;

impl<'a> SemanticVerifier<'a> {
    /// First declaration of a name wins; later ones are compared after the traversal.
    pub(super) fn register_type(&mut self, def: &'a TypeDefinition) {
        if self.types.contains_key(def.id()) {
            self.type_redeclarations.push(def);
        } else {
            self.types.insert(def.id().to_owned(), def.clone());
        }
    }

    pub(super) fn check_type_definition(&mut self, def: &'a TypeDefinition) {
        let cardinality = def.cardinality();
        if cardinality.min < 0 {
            self.diag
                .report(DiagnosticKind::InvalidCardinality, def.context())
                .message(format!(
                    "type `{}` has a negative minimum ({})",
                    def.id(),
                    cardinality.min
                ))
                .emit();
        }
        if cardinality.max < 0 {
            self.diag
                .report(DiagnosticKind::InvalidCardinality, def.context())
                .message(format!(
                    "type `{}` has a negative maximum ({})",
                    def.id(),
                    cardinality.max
                ))
                .emit();
        }

        if let TypeDefinition::Link(link) = def {
            let owner = self.current_type.unwrap_or(&link.id);
            self.links.push((link, owner));
        }
    }

    pub(super) fn check_input_port(&mut self, port: &'a InputPortInfo) {
        match self.input_ports.get(port.id.as_str()) {
            Some(first) => {
                let first_ctx = &first.ctx;
                self.diag
                    .report(DiagnosticKind::DuplicatePortDefinition, &port.ctx)
                    .message(format!("input port `{}`", port.id))
                    .related_to("first defined here", first_ctx)
                    .emit();
            }
            None => {
                self.input_ports.insert(&port.id, port);
            }
        }

        let mut seen = HashSet::new();
        for op in port.all_operations() {
            if !seen.insert(op.id()) {
                self.diag
                    .report(DiagnosticKind::DuplicateOperationInPort, op.context())
                    .message(op.id())
                    .hint(format!("in input port `{}`", port.id))
                    .emit();
                continue;
            }
            self.check_operation_types(op);
            self.register_operation(op);
        }

        for item in &port.aggregation_list {
            for output_port in &item.output_ports {
                if self.output_ports.contains_key(output_port.as_str()) {
                    continue;
                }
                self.diag
                    .report(DiagnosticKind::UndefinedAggregatedPort, &port.ctx)
                    .message(output_port)
                    .hint(format!("aggregated by input port `{}`", port.id))
                    .emit();
            }
        }
    }

    pub(super) fn check_output_port(&mut self, port: &'a OutputPortInfo) {
        match self.output_ports.get(port.id.as_str()) {
            Some(first) => {
                let first_ctx = &first.ctx;
                self.diag
                    .report(DiagnosticKind::DuplicatePortDefinition, &port.ctx)
                    .message(format!("output port `{}`", port.id))
                    .related_to("first defined here", first_ctx)
                    .emit();
            }
            None => {
                self.output_ports.insert(&port.id, port);
            }
        }
        self.encountered_assignment(&port.id);

        for op in port.all_operations() {
            self.check_operation_types(op);
        }
    }

    fn check_operation_types(&mut self, op: &'a OperationDeclaration) {
        self.check_type_exists(op, op.request_type());
        if let Some(rr) = op.as_request_response() {
            self.check_type_exists(op, &rr.response_type);
            for fault in rr.faults.values() {
                self.check_type_exists(op, fault);
            }
        }
    }

    fn check_type_exists(&mut self, op: &OperationDeclaration, def: &TypeDefinition) {
        if self.types.contains_key(def.id()) {
            return;
        }
        self.diag
            .report(DiagnosticKind::UnknownTypeReference, op.context())
            .message(def.id())
            .hint(format!("used by operation `{}`", op.id()))
            .emit();
    }

    fn register_operation(&mut self, op: &'a OperationDeclaration) {
        if self.operations.contains_key(op.id()) {
            self.operation_redeclarations.push(op);
            return;
        }
        self.operations.insert(op.id(), op);
        self.operations_by_request_type
            .entry(op.request_type().id().to_owned())
            .or_default()
            .push(op.id().to_owned());
    }

    pub(super) fn check_procedure(&mut self, def: &'a DefinitionNode) {
        if let Some(first) = self.procedures.get(def.id.as_str()) {
            let first_ctx = &first.ctx;
            self.diag
                .report(DiagnosticKind::DuplicateProcedureDefinition, &def.ctx)
                .message(&def.id)
                .related_to("first defined here", first_ctx)
                .emit();
            return;
        }
        self.procedures.insert(&def.id, def);

        if def.is_main() {
            self.main_defined = true;
            self.check_main_shape(def);
        }
    }

    /// Outside single mode every session starts by receiving a message.
    fn check_main_shape(&mut self, def: &DefinitionNode) {
        if self.execution_mode.is_single() || first_statement(&def.body).is_input() {
            return;
        }
        self.diag
            .report(DiagnosticKind::MainProcedureShapeInvalid, &def.ctx)
            .hint("start `main` with a one-way or request-response input, or a choice among them")
            .emit();
    }

    pub(super) fn check_correlation_set(&mut self, cset: &'a CorrelationSetInfo) {
        self.correlation_sets.push(cset);

        for (i, variable) in cset.variables.iter().enumerate() {
            if let Some(problem) = plain_path_problem(&variable.path) {
                self.diag
                    .report(
                        DiagnosticKind::InvalidPathUsage,
                        ctx_or(&variable.path.ctx, &cset.ctx),
                    )
                    .message(format!("correlation variable {problem}"))
                    .emit();
            }

            let duplicate = cset.variables[..i]
                .iter()
                .any(|other| other.path.same_path(&variable.path));
            if duplicate {
                self.diag
                    .report(
                        DiagnosticKind::DuplicateCorrelationVariable,
                        ctx_or(&variable.path.ctx, &cset.ctx),
                    )
                    .message(display_path(&variable.path))
                    .emit();
            }

            for alias in &variable.aliases {
                if let Some(problem) = plain_path_problem(&alias.path) {
                    self.diag
                        .report(
                            DiagnosticKind::InvalidPathUsage,
                            ctx_or(&alias.path.ctx, &cset.ctx),
                        )
                        .message(format!(
                            "correlation alias for `{}` {problem}",
                            alias.guard_name
                        ))
                        .emit();
                }
            }
        }
    }
}

/// The first statement executed by `body`, looking through nested sequences.
fn first_statement(body: &Statement) -> &Statement {
    match body {
        Statement::Sequence(children) => children.first().map_or(body, first_statement),
        other => other,
    }
}

/// Correlation variables and aliases are plain paths made of constant keys.
fn plain_path_problem(path: &VariablePath) -> Option<&'static str> {
    if path.is_global() {
        Some("must not be a global path")
    } else if path.is_cset() {
        Some("must not be a `csets` path")
    } else if !path.is_static() {
        Some("must be statically defined")
    } else {
        None
    }
}

fn ctx_or<'c>(ctx: &'c ParsingContext, fallback: &'c ParsingContext) -> &'c ParsingContext {
    if ctx.is_known() { ctx } else { fallback }
}
