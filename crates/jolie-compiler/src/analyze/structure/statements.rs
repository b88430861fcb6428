//! Checks on behaviour: procedure calls, communication statements, input
//! choices, couriers and variable paths.

use std::collections::HashSet;

use jolie_core::{
    InputChoiceStatement, OperationType, ParsingContext, PathType, Statement, VariablePath,
};

use super::SemanticVerifier;
use crate::analyze::visitor::{Visitor, walk_statement};
use crate::diagnostics::DiagnosticKind;

impl<'a> SemanticVerifier<'a> {
    pub(super) fn check_statement(&mut self, stmt: &'a Statement) {
        match stmt {
            Statement::Call(call) => {
                if !self.procedure_names.contains(call.id.as_str()) {
                    self.diag
                        .report(DiagnosticKind::UndefinedProcedureCall, &call.ctx)
                        .message(&call.id)
                        .emit();
                }
            }
            Statement::OneWay(s) => {
                self.check_not_in_courier(&s.ctx);
                self.check_receiving_path(s.input_path.as_ref());
            }
            Statement::RequestResponse(s) => {
                self.check_not_in_courier(&s.ctx);
                self.check_receiving_path(s.input_path.as_ref());
            }
            Statement::Notification(s) => {
                self.check_output(&s.ctx, &s.id, &s.output_port_id, OperationType::OneWay);
            }
            Statement::SolicitResponse(s) => {
                self.check_output(
                    &s.ctx,
                    &s.id,
                    &s.output_port_id,
                    OperationType::RequestResponse,
                );
                // The reply may land anywhere, correlation variables included
                if let Some(path) = &s.input_path {
                    self.assigned(path);
                }
                return;
            }
            Statement::InputChoice(choice) => {
                self.check_guards(&choice.ctx, &[choice]);
            }
            Statement::ProvideUntil {
                ctx,
                provide,
                until,
            } => {
                if let (Statement::InputChoice(p), Statement::InputChoice(u)) =
                    (provide.as_ref(), until.as_ref())
                {
                    // Checked as one choice, so the branches are walked directly
                    self.check_guards(ctx, &[p, u]);
                    for (guard, body) in p.branches.iter().chain(&u.branches) {
                        self.visit_statement(guard);
                        self.visit_statement(body);
                    }
                    return;
                }
                self.diag
                    .report(DiagnosticKind::InvalidInputChoice, ctx)
                    .message("both sides of provide-until must be input choices")
                    .emit();
            }
            Statement::Assign { path, .. }
            | Statement::CompoundAssign { path, .. }
            | Statement::Step { path, .. } => self.assigned(path),
            Statement::Pointer { ctx, left, right } => {
                self.assigned(left);
                self.assigned(right);
                if right.is_cset() {
                    self.diag
                        .report(DiagnosticKind::InvalidPathUsage, ctx)
                        .message("a pointer cannot refer to a correlation variable")
                        .emit();
                }
            }
            Statement::DeepCopy { ctx, left, .. } => {
                self.assigned(left);
                if left.is_cset() {
                    self.diag
                        .report(DiagnosticKind::InvalidPathUsage, ctx)
                        .message("correlation variables cannot be the target of a deep copy")
                        .emit();
                }
            }
            Statement::Undef { ctx, path } => {
                self.assigned(path);
                if path.is_cset() {
                    self.diag
                        .report(DiagnosticKind::InvalidPathUsage, ctx)
                        .message("correlation variables cannot be undefined")
                        .emit();
                }
            }
            Statement::Run { ctx, .. } => {
                tracing::warn!("{ctx}: the run statement is experimental and unsupported");
            }
            Statement::CourierChoice(choice) => {
                for branch in &choice.branches {
                    let saved = self.courier_kind.replace(branch.operation_type);
                    if let Some(path) = &branch.input_path {
                        self.visit_variable_path(path);
                    }
                    if let Some(path) = &branch.output_path {
                        self.visit_variable_path(path);
                    }
                    self.visit_statement(&branch.body);
                    self.courier_kind = saved;
                }
                return;
            }
            Statement::NotificationForward {
                ctx,
                output_port_id,
                ..
            } => {
                self.check_forward(ctx, OperationType::OneWay, output_port_id.as_deref());
            }
            Statement::SolicitResponseForward {
                ctx,
                output_port_id,
                ..
            } => {
                self.check_forward(
                    ctx,
                    OperationType::RequestResponse,
                    output_port_id.as_deref(),
                );
            }
            _ => {}
        }
        walk_statement(self, stmt);
    }

    pub(super) fn check_variable_path(&mut self, path: &VariablePath) {
        if path.is_cset() && self.inside_init {
            self.diag
                .report(DiagnosticKind::InvalidPathUsage, &path.ctx)
                .message("correlation variables cannot be accessed in the init procedure")
                .emit();
        }

        if !path.steps.is_empty() && path.root_name().is_none() {
            let message = match path.path_type {
                PathType::Global => "the first key of a global path must be an identifier",
                PathType::CorrelationSet => "the first key of a `csets` path must be an identifier",
                PathType::Normal => "the first key of a path must be an identifier",
            };
            self.diag
                .report(DiagnosticKind::InvalidPathUsage, &path.ctx)
                .message(message)
                .emit();
        } else if path.is_cset() && !path.is_static() {
            self.diag
                .report(DiagnosticKind::InvalidPathUsage, &path.ctx)
                .message("correlation variable paths must be statically defined")
                .emit();
        }
    }

    fn assigned(&mut self, path: &VariablePath) {
        if let Some(name) = path.root_name() {
            self.encountered_assignment(name);
        }
    }

    fn check_receiving_path(&mut self, path: Option<&VariablePath>) {
        let Some(path) = path else {
            return;
        };
        self.assigned(path);
        if path.is_cset() {
            self.diag
                .report(DiagnosticKind::InvalidPathUsage, &path.ctx)
                .message("messages cannot be received into a correlation variable")
                .emit();
        }
    }

    /// Guards must be inputs, and no operation may be received by two branches.
    fn check_guards(&mut self, ctx: &ParsingContext, choices: &[&InputChoiceStatement]) {
        let mut seen = HashSet::new();
        for (guard, _) in choices.iter().flat_map(|c| &c.branches) {
            let guard_ctx = guard.context().unwrap_or(ctx);
            let Some(operation) = guard.input_operation() else {
                self.diag
                    .report(DiagnosticKind::InvalidInputChoice, guard_ctx)
                    .message("every branch of an input choice must start with an input")
                    .emit();
                continue;
            };
            if !seen.insert(operation) {
                self.diag
                    .report(DiagnosticKind::InvalidInputChoice, guard_ctx)
                    .message(format!(
                        "operation `{operation}` is received by more than one branch"
                    ))
                    .emit();
            }
        }
    }

    fn check_output(
        &mut self,
        ctx: &ParsingContext,
        operation: &str,
        port_id: &str,
        used_as: OperationType,
    ) {
        let Some(port) = self.output_ports.get(port_id).copied() else {
            self.diag
                .report(DiagnosticKind::UndefinedOutputPort, ctx)
                .message(port_id)
                .emit();
            return;
        };
        let Some(declared) = port.find_operation(operation) else {
            self.diag
                .report(DiagnosticKind::UndeclaredOperation, ctx)
                .message(operation)
                .hint(format!("output port `{port_id}`"))
                .emit();
            return;
        };
        let declared_as = declared.operation_type();
        if declared_as != used_as {
            self.diag
                .report(DiagnosticKind::OperationKindMismatch, ctx)
                .message(format!(
                    "operation `{operation}` is declared as {} in output port `{port_id}` but used as {}",
                    declared_as.label(),
                    used_as.label()
                ))
                .emit();
        }
    }

    fn check_not_in_courier(&mut self, ctx: &ParsingContext) {
        if self.courier_kind.is_some() {
            self.diag
                .report(DiagnosticKind::CourierContextError, ctx)
                .message("input statements are not allowed inside a courier")
                .emit();
        }
    }

    fn check_forward(
        &mut self,
        ctx: &ParsingContext,
        forward: OperationType,
        output_port_id: Option<&str>,
    ) {
        match self.courier_kind {
            None => {
                self.diag
                    .report(DiagnosticKind::CourierContextError, ctx)
                    .message(format!(
                        "{} forward used outside a courier",
                        forward.label()
                    ))
                    .emit();
            }
            Some(expected) if expected != forward => {
                self.diag
                    .report(DiagnosticKind::CourierContextError, ctx)
                    .message(format!(
                        "{} forward used in a {} courier branch",
                        forward.label(),
                        expected.label()
                    ))
                    .hint(format!("expected a {} forward", expected.label()))
                    .emit();
            }
            Some(_) => {}
        }

        let Some(port_id) = output_port_id else {
            return;
        };
        if !self.output_ports.contains_key(port_id) {
            self.diag
                .report(DiagnosticKind::UndefinedOutputPort, ctx)
                .message(port_id)
                .emit();
        }
    }
}
