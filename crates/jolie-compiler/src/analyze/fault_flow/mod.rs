//! Fault-flow analysis.
//!
//! Approximates which faults can escape each operation served by `main` and
//! compares them with the faults the operation declares. Findings are
//! advisory: they never make a program invalid.
//!
//! Every operation received directly by `main` gets its own tree of scopes.
//! `scope` blocks and request-response bodies open a child scope, `install`
//! marks faults as caught in the current scope, and procedure calls are
//! inlined at the call site.

mod scope_tree;

#[cfg(test)]
mod scope_tree_tests;
#[cfg(test)]
mod tests;

use indexmap::IndexMap;

use jolie_core::{
    Declaration, DefinitionNode, InputPortInfo, OperationDeclaration, OutputPortInfo, Program,
    SolicitResponseOperationStatement, Statement,
};

use crate::analyze::visitor::{Visitor, walk_statement};
use crate::diagnostics::{DiagnosticKind, Diagnostics};

pub use scope_tree::{CaughtFault, ScopeId, ScopeTree, ThrownFault};

/// Prefix of every advisory line.
pub const CODE_QUALITY_PREFIX: &str = "CODE QUALITY WARNING: ";

/// Advisory findings of the fault-flow analysis.
#[derive(Debug, Clone, Default)]
pub struct FaultFlowReport {
    diagnostics: Diagnostics,
    /// Faults that can escape each analyzed operation, in discovery order.
    thrown: IndexMap<String, Vec<String>>,
}

impl FaultFlowReport {
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Human-readable advisory lines.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.diagnostics
            .iter()
            .map(|d| format!("{CODE_QUALITY_PREFIX}{}", d.message()))
    }

    /// Faults that can escape `operation`, if it was analyzed.
    pub fn thrown_faults(&self, operation: &str) -> Option<&[String]> {
        self.thrown.get(operation).map(Vec::as_slice)
    }
}

/// One analyzed tree: the operation it serves, if known.
struct Root<'a> {
    operation: Option<&'a str>,
    scope: ScopeId,
}

pub struct FaultFlowVerifier<'a> {
    program: &'a Program,
    procedures: IndexMap<&'a str, &'a DefinitionNode>,
    input_ports: Vec<&'a InputPortInfo>,
    output_ports: IndexMap<&'a str, &'a OutputPortInfo>,
    tree: ScopeTree,
    current: ScopeId,
    /// Procedures being inlined, innermost last.
    inlining: Vec<&'a str>,
}

impl<'a> FaultFlowVerifier<'a> {
    pub fn new(program: &'a Program) -> Self {
        let mut procedures = IndexMap::new();
        for def in program.procedures().filter(|p| !p.is_main()) {
            procedures.entry(def.id.as_str()).or_insert(def);
        }

        let mut input_ports = Vec::new();
        let mut output_ports = IndexMap::new();
        for decl in &program.children {
            match decl {
                Declaration::InputPort(port) => input_ports.push(port),
                Declaration::OutputPort(port) => {
                    output_ports.entry(port.id.as_str()).or_insert(port);
                }
                _ => {}
            }
        }

        Self {
            program,
            procedures,
            input_ports,
            output_ports,
            tree: ScopeTree::new(),
            current: 0,
            inlining: Vec::new(),
        }
    }

    pub fn validate(mut self) -> FaultFlowReport {
        let mut report = FaultFlowReport::default();
        let program = self.program;
        let Some(main) = program.procedures().find(|p| p.is_main()) else {
            return report;
        };

        let roots = self.analyze_main(main);
        for root in &roots {
            self.tree.resolve(root.scope);
        }

        for root in &roots {
            let Some(operation) = root.operation else {
                continue;
            };
            let thrown = self.tree.thrown(root.scope);
            report
                .thrown
                .insert(operation.to_owned(), thrown.keys().cloned().collect());
            self.check_operation(operation, root.scope, &mut report.diagnostics);
        }

        for line in report.lines() {
            tracing::warn!("{line}");
        }
        report
    }

    fn analyze_main(&mut self, main: &'a DefinitionNode) -> Vec<Root<'a>> {
        match &main.body {
            Statement::InputChoice(choice) => {
                let mut roots: Vec<Root<'a>> = Vec::new();
                for (guard, body) in &choice.branches {
                    let operation = guard.input_operation();
                    // Only the first branch receiving an operation is analyzed
                    if operation.is_some() && roots.iter().any(|r| r.operation == operation) {
                        tracing::debug!(?operation, "skipping repeated input choice guard");
                        continue;
                    }
                    let scope = self.tree.add_root();
                    self.current = scope;
                    self.visit_statement(guard);
                    self.visit_statement(body);
                    roots.push(Root { operation, scope });
                }
                roots
            }
            body => {
                let scope = self.tree.add_root();
                self.current = scope;
                self.visit_statement(body);
                let operation = match body {
                    Statement::RequestResponse(s) => Some(s.id.as_str()),
                    _ => None,
                };
                vec![Root { operation, scope }]
            }
        }
    }

    fn check_operation(&self, operation: &str, scope: ScopeId, diag: &mut Diagnostics) {
        let declared = self
            .input_ports
            .iter()
            .find_map(|port| port.find_operation(operation))
            .and_then(OperationDeclaration::as_request_response);
        let Some(declared) = declared else {
            return;
        };
        let thrown = self.tree.thrown(scope);

        // Unused declared faults are only reported when something escapes
        if !thrown.is_empty() {
            for name in declared.faults.keys() {
                if thrown.contains_key(name) {
                    continue;
                }
                diag.report(DiagnosticKind::UnthrownFault, &declared.ctx)
                    .message(format!(
                        "fault {name} is never thrown by operation {operation} even if it is declared in the interface"
                    ))
                    .emit();
            }
        }

        for fault in thrown.values() {
            if declared.faults.contains_key(&fault.name) {
                continue;
            }
            let raised_by = fault
                .origin
                .as_ref()
                .map(|origin| format!(" raised by {origin}"))
                .unwrap_or_default();
            diag.report(DiagnosticKind::UndeclaredFault, &declared.ctx)
                .message(format!(
                    "fault {} could be thrown inside operation {operation}{raised_by} but it is not declared in the interface",
                    fault.name
                ))
                .emit();
        }
    }

    /// Run `f` with `scope` as the current scope.
    fn within(&mut self, scope: ScopeId, f: impl FnOnce(&mut Self)) {
        let saved = std::mem::replace(&mut self.current, scope);
        f(self);
        self.current = saved;
    }

    fn inline_call(&mut self, id: &str) {
        let Some(def) = self.procedures.get(id).copied() else {
            return;
        };
        if self.inlining.contains(&def.id.as_str()) {
            tracing::debug!("skipping recursive call to `{id}`");
            return;
        }
        self.inlining.push(&def.id);
        self.visit_statement(&def.body);
        self.inlining.pop();
    }

    /// A called operation's declared faults may reach the caller.
    fn solicit_response(&mut self, s: &SolicitResponseOperationStatement) {
        let Some(port) = self.output_ports.get(s.output_port_id.as_str()).copied() else {
            return;
        };
        let Some(op) = port
            .find_operation(&s.id)
            .and_then(OperationDeclaration::as_request_response)
        else {
            return;
        };
        let origin = format!("{}@{}", s.id, port.id);
        for name in op.faults.keys() {
            self.tree
                .throw(self.current, ThrownFault::new(name, Some(origin.clone())));
        }
    }
}

impl<'a> Visitor<'a> for FaultFlowVerifier<'a> {
    fn visit_statement(&mut self, stmt: &'a Statement) {
        match stmt {
            Statement::Throw { id, .. } => {
                self.tree.throw(self.current, ThrownFault::new(id, None));
            }
            Statement::Scope { body, .. } => {
                let child = self.tree.add_child(self.current);
                self.within(child, |this| this.visit_statement(body));
            }
            Statement::RequestResponse(s) => {
                let child = self.tree.add_child(self.current);
                self.within(child, |this| this.visit_statement(&s.process));
            }
            Statement::SolicitResponse(s) => self.solicit_response(s),
            Statement::Install(install) => {
                for (name, _) in &install.handlers {
                    self.tree.catch(self.current, name);
                }
                // A handler's own faults are not caught by the scope it guards
                let target = self.tree.parent(self.current).unwrap_or(self.current);
                for (_, handler) in &install.handlers {
                    let scope = self.tree.add_child(target);
                    self.within(scope, |this| this.visit_statement(handler));
                }
            }
            Statement::Call(call) => self.inline_call(&call.id),
            Statement::ProvideUntil { provide, until, .. } => {
                self.visit_statement(until);
                self.visit_statement(provide);
            }
            Statement::While { body, .. }
            | Statement::For { body, .. }
            | Statement::ForEach { body, .. }
            | Statement::Spawn { body, .. }
            | Statement::Synchronized { body, .. } => self.visit_statement(body),
            Statement::CourierChoice(_) => {}
            _ => walk_statement(self, stmt),
        }
    }
}
