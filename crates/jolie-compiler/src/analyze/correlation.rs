//! Correlation sets and the correlation function.
//!
//! A correlation set lists session variables; each alias binds one of them to
//! a path inside a message type (the guard). Every input operation whose
//! request type is a guard correlates through that set.

use indexmap::IndexMap;
use serde::Serialize;

use jolie_core::{CorrelationSetInfo, TypeMap, VariablePath};

use crate::diagnostics::{DiagnosticKind, Diagnostics};

use super::type_equiv::contains_path;

/// Index of a correlation set in declaration order.
pub type CorrelationSetId = usize;

/// One correlation variable and the message path that feeds it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationPair {
    pub session_path: VariablePath,
    pub message_path: VariablePath,
}

/// Which correlation variables each input operation fills, and from where.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CorrelationFunction {
    sets: Vec<CorrelationSetInfo>,
    pairs: IndexMap<String, Vec<CorrelationPair>>,
    operation_sets: IndexMap<String, CorrelationSetId>,
    set_operations: IndexMap<CorrelationSetId, Vec<String>>,
}

impl CorrelationFunction {
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Every declared correlation set, in declaration order.
    pub fn sets(&self) -> &[CorrelationSetInfo] {
        &self.sets
    }

    /// The pairs an operation fills, in variable order.
    pub fn pairs(&self, operation: &str) -> &[CorrelationPair] {
        self.pairs.get(operation).map_or(&[], Vec::as_slice)
    }

    pub fn correlation_set(&self, operation: &str) -> Option<&CorrelationSetInfo> {
        self.operation_sets
            .get(operation)
            .and_then(|id| self.sets.get(*id))
    }

    pub fn correlation_set_id(&self, operation: &str) -> Option<CorrelationSetId> {
        self.operation_sets.get(operation).copied()
    }

    /// Operations correlating through the set with the given id.
    pub fn operations(&self, set: CorrelationSetId) -> &[String] {
        self.set_operations.get(&set).map_or(&[], Vec::as_slice)
    }

    /// Operations that correlate, in the order they were bound.
    pub fn correlating_operations(&self) -> impl Iterator<Item = &str> {
        self.operation_sets.keys().map(String::as_str)
    }
}

/// Validates the collected correlation sets once all types and input
/// operations are known, and builds the correlation function.
pub(crate) struct CorrelationCheck<'a, 'd> {
    pub types: &'a TypeMap,
    /// Request type name to the input operations receiving it.
    pub operations_by_request_type: &'a IndexMap<String, Vec<String>>,
    pub diag: &'d mut Diagnostics,
}

impl CorrelationCheck<'_, '_> {
    pub fn run(mut self, sets: &[&CorrelationSetInfo]) -> CorrelationFunction {
        let operations_by_request_type = self.operations_by_request_type;
        let mut function = CorrelationFunction::default();

        for (id, cset) in sets.iter().copied().enumerate() {
            function.sets.push(cset.clone());

            let mut claimed: IndexMap<&str, Vec<CorrelationPair>> = IndexMap::new();
            for variable in &cset.variables {
                for alias in &variable.aliases {
                    self.check_alias(&alias.guard_name, &alias.path);

                    let Some(operations) = operations_by_request_type.get(&alias.guard_name) else {
                        continue;
                    };
                    for operation in operations {
                        claimed
                            .entry(operation.as_str())
                            .or_default()
                            .push(CorrelationPair {
                                session_path: variable.path.clone(),
                                message_path: alias.path.clone(),
                            });
                    }
                }
            }

            for (operation, pairs) in claimed {
                if function.operation_sets.contains_key(operation) {
                    self.diag
                        .report(DiagnosticKind::CorrelationSetConflict, &cset.ctx)
                        .message(operation)
                        .hint("each operation can correlate using only one correlation set")
                        .emit();
                    continue;
                }
                self.check_coverage(cset, operation, &pairs);

                function.operation_sets.insert(operation.to_owned(), id);
                function
                    .set_operations
                    .entry(id)
                    .or_default()
                    .push(operation.to_owned());
                function.pairs.insert(operation.to_owned(), pairs);
            }
        }

        function
    }

    fn check_alias(&mut self, guard_name: &str, path: &VariablePath) {
        let Some(guard) = self.types.get(guard_name) else {
            self.diag
                .report(DiagnosticKind::CorrelationAliasError, &path.ctx)
                .message(format!("type `{guard_name}` is not defined"))
                .emit();
            return;
        };
        // Dynamic alias paths are reported when the set is visited
        let Some(keys) = path.static_keys() else {
            return;
        };
        if !contains_path(self.types, guard, &keys) {
            self.diag
                .report(DiagnosticKind::CorrelationAliasError, &path.ctx)
                .message(format!(
                    "type `{guard_name}` does not contain the path `{}`",
                    keys.join(".")
                ))
                .emit();
        }
    }

    /// Exactly one alias per variable of the set.
    fn check_coverage(
        &mut self,
        cset: &CorrelationSetInfo,
        operation: &str,
        pairs: &[CorrelationPair],
    ) {
        let mut missing = Vec::new();
        for variable in &cset.variables {
            let count = pairs
                .iter()
                .filter(|pair| pair.session_path.same_path(&variable.path))
                .count();
            match count {
                0 => missing.push(display_path(&variable.path)),
                1 => {}
                _ => self
                    .diag
                    .report(DiagnosticKind::CorrelationAliasError, &variable.path.ctx)
                    .message(format!(
                        "variable `{}` has more than one alias for operation `{operation}`",
                        display_path(&variable.path)
                    ))
                    .emit(),
            }
        }

        if !missing.is_empty() {
            self.diag
                .report(DiagnosticKind::CorrelationAliasIncomplete, &cset.ctx)
                .message(operation)
                .hint(format!("missing: {}", missing.join(", ")))
                .emit();
        }
    }
}

pub(crate) fn display_path(path: &VariablePath) -> String {
    match path.static_keys() {
        Some(keys) => keys.join("."),
        None => "<dynamic>".to_owned(),
    }
}
