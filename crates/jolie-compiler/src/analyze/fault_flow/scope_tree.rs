//! Arena of fault-handling scopes.
//!
//! Parents own their children by index; the parent link is only used to
//! find where a handler body is attached and where resolved faults go.

use indexmap::IndexMap;

use jolie_core::DEFAULT_HANDLER_NAME;

pub type ScopeId = usize;

/// A fault that may leave a scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThrownFault {
    pub name: String,
    /// `operation@port` when the fault comes from a called operation.
    pub origin: Option<String>,
}

impl ThrownFault {
    pub fn new(name: impl Into<String>, origin: Option<String>) -> Self {
        Self {
            name: name.into(),
            origin,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaughtFault {
    Named(String),
    /// The `default` handler.
    CatchAll,
}

#[derive(Debug, Default)]
struct Scope {
    parent: Option<ScopeId>,
    children: Vec<ScopeId>,
    thrown: IndexMap<String, ThrownFault>,
    caught: Vec<CaughtFault>,
}

#[derive(Debug, Default)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
}

impl ScopeTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_root(&mut self) -> ScopeId {
        self.scopes.push(Scope::default());
        self.scopes.len() - 1
    }

    pub fn add_child(&mut self, parent: ScopeId) -> ScopeId {
        let id = self.scopes.len();
        self.scopes.push(Scope {
            parent: Some(parent),
            ..Scope::default()
        });
        self.scopes[parent].children.push(id);
        id
    }

    pub fn parent(&self, id: ScopeId) -> Option<ScopeId> {
        self.scopes[id].parent
    }

    /// The first fault recorded under a name is kept.
    pub fn throw(&mut self, id: ScopeId, fault: ThrownFault) {
        self.scopes[id]
            .thrown
            .entry(fault.name.clone())
            .or_insert(fault);
    }

    pub fn catch(&mut self, id: ScopeId, name: &str) {
        let caught = if name == DEFAULT_HANDLER_NAME {
            CaughtFault::CatchAll
        } else {
            CaughtFault::Named(name.to_owned())
        };
        self.scopes[id].caught.push(caught);
    }

    pub fn thrown(&self, id: ScopeId) -> &IndexMap<String, ThrownFault> {
        &self.scopes[id].thrown
    }

    /// Propagate faults bottom-up through the subtree rooted at `id`.
    ///
    /// Each scope first receives what its children let through, then drops
    /// what it catches, then hands the rest to its parent.
    pub fn resolve(&mut self, id: ScopeId) {
        let children = self.scopes[id].children.clone();
        for child in children {
            self.resolve(child);
        }

        let scope = &mut self.scopes[id];
        if scope.caught.contains(&CaughtFault::CatchAll) {
            scope.thrown.clear();
        } else {
            let caught = &scope.caught;
            scope.thrown.retain(|name, _| {
                !caught
                    .iter()
                    .any(|c| matches!(c, CaughtFault::Named(n) if n == name))
            });
        }

        let Some(parent) = scope.parent else {
            return;
        };
        let escaping: Vec<ThrownFault> = scope.thrown.values().cloned().collect();
        for fault in escaping {
            self.throw(parent, fault);
        }
    }
}
