//! Top-level declarations and the program root.

use serde::{Deserialize, Serialize};

use crate::{
    InputPortInfo, InterfaceDefinition, OutputPortInfo, ParsingContext, Statement, TypeDefinition,
    VariablePath,
};

/// Name of the entry procedure.
pub const MAIN_PROCEDURE: &str = "main";
/// Name of the procedure run once before `main`.
pub const INIT_PROCEDURE: &str = "init";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    #[serde(default)]
    pub ctx: ParsingContext,
    pub children: Vec<Declaration>,
}

impl Program {
    pub fn new(children: impl IntoIterator<Item = Declaration>) -> Self {
        Self {
            ctx: ParsingContext::default(),
            children: children.into_iter().collect(),
        }
    }

    /// Procedures in document order.
    pub fn procedures(&self) -> impl Iterator<Item = &DefinitionNode> {
        self.children.iter().filter_map(|d| match d {
            Declaration::Procedure(p) => Some(p),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Declaration {
    Type(TypeDefinition),
    Interface(InterfaceDefinition),
    InputPort(InputPortInfo),
    OutputPort(OutputPortInfo),
    Execution(ExecutionInfo),
    CorrelationSet(CorrelationSetInfo),
    Procedure(DefinitionNode),
    Courier(CourierDefinition),
    EmbeddedService(EmbeddedServiceNode),
}

impl From<TypeDefinition> for Declaration {
    fn from(value: TypeDefinition) -> Self {
        Declaration::Type(value)
    }
}

impl From<InterfaceDefinition> for Declaration {
    fn from(value: InterfaceDefinition) -> Self {
        Declaration::Interface(value)
    }
}

impl From<InputPortInfo> for Declaration {
    fn from(value: InputPortInfo) -> Self {
        Declaration::InputPort(value)
    }
}

impl From<OutputPortInfo> for Declaration {
    fn from(value: OutputPortInfo) -> Self {
        Declaration::OutputPort(value)
    }
}

impl From<ExecutionInfo> for Declaration {
    fn from(value: ExecutionInfo) -> Self {
        Declaration::Execution(value)
    }
}

impl From<CorrelationSetInfo> for Declaration {
    fn from(value: CorrelationSetInfo) -> Self {
        Declaration::CorrelationSet(value)
    }
}

impl From<DefinitionNode> for Declaration {
    fn from(value: DefinitionNode) -> Self {
        Declaration::Procedure(value)
    }
}

impl From<CourierDefinition> for Declaration {
    fn from(value: CourierDefinition) -> Self {
        Declaration::Courier(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    /// One session, started when the program starts.
    #[default]
    Single,
    /// One session at a time, each started by a message.
    Sequential,
    /// Any number of sessions, each started by a message.
    Concurrent,
}

impl ExecutionMode {
    pub fn is_single(self) -> bool {
        self == ExecutionMode::Single
    }
}

/// `execution { concurrent }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionInfo {
    #[serde(default)]
    pub ctx: ParsingContext,
    pub mode: ExecutionMode,
}

impl ExecutionInfo {
    pub fn new(mode: ExecutionMode) -> Self {
        Self {
            ctx: ParsingContext::default(),
            mode,
        }
    }
}

/// `define id { body }`, including `main` and `init`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefinitionNode {
    #[serde(default)]
    pub ctx: ParsingContext,
    pub id: String,
    pub body: Statement,
}

impl DefinitionNode {
    pub fn new(id: impl Into<String>, body: Statement) -> Self {
        Self {
            ctx: ParsingContext::default(),
            id: id.into(),
            body,
        }
    }

    pub fn main(body: Statement) -> Self {
        Self::new(MAIN_PROCEDURE, body)
    }

    pub fn with_context(mut self, ctx: ParsingContext) -> Self {
        self.ctx = ctx;
        self
    }

    pub fn is_main(&self) -> bool {
        self.id == MAIN_PROCEDURE
    }

    pub fn is_init(&self) -> bool {
        self.id == INIT_PROCEDURE
    }
}

/// `courier InputPort { body }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourierDefinition {
    #[serde(default)]
    pub ctx: ParsingContext,
    pub input_port_name: String,
    pub body: Statement,
}

impl CourierDefinition {
    pub fn new(input_port_name: impl Into<String>, body: Statement) -> Self {
        Self {
            ctx: ParsingContext::default(),
            input_port_name: input_port_name.into(),
            body,
        }
    }
}

/// `embedded { Jolie: "service.ol" in Port }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedServiceNode {
    #[serde(default)]
    pub ctx: ParsingContext,
    pub service_type: String,
    pub service_path: String,
    #[serde(default)]
    pub port_id: Option<String>,
}

/// `with( GuardType ) path`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationAliasInfo {
    pub guard_name: String,
    pub path: VariablePath,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationVariableInfo {
    pub path: VariablePath,
    #[serde(default)]
    pub aliases: Vec<CorrelationAliasInfo>,
}

impl CorrelationVariableInfo {
    pub fn new(path: VariablePath) -> Self {
        Self {
            path,
            aliases: Vec::new(),
        }
    }

    pub fn alias(mut self, guard_name: impl Into<String>, path: VariablePath) -> Self {
        self.aliases.push(CorrelationAliasInfo {
            guard_name: guard_name.into(),
            path,
        });
        self
    }
}

/// `cset { var: Guard.path Other.path }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationSetInfo {
    #[serde(default)]
    pub ctx: ParsingContext,
    pub variables: Vec<CorrelationVariableInfo>,
}

impl CorrelationSetInfo {
    pub fn new(variables: impl IntoIterator<Item = CorrelationVariableInfo>) -> Self {
        Self {
            ctx: ParsingContext::default(),
            variables: variables.into_iter().collect(),
        }
    }

    pub fn with_context(mut self, ctx: ParsingContext) -> Self {
        self.ctx = ctx;
        self
    }
}
