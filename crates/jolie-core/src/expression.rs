//! Expressions and variable paths.

use serde::{Deserialize, Serialize};

use crate::{NativeType, ParsingContext, TypeDefinition};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Constant {
    Int(i32),
    Long(i64),
    Double(f64),
    Bool(bool),
    String(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperandType {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareOperator {
    Equal,
    NotEqual,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}

/// One step of an inline tree construction: `value << { .a = 1, .b << x, .c -> y }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InlineTreeOperation {
    Assign {
        path: VariablePath,
        expression: Expression,
    },
    DeepCopy {
        path: VariablePath,
        expression: Expression,
    },
    PointsTo {
        path: VariablePath,
        target: VariablePath,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expression {
    Constant(Constant),
    Variable(VariablePath),
    Sum(Vec<(OperandType, Expression)>),
    Product(Vec<(OperandType, Expression)>),
    Or(Vec<Expression>),
    And(Vec<Expression>),
    Not(Box<Expression>),
    Compare {
        operator: CompareOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    /// `#path`
    VectorSize(VariablePath),
    /// `is_defined( path )` and friends.
    IsType(VariablePath),
    InstanceOf {
        expression: Box<Expression>,
        target: TypeDefinition,
    },
    Cast {
        expression: Box<Expression>,
        target: NativeType,
    },
    InlineTree {
        root: Box<Expression>,
        operations: Vec<InlineTreeOperation>,
    },
    /// `new`
    Fresh,
    Void,
    /// A variable bound when a fault handler is installed.
    InstallFixedVariable(VariablePath),
}

impl Expression {
    pub fn string(value: impl Into<String>) -> Self {
        Expression::Constant(Constant::String(value.into()))
    }

    pub fn int(value: i32) -> Self {
        Expression::Constant(Constant::Int(value))
    }

    pub fn as_constant_string(&self) -> Option<&str> {
        match self {
            Expression::Constant(Constant::String(s)) => Some(s),
            _ => None,
        }
    }
}

/// Where a path is rooted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathType {
    /// Session-local state.
    #[default]
    Normal,
    /// `global.`
    Global,
    /// `csets.`: the correlation variables of the session.
    CorrelationSet,
}

/// `key[index]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathStep {
    pub key: Expression,
    #[serde(default)]
    pub index: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariablePath {
    #[serde(default)]
    pub ctx: ParsingContext,
    #[serde(default)]
    pub path_type: PathType,
    pub steps: Vec<PathStep>,
}

impl VariablePath {
    /// A normal path made of constant identifiers: `a.b.c`.
    pub fn of(keys: &[&str]) -> Self {
        Self {
            ctx: ParsingContext::default(),
            path_type: PathType::Normal,
            steps: keys
                .iter()
                .map(|k| PathStep {
                    key: Expression::string(*k),
                    index: None,
                })
                .collect(),
        }
    }

    pub fn with_type(mut self, path_type: PathType) -> Self {
        self.path_type = path_type;
        self
    }

    pub fn with_context(mut self, ctx: ParsingContext) -> Self {
        self.ctx = ctx;
        self
    }

    /// Append a step whose key is computed at runtime: `a.(expr)`.
    pub fn dynamic_step(mut self, key: Expression) -> Self {
        self.steps.push(PathStep { key, index: None });
        self
    }

    pub fn is_global(&self) -> bool {
        self.path_type == PathType::Global
    }

    pub fn is_cset(&self) -> bool {
        self.path_type == PathType::CorrelationSet
    }

    /// Every key is a constant identifier and every index a constant integer.
    pub fn is_static(&self) -> bool {
        self.steps.iter().all(|step| {
            step.key.as_constant_string().is_some()
                && matches!(
                    step.index,
                    None | Some(Expression::Constant(Constant::Int(_)))
                )
        })
    }

    /// The first key, when it is a constant identifier.
    pub fn root_name(&self) -> Option<&str> {
        self.steps.first()?.key.as_constant_string()
    }

    /// Constant keys in order; `None` as soon as one key is dynamic.
    pub fn static_keys(&self) -> Option<Vec<&str>> {
        self.steps
            .iter()
            .map(|step| step.key.as_constant_string())
            .collect()
    }

    /// Structural comparison of two static paths (kind, keys and indexes),
    /// ignoring where they were written.
    pub fn same_path(&self, other: &VariablePath) -> bool {
        self.path_type == other.path_type
            && self.steps.len() == other.steps.len()
            && self
                .steps
                .iter()
                .zip(&other.steps)
                .all(|(a, b)| a.key == b.key && a.index == b.index)
    }
}
