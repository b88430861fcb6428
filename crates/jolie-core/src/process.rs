//! Behavioural statements (the process calculus).

use serde::{Deserialize, Serialize};

use crate::{Expression, OperationType, ParsingContext, VariablePath};

/// Handler name that catches every fault.
pub const DEFAULT_HANDLER_NAME: &str = "default";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    PreIncrement,
    PostIncrement,
    PreDecrement,
    PostDecrement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForEachKind {
    /// `foreach ( k : x )`
    SubNode,
    /// `for ( item in x )`
    ArrayItem,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Statement {
    Nullprocess,
    Sequence(Vec<Statement>),
    Parallel(Vec<Statement>),
    InputChoice(InputChoiceStatement),
    OneWay(OneWayOperationStatement),
    RequestResponse(RequestResponseOperationStatement),
    Notification(NotificationOperationStatement),
    SolicitResponse(SolicitResponseOperationStatement),
    Assign {
        ctx: ParsingContext,
        path: VariablePath,
        expression: Expression,
    },
    CompoundAssign {
        ctx: ParsingContext,
        operator: AssignOperator,
        path: VariablePath,
        expression: Expression,
    },
    /// `left -> right`
    Pointer {
        ctx: ParsingContext,
        left: VariablePath,
        right: VariablePath,
    },
    /// `left << right`
    DeepCopy {
        ctx: ParsingContext,
        left: VariablePath,
        right: Expression,
    },
    Step {
        ctx: ParsingContext,
        kind: StepKind,
        path: VariablePath,
    },
    Undef {
        ctx: ParsingContext,
        path: VariablePath,
    },
    If {
        ctx: ParsingContext,
        branches: Vec<(Expression, Statement)>,
        else_branch: Option<Box<Statement>>,
    },
    While {
        ctx: ParsingContext,
        condition: Expression,
        body: Box<Statement>,
    },
    For {
        ctx: ParsingContext,
        init: Box<Statement>,
        condition: Expression,
        post: Box<Statement>,
        body: Box<Statement>,
    },
    ForEach {
        ctx: ParsingContext,
        kind: ForEachKind,
        key_path: VariablePath,
        target_path: VariablePath,
        body: Box<Statement>,
    },
    Call(DefinitionCallStatement),
    Scope {
        ctx: ParsingContext,
        id: String,
        body: Box<Statement>,
    },
    Install(InstallStatement),
    Throw {
        ctx: ParsingContext,
        id: String,
        expression: Option<Expression>,
    },
    Compensate {
        ctx: ParsingContext,
        id: String,
    },
    Exit,
    Run {
        ctx: ParsingContext,
        expression: Expression,
    },
    Synchronized {
        ctx: ParsingContext,
        id: String,
        body: Box<Statement>,
    },
    Spawn {
        ctx: ParsingContext,
        index_path: VariablePath,
        upper_bound: Expression,
        in_path: Option<VariablePath>,
        body: Box<Statement>,
    },
    CurrentHandler,
    LinkIn {
        ctx: ParsingContext,
        id: String,
    },
    LinkOut {
        ctx: ParsingContext,
        id: String,
    },
    ProvideUntil {
        ctx: ParsingContext,
        provide: Box<Statement>,
        until: Box<Statement>,
    },
    CourierChoice(CourierChoiceStatement),
    NotificationForward {
        ctx: ParsingContext,
        output_port_id: Option<String>,
        output_path: Option<VariablePath>,
    },
    SolicitResponseForward {
        ctx: ParsingContext,
        output_port_id: Option<String>,
        output_path: Option<VariablePath>,
        input_path: Option<VariablePath>,
    },
}

impl Statement {
    pub fn sequence(children: impl IntoIterator<Item = Statement>) -> Self {
        Statement::Sequence(children.into_iter().collect())
    }

    pub fn throw(id: impl Into<String>) -> Self {
        Statement::Throw {
            ctx: ParsingContext::default(),
            id: id.into(),
            expression: None,
        }
    }

    pub fn scope(id: impl Into<String>, body: Statement) -> Self {
        Statement::Scope {
            ctx: ParsingContext::default(),
            id: id.into(),
            body: Box::new(body),
        }
    }

    pub fn call(id: impl Into<String>) -> Self {
        Statement::Call(DefinitionCallStatement {
            ctx: ParsingContext::default(),
            id: id.into(),
        })
    }

    pub fn assign(path: VariablePath, expression: Expression) -> Self {
        Statement::Assign {
            ctx: ParsingContext::default(),
            path,
            expression,
        }
    }

    /// Name of the received operation when this is an input statement.
    pub fn input_operation(&self) -> Option<&str> {
        match self {
            Statement::OneWay(s) => Some(&s.id),
            Statement::RequestResponse(s) => Some(&s.id),
            _ => None,
        }
    }

    /// One-way input, request-response input, or a choice among them.
    pub fn is_input(&self) -> bool {
        matches!(
            self,
            Statement::OneWay(_) | Statement::RequestResponse(_) | Statement::InputChoice(_)
        )
    }

    pub fn context(&self) -> Option<&ParsingContext> {
        match self {
            Statement::Nullprocess
            | Statement::Exit
            | Statement::CurrentHandler
            | Statement::Sequence(_)
            | Statement::Parallel(_) => None,
            Statement::InputChoice(s) => Some(&s.ctx),
            Statement::OneWay(s) => Some(&s.ctx),
            Statement::RequestResponse(s) => Some(&s.ctx),
            Statement::Notification(s) => Some(&s.ctx),
            Statement::SolicitResponse(s) => Some(&s.ctx),
            Statement::Call(s) => Some(&s.ctx),
            Statement::Install(s) => Some(&s.ctx),
            Statement::CourierChoice(s) => Some(&s.ctx),
            Statement::Assign { ctx, .. }
            | Statement::CompoundAssign { ctx, .. }
            | Statement::Pointer { ctx, .. }
            | Statement::DeepCopy { ctx, .. }
            | Statement::Step { ctx, .. }
            | Statement::Undef { ctx, .. }
            | Statement::If { ctx, .. }
            | Statement::While { ctx, .. }
            | Statement::For { ctx, .. }
            | Statement::ForEach { ctx, .. }
            | Statement::Scope { ctx, .. }
            | Statement::Throw { ctx, .. }
            | Statement::Compensate { ctx, .. }
            | Statement::Run { ctx, .. }
            | Statement::Synchronized { ctx, .. }
            | Statement::Spawn { ctx, .. }
            | Statement::LinkIn { ctx, .. }
            | Statement::LinkOut { ctx, .. }
            | Statement::ProvideUntil { ctx, .. }
            | Statement::NotificationForward { ctx, .. }
            | Statement::SolicitResponseForward { ctx, .. } => Some(ctx),
        }
    }
}

/// `[ guard ] { body }` branches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputChoiceStatement {
    #[serde(default)]
    pub ctx: ParsingContext,
    pub branches: Vec<(Statement, Statement)>,
}

impl InputChoiceStatement {
    pub fn new() -> Self {
        Self {
            ctx: ParsingContext::default(),
            branches: Vec::new(),
        }
    }

    pub fn branch(mut self, guard: impl Into<Statement>, body: Statement) -> Self {
        self.branches.push((guard.into(), body));
        self
    }
}

impl Default for InputChoiceStatement {
    fn default() -> Self {
        Self::new()
    }
}

impl From<InputChoiceStatement> for Statement {
    fn from(value: InputChoiceStatement) -> Self {
        Statement::InputChoice(value)
    }
}

/// `op( x )`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneWayOperationStatement {
    #[serde(default)]
    pub ctx: ParsingContext,
    pub id: String,
    #[serde(default)]
    pub input_path: Option<VariablePath>,
}

impl OneWayOperationStatement {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            ctx: ParsingContext::default(),
            id: id.into(),
            input_path: None,
        }
    }

    pub fn receive_into(mut self, path: VariablePath) -> Self {
        self.input_path = Some(path);
        self
    }
}

impl From<OneWayOperationStatement> for Statement {
    fn from(value: OneWayOperationStatement) -> Self {
        Statement::OneWay(value)
    }
}

/// `op( x )( y ) { process }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestResponseOperationStatement {
    #[serde(default)]
    pub ctx: ParsingContext,
    pub id: String,
    #[serde(default)]
    pub input_path: Option<VariablePath>,
    #[serde(default)]
    pub output_expression: Option<Expression>,
    pub process: Box<Statement>,
}

impl RequestResponseOperationStatement {
    pub fn new(id: impl Into<String>, process: Statement) -> Self {
        Self {
            ctx: ParsingContext::default(),
            id: id.into(),
            input_path: None,
            output_expression: None,
            process: Box::new(process),
        }
    }

    pub fn receive_into(mut self, path: VariablePath) -> Self {
        self.input_path = Some(path);
        self
    }
}

impl From<RequestResponseOperationStatement> for Statement {
    fn from(value: RequestResponseOperationStatement) -> Self {
        Statement::RequestResponse(value)
    }
}

/// `op@Port( x )`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationOperationStatement {
    #[serde(default)]
    pub ctx: ParsingContext,
    pub id: String,
    pub output_port_id: String,
    #[serde(default)]
    pub output_expression: Option<Expression>,
}

impl NotificationOperationStatement {
    pub fn new(id: impl Into<String>, output_port_id: impl Into<String>) -> Self {
        Self {
            ctx: ParsingContext::default(),
            id: id.into(),
            output_port_id: output_port_id.into(),
            output_expression: None,
        }
    }
}

impl From<NotificationOperationStatement> for Statement {
    fn from(value: NotificationOperationStatement) -> Self {
        Statement::Notification(value)
    }
}

/// `op@Port( x )( y )`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolicitResponseOperationStatement {
    #[serde(default)]
    pub ctx: ParsingContext,
    pub id: String,
    pub output_port_id: String,
    #[serde(default)]
    pub output_expression: Option<Expression>,
    #[serde(default)]
    pub input_path: Option<VariablePath>,
}

impl SolicitResponseOperationStatement {
    pub fn new(id: impl Into<String>, output_port_id: impl Into<String>) -> Self {
        Self {
            ctx: ParsingContext::default(),
            id: id.into(),
            output_port_id: output_port_id.into(),
            output_expression: None,
            input_path: None,
        }
    }

    pub fn receive_into(mut self, path: VariablePath) -> Self {
        self.input_path = Some(path);
        self
    }
}

impl From<SolicitResponseOperationStatement> for Statement {
    fn from(value: SolicitResponseOperationStatement) -> Self {
        Statement::SolicitResponse(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefinitionCallStatement {
    #[serde(default)]
    pub ctx: ParsingContext,
    pub id: String,
}

/// `install( Fault => handler, default => handler )`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallStatement {
    #[serde(default)]
    pub ctx: ParsingContext,
    pub handlers: Vec<(String, Statement)>,
}

impl InstallStatement {
    pub fn new() -> Self {
        Self {
            ctx: ParsingContext::default(),
            handlers: Vec::new(),
        }
    }

    pub fn handler(mut self, fault: impl Into<String>, body: Statement) -> Self {
        self.handlers.push((fault.into(), body));
        self
    }
}

impl Default for InstallStatement {
    fn default() -> Self {
        Self::new()
    }
}

impl From<InstallStatement> for Statement {
    fn from(value: InstallStatement) -> Self {
        Statement::Install(value)
    }
}

/// What a courier branch listens on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourierTarget {
    /// `[ interface I( req ) ]`
    Interface(String),
    /// `[ op( req ) ]`
    Operation(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourierBranch {
    pub target: CourierTarget,
    pub operation_type: OperationType,
    #[serde(default)]
    pub input_path: Option<VariablePath>,
    #[serde(default)]
    pub output_path: Option<VariablePath>,
    pub body: Statement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourierChoiceStatement {
    #[serde(default)]
    pub ctx: ParsingContext,
    pub branches: Vec<CourierBranch>,
}

impl CourierChoiceStatement {
    pub fn new() -> Self {
        Self {
            ctx: ParsingContext::default(),
            branches: Vec::new(),
        }
    }

    pub fn branch(
        mut self,
        target: CourierTarget,
        operation_type: OperationType,
        body: Statement,
    ) -> Self {
        self.branches.push(CourierBranch {
            target,
            operation_type,
            input_path: None,
            output_path: None,
            body,
        });
        self
    }
}

impl Default for CourierChoiceStatement {
    fn default() -> Self {
        Self::new()
    }
}

impl From<CourierChoiceStatement> for Statement {
    fn from(value: CourierChoiceStatement) -> Self {
        Statement::CourierChoice(value)
    }
}
