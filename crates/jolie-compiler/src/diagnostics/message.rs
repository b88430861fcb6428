use jolie_core::ParsingContext;

/// Diagnostic kinds, grouped by the pass that reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Declarations
    DuplicatePortDefinition,
    DuplicateOperationInPort,
    DuplicateProcedureDefinition,
    UndefinedAggregatedPort,
    UndefinedInputPort,

    // Types
    UnknownTypeReference,
    InvalidCardinality,
    TypeEquivalenceMismatch,
    OperationSignatureMismatch,

    // Behaviour
    UndefinedProcedureCall,
    UndefinedOutputPort,
    UndeclaredOperation,
    OperationKindMismatch,
    InvalidInputChoice,
    InvalidPathUsage,
    CourierContextError,
    MainProcedureMissing,
    MainProcedureShapeInvalid,

    // Correlation sets
    DuplicateCorrelationVariable,
    CorrelationAliasError,
    CorrelationSetConflict,
    CorrelationAliasIncomplete,

    // Fault flow (advisory)
    UndeclaredFault,
    UnthrownFault,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::UndeclaredFault | Self::UnthrownFault => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Base message for this diagnostic kind, used when no custom message is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::DuplicatePortDefinition => "port is already defined",
            Self::DuplicateOperationInPort => "operation is declared more than once in this port",
            Self::DuplicateProcedureDefinition => "procedure is already defined",
            Self::UndefinedAggregatedPort => "aggregated output port is not defined",
            Self::UndefinedInputPort => "input port is not defined",

            Self::UnknownTypeReference => "unknown type",
            Self::InvalidCardinality => "invalid cardinality",
            Self::TypeEquivalenceMismatch => "type has already been defined with a different structure",
            Self::OperationSignatureMismatch => {
                "operation has already been declared with a different signature"
            }

            Self::UndefinedProcedureCall => "call to an undefined procedure",
            Self::UndefinedOutputPort => "output port is not defined",
            Self::UndeclaredOperation => "operation is not declared in the output port",
            Self::OperationKindMismatch => "operation kind does not match its declaration",
            Self::InvalidInputChoice => "invalid input choice",
            Self::InvalidPathUsage => "invalid path usage",
            Self::CourierContextError => "statement not allowed in this courier context",
            Self::MainProcedureMissing => "main procedure not defined",
            Self::MainProcedureShapeInvalid => {
                "the first statement of the main procedure must be an input"
            }

            Self::DuplicateCorrelationVariable => "duplicate correlation variable",
            Self::CorrelationAliasError => "invalid correlation alias",
            Self::CorrelationSetConflict => {
                "operation is specified on more than one correlation set"
            }
            Self::CorrelationAliasIncomplete => {
                "operation does not specify an alias for every correlation variable"
            }

            Self::UndeclaredFault => "fault could be thrown but it is not declared in the interface",
            Self::UnthrownFault => "declared fault is never thrown",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::DuplicatePortDefinition => "{} is already defined".to_string(),
            Self::DuplicateOperationInPort => {
                "operation `{}` is declared more than once in this port".to_string()
            }
            Self::DuplicateProcedureDefinition => "procedure `{}` is already defined".to_string(),
            Self::UndefinedAggregatedPort => {
                "aggregated output port `{}` is not defined".to_string()
            }
            Self::UndefinedInputPort => "input port `{}` is not defined".to_string(),

            Self::UnknownTypeReference => "unknown type `{}`".to_string(),
            Self::TypeEquivalenceMismatch => {
                "type `{}` has already been defined with a different structure".to_string()
            }
            Self::OperationSignatureMismatch => {
                "operation `{}` has already been declared with a different signature".to_string()
            }

            Self::UndefinedProcedureCall => "procedure `{}` is not defined".to_string(),
            Self::UndefinedOutputPort => "output port `{}` is not defined".to_string(),
            Self::UndeclaredOperation => {
                "operation `{}` is not declared in the output port".to_string()
            }

            Self::CorrelationSetConflict => {
                "operation `{}` is specified on more than one correlation set".to_string()
            }
            Self::CorrelationAliasIncomplete => {
                "operation `{}` does not specify an alias for every variable in the correlation set"
                    .to_string()
            }
            Self::DuplicateCorrelationVariable => {
                "correlation variable `{}` is declared more than once".to_string()
            }

            // Complete sentences supplied by the caller
            Self::OperationKindMismatch
            | Self::InvalidInputChoice
            | Self::InvalidPathUsage
            | Self::CourierContextError
            | Self::UndeclaredFault
            | Self::UnthrownFault => "{}".to_string(),

            // Standard pattern: fallback + context
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → returns `fallback_message()`
    /// - `Some(detail)` → returns `custom_message()` with `{}` replaced by detail
    pub fn message(&self, msg: Option<&str>) -> String {
        match msg {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub(crate) ctx: ParsingContext,
    pub(crate) message: String,
}

impl RelatedInfo {
    pub fn new(ctx: ParsingContext, message: impl Into<String>) -> Self {
        Self {
            ctx,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    /// Where the offending node was written; `None` when the problem
    /// belongs to the program as a whole or the parser recorded no position.
    pub(crate) ctx: Option<ParsingContext>,
    pub(crate) message: String,
    pub(crate) related: Vec<RelatedInfo>,
    pub(crate) hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn new(
        kind: DiagnosticKind,
        ctx: Option<ParsingContext>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            ctx: ctx.filter(ParsingContext::is_known),
            message: message.into(),
            related: Vec::new(),
            hints: Vec::new(),
        }
    }

    pub(crate) fn with_default_message(
        kind: DiagnosticKind,
        ctx: Option<ParsingContext>,
    ) -> Self {
        Self::new(kind, ctx, kind.fallback_message())
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn severity(&self) -> Severity {
        self.kind.default_severity()
    }

    pub fn context(&self) -> Option<&ParsingContext> {
        self.ctx.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ctx) = &self.ctx {
            write!(f, "{}: ", ctx)?;
        }
        write!(f, "{}: {}", self.severity(), self.message)?;
        for related in &self.related {
            write!(f, " (related: {} at {})", related.message, related.ctx)?;
        }
        for hint in &self.hints {
            write!(f, " (hint: {})", hint)?;
        }
        Ok(())
    }
}
