//! Operations, interfaces and communication ports.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{ParsingContext, TypeDefinition};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    OneWay,
    RequestResponse,
}

impl OperationType {
    pub fn label(self) -> &'static str {
        match self {
            OperationType::OneWay => "one-way",
            OperationType::RequestResponse => "request-response",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationDeclaration {
    OneWay(OneWayOperationDeclaration),
    RequestResponse(RequestResponseOperationDeclaration),
}

impl OperationDeclaration {
    pub fn id(&self) -> &str {
        match self {
            OperationDeclaration::OneWay(op) => &op.id,
            OperationDeclaration::RequestResponse(op) => &op.id,
        }
    }

    pub fn context(&self) -> &ParsingContext {
        match self {
            OperationDeclaration::OneWay(op) => &op.ctx,
            OperationDeclaration::RequestResponse(op) => &op.ctx,
        }
    }

    pub fn operation_type(&self) -> OperationType {
        match self {
            OperationDeclaration::OneWay(_) => OperationType::OneWay,
            OperationDeclaration::RequestResponse(_) => OperationType::RequestResponse,
        }
    }

    pub fn request_type(&self) -> &TypeDefinition {
        match self {
            OperationDeclaration::OneWay(op) => &op.request_type,
            OperationDeclaration::RequestResponse(op) => &op.request_type,
        }
    }

    pub fn as_request_response(&self) -> Option<&RequestResponseOperationDeclaration> {
        match self {
            OperationDeclaration::RequestResponse(op) => Some(op),
            OperationDeclaration::OneWay(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneWayOperationDeclaration {
    #[serde(default)]
    pub ctx: ParsingContext,
    pub id: String,
    pub request_type: TypeDefinition,
}

impl OneWayOperationDeclaration {
    pub fn new(id: impl Into<String>, request_type: impl Into<String>) -> Self {
        Self {
            ctx: ParsingContext::default(),
            id: id.into(),
            request_type: TypeDefinition::named(request_type),
        }
    }
}

impl From<OneWayOperationDeclaration> for OperationDeclaration {
    fn from(value: OneWayOperationDeclaration) -> Self {
        OperationDeclaration::OneWay(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestResponseOperationDeclaration {
    #[serde(default)]
    pub ctx: ParsingContext,
    pub id: String,
    pub request_type: TypeDefinition,
    pub response_type: TypeDefinition,
    #[serde(default)]
    pub faults: IndexMap<String, TypeDefinition>,
}

impl RequestResponseOperationDeclaration {
    pub fn new(
        id: impl Into<String>,
        request_type: impl Into<String>,
        response_type: impl Into<String>,
    ) -> Self {
        Self {
            ctx: ParsingContext::default(),
            id: id.into(),
            request_type: TypeDefinition::named(request_type),
            response_type: TypeDefinition::named(response_type),
            faults: IndexMap::new(),
        }
    }

    /// Declare `throws name( type_name )`.
    pub fn fault(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.faults
            .insert(name.into(), TypeDefinition::named(type_name));
        self
    }
}

impl From<RequestResponseOperationDeclaration> for OperationDeclaration {
    fn from(value: RequestResponseOperationDeclaration) -> Self {
        OperationDeclaration::RequestResponse(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceDefinition {
    #[serde(default)]
    pub ctx: ParsingContext,
    pub name: String,
    #[serde(default)]
    pub operations: IndexMap<String, OperationDeclaration>,
}

impl InterfaceDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            ctx: ParsingContext::default(),
            name: name.into(),
            operations: IndexMap::new(),
        }
    }

    pub fn operation(mut self, op: impl Into<OperationDeclaration>) -> Self {
        let op = op.into();
        self.operations.insert(op.id().to_owned(), op);
        self
    }
}

/// `Aggregates: A, B with Extender`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationItem {
    pub output_ports: Vec<String>,
    #[serde(default)]
    pub interface_extender: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputPortInfo {
    #[serde(default)]
    pub ctx: ParsingContext,
    pub id: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub protocol: Option<String>,
    /// Operations listed directly under `OneWay:` / `RequestResponse:`.
    #[serde(default)]
    pub operations: Vec<OperationDeclaration>,
    #[serde(default)]
    pub interfaces: Vec<InterfaceDefinition>,
    #[serde(default)]
    pub aggregation_list: Vec<AggregationItem>,
}

impl InputPortInfo {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            ctx: ParsingContext::default(),
            id: id.into(),
            location: None,
            protocol: None,
            operations: Vec::new(),
            interfaces: Vec::new(),
            aggregation_list: Vec::new(),
        }
    }

    pub fn operation(mut self, op: impl Into<OperationDeclaration>) -> Self {
        self.operations.push(op.into());
        self
    }

    pub fn interface(mut self, interface: InterfaceDefinition) -> Self {
        self.interfaces.push(interface);
        self
    }

    pub fn aggregates(mut self, output_ports: &[&str]) -> Self {
        self.aggregation_list.push(AggregationItem {
            output_ports: output_ports.iter().map(|p| (*p).to_owned()).collect(),
            interface_extender: None,
        });
        self
    }

    /// Direct operations first, then the operations of each interface in order.
    pub fn all_operations(&self) -> impl Iterator<Item = &OperationDeclaration> {
        all_operations(&self.operations, &self.interfaces)
    }

    pub fn find_operation(&self, id: &str) -> Option<&OperationDeclaration> {
        self.all_operations().find(|op| op.id() == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputPortInfo {
    #[serde(default)]
    pub ctx: ParsingContext,
    pub id: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub protocol: Option<String>,
    #[serde(default)]
    pub operations: Vec<OperationDeclaration>,
    #[serde(default)]
    pub interfaces: Vec<InterfaceDefinition>,
}

impl OutputPortInfo {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            ctx: ParsingContext::default(),
            id: id.into(),
            location: None,
            protocol: None,
            operations: Vec::new(),
            interfaces: Vec::new(),
        }
    }

    pub fn operation(mut self, op: impl Into<OperationDeclaration>) -> Self {
        self.operations.push(op.into());
        self
    }

    pub fn interface(mut self, interface: InterfaceDefinition) -> Self {
        self.interfaces.push(interface);
        self
    }

    pub fn all_operations(&self) -> impl Iterator<Item = &OperationDeclaration> {
        all_operations(&self.operations, &self.interfaces)
    }

    pub fn find_operation(&self, id: &str) -> Option<&OperationDeclaration> {
        self.all_operations().find(|op| op.id() == id)
    }
}

fn all_operations<'a>(
    direct: &'a [OperationDeclaration],
    interfaces: &'a [InterfaceDefinition],
) -> impl Iterator<Item = &'a OperationDeclaration> {
    direct
        .iter()
        .chain(interfaces.iter().flat_map(|i| i.operations.values()))
}
