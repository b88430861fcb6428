//! Message type declarations.
//!
//! Three shapes, mirroring the surface syntax:
//! - **Inline**: `type T: string { a: int  b*: T }`
//! - **Link**: `type T: U` (the target is resolved by name after parsing)
//! - **Choice**: `type T: A | B`

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::ParsingContext;

/// Name of the built-in type that accepts any value with any sub-tree.
pub const UNDEFINED_TYPE: &str = "undefined";

/// Type declarations by name, as handed over by the parser.
pub type TypeMap = IndexMap<String, TypeDefinition>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NativeType {
    Void,
    Bool,
    Int,
    Long,
    Double,
    String,
    Raw,
    Any,
}

impl NativeType {
    pub const ALL: [NativeType; 8] = [
        NativeType::Void,
        NativeType::Bool,
        NativeType::Int,
        NativeType::Long,
        NativeType::Double,
        NativeType::String,
        NativeType::Raw,
        NativeType::Any,
    ];

    pub fn id(self) -> &'static str {
        match self {
            NativeType::Void => "void",
            NativeType::Bool => "bool",
            NativeType::Int => "int",
            NativeType::Long => "long",
            NativeType::Double => "double",
            NativeType::String => "string",
            NativeType::Raw => "raw",
            NativeType::Any => "any",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.id() == id)
    }
}

impl fmt::Display for NativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Occurrence range of a node. Signed so that the parser can hand over
/// out-of-range values for the verifier to reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cardinality {
    pub min: i32,
    pub max: i32,
}

impl Cardinality {
    /// Upper bound used for `*`.
    pub const UNBOUNDED: i32 = i32::MAX;

    pub const ONE: Cardinality = Cardinality { min: 1, max: 1 };
    pub const OPTIONAL: Cardinality = Cardinality { min: 0, max: 1 };
    pub const ANY: Cardinality = Cardinality {
        min: 0,
        max: Self::UNBOUNDED,
    };

    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }
}

impl Default for Cardinality {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.max == Self::UNBOUNDED {
            write!(f, "[{},*]", self.min)
        } else {
            write!(f, "[{},{}]", self.min, self.max)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeDefinition {
    Inline(TypeInlineDefinition),
    Link(TypeDefinitionLink),
    Choice(TypeChoiceDefinition),
}

impl TypeDefinition {
    pub fn id(&self) -> &str {
        match self {
            TypeDefinition::Inline(t) => &t.id,
            TypeDefinition::Link(t) => &t.id,
            TypeDefinition::Choice(t) => &t.id,
        }
    }

    pub fn cardinality(&self) -> Cardinality {
        match self {
            TypeDefinition::Inline(t) => t.cardinality,
            TypeDefinition::Link(t) => t.cardinality,
            TypeDefinition::Choice(t) => t.cardinality,
        }
    }

    pub fn context(&self) -> &ParsingContext {
        match self {
            TypeDefinition::Inline(t) => &t.ctx,
            TypeDefinition::Link(t) => &t.ctx,
            TypeDefinition::Choice(t) => &t.ctx,
        }
    }

    /// Shorthand for a link named after its target, as used by operation
    /// signatures (`op( Request )( Response )`).
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        TypeDefinitionLink::new(name.clone(), name).into()
    }

    pub fn with_cardinality(mut self, cardinality: Cardinality) -> Self {
        match &mut self {
            TypeDefinition::Inline(t) => t.cardinality = cardinality,
            TypeDefinition::Link(t) => t.cardinality = cardinality,
            TypeDefinition::Choice(t) => t.cardinality = cardinality,
        }
        self
    }

    pub fn with_context(mut self, ctx: ParsingContext) -> Self {
        match &mut self {
            TypeDefinition::Inline(t) => t.ctx = ctx,
            TypeDefinition::Link(t) => t.ctx = ctx,
            TypeDefinition::Choice(t) => t.ctx = ctx,
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeInlineDefinition {
    #[serde(default)]
    pub ctx: ParsingContext,
    pub id: String,
    pub native_type: NativeType,
    #[serde(default)]
    pub cardinality: Cardinality,
    /// `None` when the declaration has no `{ ... }` block.
    #[serde(default)]
    pub sub_types: Option<IndexMap<String, TypeDefinition>>,
    /// `{ ? }`: any sub-tree is accepted.
    #[serde(default)]
    pub untyped_sub_types: bool,
}

impl TypeInlineDefinition {
    pub fn new(id: impl Into<String>, native_type: NativeType) -> Self {
        Self {
            ctx: ParsingContext::default(),
            id: id.into(),
            native_type,
            cardinality: Cardinality::ONE,
            sub_types: None,
            untyped_sub_types: false,
        }
    }

    /// Add a sub-type keyed by its own id.
    pub fn sub_type(mut self, def: impl Into<TypeDefinition>) -> Self {
        let def = def.into();
        self.sub_types
            .get_or_insert_with(IndexMap::new)
            .insert(def.id().to_owned(), def);
        self
    }

    pub fn untyped(mut self) -> Self {
        self.untyped_sub_types = true;
        self
    }

    pub fn has_sub_types(&self) -> bool {
        self.sub_types.as_ref().is_some_and(|s| !s.is_empty())
    }

    pub fn get_sub_type(&self, name: &str) -> Option<&TypeDefinition> {
        self.sub_types.as_ref()?.get(name)
    }

    pub fn sub_types(&self) -> impl Iterator<Item = (&str, &TypeDefinition)> {
        self.sub_types
            .iter()
            .flat_map(|s| s.iter().map(|(k, v)| (k.as_str(), v)))
    }
}

impl From<TypeInlineDefinition> for TypeDefinition {
    fn from(value: TypeInlineDefinition) -> Self {
        TypeDefinition::Inline(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDefinitionLink {
    #[serde(default)]
    pub ctx: ParsingContext,
    pub id: String,
    #[serde(default)]
    pub cardinality: Cardinality,
    pub linked_type_name: String,
}

impl TypeDefinitionLink {
    pub fn new(id: impl Into<String>, linked_type_name: impl Into<String>) -> Self {
        Self {
            ctx: ParsingContext::default(),
            id: id.into(),
            cardinality: Cardinality::ONE,
            linked_type_name: linked_type_name.into(),
        }
    }
}

impl From<TypeDefinitionLink> for TypeDefinition {
    fn from(value: TypeDefinitionLink) -> Self {
        TypeDefinition::Link(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeChoiceDefinition {
    #[serde(default)]
    pub ctx: ParsingContext,
    pub id: String,
    #[serde(default)]
    pub cardinality: Cardinality,
    pub left: Box<TypeDefinition>,
    pub right: Box<TypeDefinition>,
}

impl TypeChoiceDefinition {
    pub fn new(
        id: impl Into<String>,
        left: impl Into<TypeDefinition>,
        right: impl Into<TypeDefinition>,
    ) -> Self {
        Self {
            ctx: ParsingContext::default(),
            id: id.into(),
            cardinality: Cardinality::ONE,
            left: Box::new(left.into()),
            right: Box::new(right.into()),
        }
    }
}

impl From<TypeChoiceDefinition> for TypeDefinition {
    fn from(value: TypeChoiceDefinition) -> Self {
        TypeDefinition::Choice(value)
    }
}

/// The declarations every program can refer to without declaring them:
/// one `1..1` inline type per native type, plus `undefined`.
pub fn native_type_map() -> TypeMap {
    let mut map = TypeMap::new();
    for native in NativeType::ALL {
        map.insert(
            native.id().to_owned(),
            TypeInlineDefinition::new(native.id(), native).into(),
        );
    }
    map.insert(
        UNDEFINED_TYPE.to_owned(),
        TypeInlineDefinition::new(UNDEFINED_TYPE, NativeType::Any)
            .untyped()
            .into(),
    );
    map
}
