//! The nominal types computed by the source-language checker.

use serde::Serialize;

use crate::ast::{DeclId, SymbolId};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct TypeId(pub u32);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct SigId(pub u32);

/// A class (or constructor function) type.
#[derive(Clone, Debug)]
pub struct ClassType {
    pub symbol: SymbolId,
    /// The first class-category base type, when the class extends one.
    pub base: Option<TypeId>,
    pub type_params: Vec<TypeId>,
    pub type_args: Option<Vec<TypeId>>,
    /// True for construct-signature-bearing types: interfaces the source
    /// declares but the target models as classes with static members.
    pub is_constructor: bool,
}

/// A structural interface or object-literal type.
#[derive(Clone, Debug)]
pub struct InterfaceType {
    pub symbol: SymbolId,
    pub properties: Vec<SymbolId>,
}

/// A call signature.
#[derive(Clone, Debug)]
pub struct SignatureData {
    /// The function-like declaration this signature came from, when known.
    /// Signatures of function-typed parameters have none.
    pub declaration: Option<DeclId>,
    pub return_type: TypeId,
    pub parameters: Vec<SymbolId>,
    pub type_params: Vec<TypeId>,
    /// Type arguments substituted at an instantiated call site.
    pub type_args: Option<Vec<TypeId>>,
}

/// The checker's view of a type at some location.
#[derive(Clone, Debug)]
pub enum SourceType {
    NumberLiteral(f64),
    StringLiteral(String),
    BooleanLiteral(bool),
    Number,
    String,
    Boolean,
    Void,
    Never,
    Null,
    Undefined,
    Any,
    Unknown,
    Union(Vec<TypeId>),
    TypeParameter(String),
    Array(TypeId),
    Class(ClassType),
    Interface(InterfaceType),
    Function(Vec<SigId>),
    /// A namespace-style import (`import * as fs`).
    ModuleImports(SymbolId),
    /// Builtin singleton interfaces modeled as namespaces (`Math`, `JSON`).
    BuiltinInterface(SymbolId),
}

impl SourceType {
    pub fn is_number_literal(&self) -> bool {
        matches!(self, SourceType::NumberLiteral(_))
    }

    pub fn is_string_literal(&self) -> bool {
        matches!(self, SourceType::StringLiteral(_))
    }

    pub fn is_boolean_like(&self) -> bool {
        matches!(self, SourceType::Boolean | SourceType::BooleanLiteral(_))
    }

    pub fn is_union(&self) -> bool {
        matches!(self, SourceType::Union(_))
    }

    /// The symbol behind a named type, when there is one.
    pub fn symbol(&self) -> Option<SymbolId> {
        match self {
            SourceType::Class(c) => Some(c.symbol),
            SourceType::Interface(i) => Some(i.symbol),
            SourceType::ModuleImports(s) | SourceType::BuiltinInterface(s) => Some(*s),
            _ => None,
        }
    }
}
