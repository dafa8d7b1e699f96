//! Files, nodes, declarations, and symbols as recorded by the front end.

use serde::Serialize;
use smallvec::SmallVec;
use tscpp_common::SourceSpan;

use crate::types::TypeId;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct FileId(pub u32);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct NodeId(pub u32);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct DeclId(pub u32);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct SymbolId(pub u32);

/// Where a source file comes from.
///
/// | Origin | Meaning |
/// |--------|---------|
/// | `User` | part of the compiled project |
/// | `Lib` | bundled default library (`lib.es*.d.ts`) |
/// | `DomLib` | bundled DOM library, ignored when attributing namespaces |
/// | `NodeTypes` | `@types/node`, the modeled Node.js surface |
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum FileOrigin {
    User,
    Lib,
    DomLib,
    NodeTypes,
}

#[derive(Clone, Debug, Serialize)]
pub struct SourceFile {
    pub name: String,
    /// True for `.d.ts` files.
    pub is_declaration: bool,
    pub origin: FileOrigin,
    /// Logical namespace derived from the file's path under the source root.
    pub namespace: Option<String>,
}

/// Kind of a reference site inside a function body.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum NodeKind {
    Identifier,
    This,
    Expression,
}

/// A reference site. The capture analysis and the expression-typing entry
/// points both work on nodes.
#[derive(Clone, Debug)]
pub struct Node {
    pub file: FileId,
    pub span: SourceSpan,
    /// Source text of the node, carried for diagnostics.
    pub text: String,
    pub kind: NodeKind,
    pub symbol: Option<SymbolId>,
    /// True when this identifier names a property on the right side of a
    /// member access.
    pub is_property_name: bool,
    /// Innermost function-like declaration containing this node.
    pub enclosing: Option<DeclId>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum DeclKind {
    Variable,
    Property,
    PropertySignature,
    Parameter,
    Method,
    MethodSignature,
    Function,
    FunctionExpression,
    Arrow,
    FunctionTypeNode,
    Class,
    Interface,
    Constructor,
    GetAccessor,
    SetAccessor,
    LiteralType,
    ImportSpecifier,
}

impl DeclKind {
    /// Declarations that bind a value slot. A function type reaching such a
    /// slot is stored as a functor, not a plain function.
    pub fn binds_value_slot(self) -> bool {
        matches!(
            self,
            DeclKind::Variable
                | DeclKind::Property
                | DeclKind::PropertySignature
                | DeclKind::Parameter
        )
    }

    pub fn is_property_like(self) -> bool {
        matches!(self, DeclKind::Property | DeclKind::PropertySignature)
    }

    pub fn is_method_like(self) -> bool {
        matches!(self, DeclKind::Method | DeclKind::MethodSignature)
    }

    /// Function-like declarations where `this` is the receiver rather than
    /// a lexical capture.
    pub fn has_own_receiver(self) -> bool {
        matches!(
            self,
            DeclKind::Constructor
                | DeclKind::Method
                | DeclKind::GetAccessor
                | DeclKind::SetAccessor
        )
    }

    /// Declaration kinds that are always fine to reference from a nested
    /// function body.
    pub fn is_freely_referable(self) -> bool {
        matches!(
            self,
            DeclKind::Class
                | DeclKind::Function
                | DeclKind::Property
                | DeclKind::Method
                | DeclKind::LiteralType
        )
    }
}

#[derive(Clone, Debug)]
pub struct Declaration {
    pub kind: DeclKind,
    pub name: String,
    pub file: FileId,
    pub span: SourceSpan,
    /// Source text of the declaration, carried for diagnostics.
    pub text: String,
    pub is_static: bool,
    pub has_question_token: bool,
    /// Rest parameter (`...args`).
    pub is_rest: bool,
    /// Declared directly at the top level of a source file.
    pub is_top_level: bool,
    pub leading_comment: Option<String>,
    /// Explicit type annotation, when written.
    pub declared_type: Option<TypeId>,
    /// The checker's type of the declared entity itself. Used when the
    /// declaration is not a value binding (functions, classes, methods).
    pub self_type: Option<TypeId>,
    pub initializer: Option<NodeId>,
    /// Innermost enclosing function-like declaration.
    pub enclosing: Option<DeclId>,
    /// Type of the containing class/interface, for static-member inference.
    pub parent_type: Option<TypeId>,
    /// For function-like declarations: identifier and `this` reference
    /// sites collected from the body.
    pub body: Vec<NodeId>,
}

impl Declaration {
    pub fn has_type_node(&self) -> bool {
        self.declared_type.is_some()
    }
}

#[derive(Clone, Debug)]
pub struct Symbol {
    pub name: String,
    pub declarations: SmallVec<[DeclId; 1]>,
    pub value_declaration: Option<DeclId>,
    /// The symbol's type independent of location. Location-dependent
    /// narrowing is recorded separately in the index.
    pub typ: Option<TypeId>,
}
