//! The queryable store behind the oracle.
//!
//! `SourceIndex` owns every arena and answers the questions the resolver
//! asks: the type at a node, a symbol's declarations, a symbol's type at a
//! location, file ambience, and the enclosing-function chain used by the
//! capture analysis. The front end populates it through the `add_*`
//! builders; afterwards it is read-only.

use rustc_hash::FxHashMap;

use crate::ast::{DeclId, Declaration, FileId, FileOrigin, Node, NodeId, SourceFile, Symbol, SymbolId};
use crate::types::{SigId, SignatureData, SourceType, TypeId};

#[derive(Default)]
pub struct SourceIndex {
    files: Vec<SourceFile>,
    nodes: Vec<Node>,
    decls: Vec<Declaration>,
    symbols: Vec<Symbol>,
    types: Vec<SourceType>,
    signatures: Vec<SignatureData>,
    /// The checker's type at each expression/declaration site.
    node_types: FxHashMap<NodeId, TypeId>,
    /// Location-dependent symbol types (narrowing through unions).
    symbol_location_types: FxHashMap<(SymbolId, NodeId), TypeId>,
}

impl SourceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Builders (called by the front end and by test fixtures)
    // =========================================================================

    pub fn add_file(&mut self, file: SourceFile) -> FileId {
        self.files.push(file);
        FileId(self.files.len() as u32 - 1)
    }

    pub fn add_node(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() as u32 - 1)
    }

    pub fn add_decl(&mut self, decl: Declaration) -> DeclId {
        self.decls.push(decl);
        DeclId(self.decls.len() as u32 - 1)
    }

    pub fn add_symbol(&mut self, symbol: Symbol) -> SymbolId {
        self.symbols.push(symbol);
        SymbolId(self.symbols.len() as u32 - 1)
    }

    pub fn add_type(&mut self, ty: SourceType) -> TypeId {
        self.types.push(ty);
        TypeId(self.types.len() as u32 - 1)
    }

    pub fn add_signature(&mut self, sig: SignatureData) -> SigId {
        self.signatures.push(sig);
        SigId(self.signatures.len() as u32 - 1)
    }

    pub fn set_type_at(&mut self, node: NodeId, ty: TypeId) {
        self.node_types.insert(node, ty);
    }

    pub fn set_type_of_symbol_at(&mut self, symbol: SymbolId, node: NodeId, ty: TypeId) {
        self.symbol_location_types.insert((symbol, node), ty);
    }

    /// Patch a declaration after creation. Bodies and parent types are often
    /// only known once the surrounding construct has been indexed.
    pub fn decl_mut(&mut self, id: DeclId) -> &mut Declaration {
        &mut self.decls[id.0 as usize]
    }

    pub fn symbol_mut(&mut self, id: SymbolId) -> &mut Symbol {
        &mut self.symbols[id.0 as usize]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0 as usize]
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn file(&self, id: FileId) -> &SourceFile {
        &self.files[id.0 as usize]
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0 as usize]
    }

    pub fn decl(&self, id: DeclId) -> &Declaration {
        &self.decls[id.0 as usize]
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.0 as usize]
    }

    pub fn source_type(&self, id: TypeId) -> &SourceType {
        &self.types[id.0 as usize]
    }

    pub fn signature(&self, id: SigId) -> &SignatureData {
        &self.signatures[id.0 as usize]
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    // =========================================================================
    // Oracle queries
    // =========================================================================

    /// The checker's type at a node.
    pub fn type_at(&self, node: NodeId) -> Option<TypeId> {
        self.node_types.get(&node).copied()
    }

    /// The symbol referenced at a node.
    pub fn symbol_at(&self, node: NodeId) -> Option<SymbolId> {
        self.node(node).symbol
    }

    /// A symbol's type at a location. Narrowed location-specific types win
    /// over the symbol's declared type.
    pub fn type_of_symbol_at(&self, symbol: SymbolId, node: NodeId) -> Option<TypeId> {
        self.symbol_location_types
            .get(&(symbol, node))
            .copied()
            .or(self.symbol(symbol).typ)
    }

    /// Whether a declaration comes from a bundled library file.
    pub fn is_builtin_declaration(&self, decl: DeclId) -> bool {
        matches!(
            self.file(self.decl(decl).file).origin,
            FileOrigin::Lib | FileOrigin::DomLib
        )
    }

    /// Whether a declaration lives in an ambient (`.d.ts`) file.
    pub fn is_external_declaration(&self, decl: DeclId) -> bool {
        self.file(self.decl(decl).file).is_declaration
    }

    /// The symbol a named type points at, when it has one.
    pub fn symbol_of_type(&self, ty: TypeId) -> Option<SymbolId> {
        self.source_type(ty).symbol()
    }

    /// Whether a type's symbol is declared by the modeled Node.js surface.
    pub fn is_nodejs_type(&self, ty: TypeId) -> bool {
        let Some(symbol) = self.symbol_of_type(ty) else {
            return false;
        };
        self.symbol(symbol)
            .declarations
            .iter()
            .any(|d| self.file(self.decl(*d).file).origin == FileOrigin::NodeTypes)
    }

    /// Whether `decl` is (transitively) declared inside the function-like
    /// declaration `func`.
    pub fn decl_is_inside(&self, decl: DeclId, func: DeclId) -> bool {
        let mut current = self.decl(decl).enclosing;
        while let Some(enclosing) = current {
            if enclosing == func {
                return true;
            }
            current = self.decl(enclosing).enclosing;
        }
        false
    }

    /// Whether a declaration is a top-level binding of a source file.
    pub fn is_global_variable(&self, decl: DeclId) -> bool {
        let d = self.decl(decl);
        d.is_top_level && d.enclosing.is_none()
    }

    /// Render a source type for diagnostics.
    pub fn type_to_string(&self, ty: TypeId) -> String {
        match self.source_type(ty) {
            SourceType::NumberLiteral(value) => format!("{value}"),
            SourceType::StringLiteral(value) => format!("\"{value}\""),
            SourceType::BooleanLiteral(value) => format!("{value}"),
            SourceType::Number => "number".to_string(),
            SourceType::String => "string".to_string(),
            SourceType::Boolean => "boolean".to_string(),
            SourceType::Void => "void".to_string(),
            SourceType::Never => "never".to_string(),
            SourceType::Null => "null".to_string(),
            SourceType::Undefined => "undefined".to_string(),
            SourceType::Any => "any".to_string(),
            SourceType::Unknown => "unknown".to_string(),
            SourceType::Union(members) => members
                .iter()
                .map(|m| self.type_to_string(*m))
                .collect::<Vec<_>>()
                .join(" | "),
            SourceType::TypeParameter(name) => name.clone(),
            SourceType::Array(element) => format!("{}[]", self.type_to_string(*element)),
            SourceType::Class(c) => self.symbol(c.symbol).name.clone(),
            SourceType::Interface(i) => self.symbol(i.symbol).name.clone(),
            SourceType::Function(_) => "function".to_string(),
            SourceType::ModuleImports(s) | SourceType::BuiltinInterface(s) => {
                self.symbol(*s).name.clone()
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/index_tests.rs"]
mod tests;
