//! Source-Language Oracle
//!
//! The resolver does not parse TypeScript. A front end (parser plus
//! checker, outside this engine) computes symbols, declarations, call
//! signatures, and nominal types, and records them in a [`SourceIndex`].
//! This crate is that record: an arena-per-entity, id-addressed model of
//! everything the resolver is allowed to ask about the source program.
//!
//! | Entity | Id | What it answers |
//! |--------|----|-----------------|
//! | [`SourceFile`] | `FileId` | ambient/declaration status, origin, namespace |
//! | [`Node`] | `NodeId` | reference sites: text, symbol, enclosing function |
//! | [`Declaration`] | `DeclId` | binding kind, flags, annotations, initializer |
//! | [`Symbol`] | `SymbolId` | declaration list, value declaration, type |
//! | [`SourceType`] | `TypeId` | the checker's nominal type at a location |
//! | [`SignatureData`] | `SigId` | parameter/return/type-parameter info |

pub mod ast;
pub mod hints;
pub mod index;
pub mod types;

pub use ast::{
    DeclId, DeclKind, Declaration, FileId, FileOrigin, Node, NodeId, NodeKind, SourceFile, Symbol,
    SymbolId,
};
pub use hints::{Hint, parse_hints};
pub use index::SourceIndex;
pub use types::{ClassType, InterfaceType, SigId, SignatureData, SourceType, TypeId};
