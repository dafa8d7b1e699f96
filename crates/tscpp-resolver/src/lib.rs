//! Type Resolver
//!
//! Turns source-level type information (declarations, symbols, call
//! signatures, initializers) into C++ type descriptors. The resolver sits
//! between the AST walker and the descriptor model:
//!
//! 1. The walker asks for a descriptor at each declaration/expression site.
//! 2. The resolver consults the oracle ([`tscpp_front::SourceIndex`]) and,
//!    for structural shapes, the [`tscpp_syntax::InterfaceRegistry`].
//! 3. The walker hands the resulting descriptors to emission nodes.
//!
//! Resolution is single threaded and synchronous. A project compiles as one
//! sequential pass per file; the registry is project scoped and must not be
//! shared across concurrent passes.
//!
//! The resolver also owns the closure-capture legality analysis: source
//! constructs that C++ will represent as plain function pointers cannot
//! close over outer state, and are rejected up front with the captured
//! names rather than miscompiled.

pub mod captures;
pub mod resolver;

pub use captures::{captured_identifiers, forbid_closure};
pub use resolver::TypeResolver;
