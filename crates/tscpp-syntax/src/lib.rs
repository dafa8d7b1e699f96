//! C++ Type Descriptor Model
//!
//! This crate owns the target-facing representation of types: the
//! [`CppType`] descriptor, its equality/assignability/inheritance lattice,
//! the structural [`InterfaceRegistry`], and the cppgc trace synthesis
//! derived from resolved class members.
//!
//! Key properties:
//!
//! - Descriptors are immutable values once constructed; `clone` produces a
//!   deep independent copy, so no two sites alias a mutable type node.
//! - `TypeCategory` and `TypeModifiers` are closed; every consumer matches
//!   exhaustively, so a new category cannot be added without updating them.
//! - Equality ignores the storage-only modifiers (static/property/external/
//!   element/persistent). They decide how a slot is stored, never what type
//!   it holds.

pub mod class_synthesis;
pub mod registry;
pub mod types;

pub use class_synthesis::{PropertyMember, TraceMethod, not_trivially_destructible, trace_method};
pub use registry::InterfaceRegistry;
pub use types::{CppType, Signature, TypeCategory, TypeModifiers};

/// Namespace of the C++ support runtime linked into every generated project.
pub const RUNTIME_NAMESPACE: &str = "tscpp";

/// Namespace for synthesized declarations (structural interfaces).
pub const GENERATED_NAMESPACE: &str = "tscpp::generated";

/// Namespace for the modeled subset of the Node.js runtime.
pub const NODEJS_NAMESPACE: &str = "tscpp::nodejs";
