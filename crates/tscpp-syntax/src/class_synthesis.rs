//! Class/GC synthesis.
//!
//! Derives the `Trace` obligation required by `cppgc::GarbageCollected`
//! from a class's already-resolved member descriptors. A data member whose
//! type holds an object (directly or inside a union) must be visited during
//! a trace pass; a class with no such member needs no `Trace` method.
//!
//! This is a derived view over resolved members. No type resolution
//! happens here.

use crate::types::CppType;

/// A resolved data-property member of a class or interface.
#[derive(Clone, Debug)]
pub struct PropertyMember {
    pub name: String,
    pub ty: CppType,
}

impl PropertyMember {
    pub fn new(name: impl Into<String>, ty: CppType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// The synthesized trace operation: one visit per GC-reachable member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceMethod {
    pub visits: Vec<String>,
}

/// Create the `Trace` method required by `cppgc::GarbageCollected`.
///
/// Returns `None` when no member needs tracing.
pub fn trace_method(members: &[PropertyMember]) -> Option<TraceMethod> {
    let visits: Vec<String> = members
        .iter()
        .filter(|m| m.ty.has_object())
        .map(|m| m.name.clone())
        .collect();
    if visits.is_empty() {
        None
    } else {
        Some(TraceMethod { visits })
    }
}

/// Whether any member requires running a destructor.
///
/// Classes with only trivially-destructible members skip the virtual
/// destructor and pre-finalizer machinery.
pub fn not_trivially_destructible(members: &[PropertyMember]) -> bool {
    members.iter().any(|m| !m.ty.is_trivially_destructible())
}

#[cfg(test)]
#[path = "../tests/class_synthesis_tests.rs"]
mod tests;
