//! Structural interface registry.
//!
//! Stores every interface and object-literal shape found in the source and
//! makes sure identical shapes share one emitted declaration. Registration
//! is a linear scan for a structurally equal entry; the first match wins.
//! New shapes get the next sequential synthetic name (`Interface1`,
//! `Interface2`, …).
//!
//! The registry is project-scoped and grows monotonically during a
//! single-threaded resolution pass; emission reads it afterwards.

use tracing::trace;
use tscpp_common::{CompileError, CompileResult};

use crate::types::{CppType, TypeCategory};

pub struct InterfaceRegistry {
    types: Vec<CppType>,
}

impl InterfaceRegistry {
    pub fn new() -> Self {
        Self { types: Vec::new() }
    }

    /// Register an interface shape, returning the canonical descriptor.
    ///
    /// The returned descriptor carries the candidate's modifiers: the shape
    /// is shared but how one particular slot stores it is not.
    pub fn register(&mut self, candidate: CppType) -> CppType {
        debug_assert!(candidate.category == TypeCategory::Interface);
        let retained = candidate.modifiers;
        if let Some(existing) = self.types.iter().find(|t| t.equal(&candidate)) {
            trace!(name = %existing.name, "interface registry hit");
            let mut result = existing.clone();
            result.modifiers |= retained;
            return result;
        }
        let mut stored = candidate;
        stored.name = format!("Interface{}", self.types.len() + 1);
        trace!(
            name = %stored.name,
            properties = stored.properties.len(),
            "interface registry insert"
        );
        self.types.push(stored.clone());
        stored
    }

    /// Look up a registered interface by its synthetic name.
    pub fn get(&self, name: &str) -> CompileResult<&CppType> {
        self.types.iter().find(|t| t.name == name).ok_or_else(|| {
            CompileError::bare(format!(
                "Can not find an interface with name of \"{name}\""
            ))
        })
    }

    /// Registered interfaces in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &CppType> {
        self.types.iter()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for InterfaceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../tests/registry_tests.rs"]
mod tests;
