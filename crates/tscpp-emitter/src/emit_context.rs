//! The mutable rendering context threaded through emission.
//!
//! Holds the current namespace, active aliases, and the growing sets of
//! features and structural interfaces the rendered code touches. A caller
//! that needs different settings for a subtree takes a [`ContextScope`];
//! the scope restores every overridden field when dropped, on every exit
//! path including early error returns.

use bitflags::bitflags;
use indexmap::IndexSet;
use rustc_hash::FxHashMap;
use std::ops::{Deref, DerefMut};

/// Possible modes for printing a syntax node.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PrintMode {
    /// Implementation file bodies.
    Impl,
    /// Header declarations.
    Header,
    /// Forward declarations only.
    Forward,
}

bitflags! {
    /// Optional C++ runtime features used by the printed code.
    ///
    /// The file assembler maps each flag to the support headers it must
    /// include.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct Features: u16 {
        const STRING = 1 << 0;
        const UNION = 1 << 1;
        const ARRAY = 1 << 2;
        const FUNCTION = 1 << 3;
        const OBJECT = 1 << 4;
        const RUNTIME = 1 << 5;
        const TYPE_TRAITS = 1 << 6;
        const PROCESS = 1 << 7;
        const CONSOLE = 1 << 8;
        const MATH = 1 << 9;
        const NUMBER = 1 << 10;
    }
}

/// Controls indentation and name qualification when printing C++.
pub struct EmitContext {
    /// The print mode.
    pub mode: PrintMode,
    /// How many spaces for one indentation level.
    pub indent: usize,
    /// Current namespace.
    pub namespace: Option<String>,
    /// The depth of indentation.
    pub level: usize,
    /// Namespaces aliased with `import * as name`.
    pub namespace_aliases: FxHashMap<String, String>,
    /// Type names aliased with `import {x as y}`.
    pub type_aliases: FxHashMap<String, String>,
    /// Class/function type names used while printing.
    pub used_types: IndexSet<String>,
    /// Runtime features used while printing.
    pub features: Features,
    /// Structural interfaces referenced while printing.
    pub interfaces: IndexSet<String>,
    /// Features already provided by included headers.
    pub included_features: Option<Features>,
    /// Interfaces already printed in included headers.
    pub included_interfaces: Option<IndexSet<String>>,
    /// One-shot flag suppressing the next line's indentation, for
    /// constructs that must continue on the previous line.
    pub concatenate_next_line: bool,
}

impl EmitContext {
    pub fn new(mode: PrintMode) -> Self {
        Self::with_indent(mode, 2)
    }

    pub fn with_indent(mode: PrintMode, indent: usize) -> Self {
        Self {
            mode,
            indent,
            namespace: None,
            level: 0,
            namespace_aliases: FxHashMap::default(),
            type_aliases: FxHashMap::default(),
            used_types: IndexSet::new(),
            features: Features::empty(),
            interfaces: IndexSet::new(),
            included_features: None,
            included_interfaces: None,
            concatenate_next_line: false,
        }
    }

    /// The indentation for the current level.
    pub fn padding(&self) -> String {
        " ".repeat(self.level * self.indent)
    }

    /// The indentation to put before the next construct. Consumes the
    /// one-shot join flag.
    pub fn prefix(&mut self) -> String {
        if self.concatenate_next_line {
            self.concatenate_next_line = false;
            String::new()
        } else {
            self.padding()
        }
    }

    /// Ask the next printed line to continue on the current one.
    pub fn join(&mut self) -> &mut Self {
        self.concatenate_next_line = true;
        self
    }

    /// Features the output still needs support declarations for, after
    /// subtracting what the included headers already provide.
    pub fn pending_features(&self) -> Features {
        match self.included_features {
            Some(included) => self.features - included,
            None => self.features,
        }
    }

    /// Structural interfaces the output still needs declarations for.
    pub fn pending_interfaces(&self) -> IndexSet<String> {
        match &self.included_interfaces {
            Some(included) => self
                .interfaces
                .iter()
                .filter(|name| !included.contains(*name))
                .cloned()
                .collect(),
            None => self.interfaces.clone(),
        }
    }

    /// Begin a scoped override. Overridden fields are restored when the
    /// returned scope is dropped.
    pub fn scope(&mut self) -> ContextScope<'_> {
        ContextScope {
            ctx: self,
            saved_mode: None,
            saved_namespace: None,
            saved_level: None,
        }
    }
}

/// Guard that temporarily overrides context fields in a scope.
///
/// Dereferences to [`EmitContext`] so render code uses it in place of the
/// context itself.
pub struct ContextScope<'a> {
    ctx: &'a mut EmitContext,
    saved_mode: Option<PrintMode>,
    saved_namespace: Option<Option<String>>,
    saved_level: Option<usize>,
}

impl<'a> ContextScope<'a> {
    pub fn with_mode(mut self, mode: PrintMode) -> Self {
        self.saved_mode.get_or_insert(self.ctx.mode);
        self.ctx.mode = mode;
        self
    }

    pub fn with_namespace(mut self, namespace: Option<String>) -> Self {
        if self.saved_namespace.is_none() {
            self.saved_namespace = Some(self.ctx.namespace.clone());
        }
        self.ctx.namespace = namespace;
        self
    }

    pub fn with_level(mut self, level: usize) -> Self {
        self.saved_level.get_or_insert(self.ctx.level);
        self.ctx.level = level;
        self
    }
}

impl Deref for ContextScope<'_> {
    type Target = EmitContext;

    fn deref(&self) -> &EmitContext {
        self.ctx
    }
}

impl DerefMut for ContextScope<'_> {
    fn deref_mut(&mut self) -> &mut EmitContext {
        self.ctx
    }
}

impl Drop for ContextScope<'_> {
    fn drop(&mut self) {
        if let Some(mode) = self.saved_mode {
            self.ctx.mode = mode;
        }
        if let Some(namespace) = self.saved_namespace.take() {
            self.ctx.namespace = namespace;
        }
        if let Some(level) = self.saved_level {
            self.ctx.level = level;
        }
    }
}
