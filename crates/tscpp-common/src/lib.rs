//! Common types shared by every tscpp compilation stage.
//!
//! The engine reports all failures as located, user-facing errors. There is
//! no retry or partial-result policy: resolving a site either produces one
//! type descriptor or fails that file's compilation outright.

pub mod diagnostics;

pub use diagnostics::{
    CompileError, CompileResult, Diagnostic, DiagnosticCategory, ErrorKind, SourceSpan,
};
