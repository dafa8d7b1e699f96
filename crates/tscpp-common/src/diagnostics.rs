//! Compile errors and diagnostics.
//!
//! Resolution failures come in two kinds:
//!
//! | Kind | Meaning | Example |
//! |------|---------|---------|
//! | `Unimplemented` | Construct not yet supported by this engine | closure capture |
//! | `Unsupported` | Construct cannot be represented in C++ at all | empty interface |
//!
//! Every error surfaced to a caller carries the source text of the node it is
//! attributed to. Internal failures encountered mid-resolution are rewrapped
//! with the location via [`CompileError::rewrap`] so nothing propagates bare.

use serde::Serialize;
use std::fmt;

/// Half-open byte range in a source file.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SourceSpan {
    pub start: u32,
    pub length: u32,
}

impl SourceSpan {
    pub const fn new(start: u32, length: u32) -> Self {
        Self { start, length }
    }

    pub const fn end(self) -> u32 {
        self.start + self.length
    }
}

/// Kind of compile error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    /// A TypeScript feature the engine does not handle yet.
    Unimplemented,
    /// A TypeScript feature with no C++ representation.
    Unsupported,
}

/// A located compile error.
///
/// `text` is the source snippet of the offending node; `Display` renders
/// `"{message}: {text}"` so the user can find the construct without line
/// mapping.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CompileError {
    pub kind: ErrorKind,
    pub message: String,
    pub text: String,
}

pub type CompileResult<T> = Result<T, CompileError>;

impl CompileError {
    /// A feature the engine has not implemented.
    pub fn unimplemented(text: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Unimplemented,
            message: message.into(),
            text: text.into(),
        }
    }

    /// A feature that cannot be expressed in the C++ model.
    pub fn unsupported(text: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Unsupported,
            message: message.into(),
            text: text.into(),
        }
    }

    /// Attach a location to an error that may have been raised without one.
    ///
    /// Already-located errors pass through unchanged so the innermost node
    /// wins; bare messages become `Unsupported` at the given location.
    pub fn rewrap(text: impl Into<String>, error: CompileError) -> Self {
        if error.text.is_empty() {
            Self {
                kind: ErrorKind::Unsupported,
                message: error.message,
                text: text.into(),
            }
        } else {
            error
        }
    }

    /// An error raised where the offending node is not known yet.
    ///
    /// The resolver entry points attach the location via [`rewrap`].
    ///
    /// [`rewrap`]: CompileError::rewrap
    pub fn bare(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Unsupported,
            message: message.into(),
            text: String::new(),
        }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.text.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.message, self.text)
        }
    }
}

impl std::error::Error for CompileError {}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Suggestion,
    Message,
}

/// User-facing diagnostic, serializable for the CLI/tooling surface.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub file: String,
    pub span: SourceSpan,
    pub message_text: String,
}

impl Diagnostic {
    pub fn error(file: impl Into<String>, span: SourceSpan, message: impl Into<String>) -> Self {
        Self {
            category: DiagnosticCategory::Error,
            file: file.into(),
            span,
            message_text: message.into(),
        }
    }

    /// Render a compile error as a diagnostic at a known file/span.
    pub fn from_compile_error(file: impl Into<String>, span: SourceSpan, error: &CompileError) -> Self {
        Self::error(file, span, error.to_string())
    }

    /// Serialize for the tooling surface.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "../tests/diagnostics_tests.rs"]
mod tests;
