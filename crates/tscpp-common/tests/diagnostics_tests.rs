use super::*;

#[test]
fn display_includes_source_text() {
    let err = CompileError::unimplemented("let x = y", "Function declaration can not include reference to outer state");
    assert_eq!(
        err.to_string(),
        "Function declaration can not include reference to outer state: let x = y"
    );
}

#[test]
fn rewrap_keeps_located_errors() {
    let inner = CompileError::unsupported("foo.bar", "Unsupported type \"Bar\"");
    let rewrapped = CompileError::rewrap("outer expr", inner.clone());
    assert_eq!(rewrapped, inner);
}

#[test]
fn rewrap_locates_bare_errors() {
    let inner = CompileError::bare("The \"any\" type is not supported");
    let rewrapped = CompileError::rewrap("let x: any", inner);
    assert_eq!(rewrapped.kind, ErrorKind::Unsupported);
    assert_eq!(rewrapped.text, "let x: any");
}

#[test]
fn diagnostic_serializes_to_json() {
    let diag = Diagnostic::error("main.ts", SourceSpan::new(0, 3), "boom");
    let json = diag.to_json();
    assert!(json.contains("\"main.ts\""));
    assert!(json.contains("\"boom\""));
}

#[test]
fn diagnostic_from_compile_error() {
    let err = CompileError::unsupported("interface A {}", "Empty interface means any and is not supported");
    let diag = Diagnostic::from_compile_error("main.ts", SourceSpan::new(10, 14), &err);
    assert_eq!(diag.category, DiagnosticCategory::Error);
    assert_eq!(diag.span.end(), 24);
    assert!(diag.message_text.contains("interface A {}"));
}
