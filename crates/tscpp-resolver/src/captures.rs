//! Closure-capture legality analysis.
//!
//! C++ represents plain functions as function pointers and typed functors
//! as callable objects over explicit parameters; neither models implicit
//! lexical capture. Any function the walker will emit in one of those
//! forms must therefore reference nothing from an enclosing scope except
//! globals and class/function declarations. Violations are rejected here,
//! before emission, with the distinct captured names.

use tscpp_common::{CompileError, CompileResult};
use tscpp_front::{DeclId, NodeKind, SourceIndex};

/// Fail if the function captures outer state.
pub fn forbid_closure(index: &SourceIndex, func: DeclId) -> CompileResult<()> {
    let captured = captured_identifiers(index, func)?;
    if captured.is_empty() {
        return Ok(());
    }
    let names = captured
        .iter()
        .map(|name| format!("\"{name}\""))
        .collect::<Vec<_>>()
        .join(", ");
    Err(CompileError::unimplemented(
        &index.decl(func).text,
        format!("Function declaration can not include reference to outer state: {names}"),
    ))
}

/// The distinct names of outer bindings referenced by the function body.
pub fn captured_identifiers(index: &SourceIndex, func: DeclId) -> CompileResult<Vec<String>> {
    let decl = index.decl(func);
    // "this" is part of the closure unless the function has its own
    // receiver (methods, constructors, accessors).
    let own_receiver = decl.kind.has_own_receiver();
    let mut captured: Vec<String> = Vec::new();
    let mut push_unique = |captured: &mut Vec<String>, name: &str| {
        if !captured.iter().any(|c| c == name) {
            captured.push(name.to_string());
        }
    };
    for node_id in &decl.body {
        let node = index.node(*node_id);
        match node.kind {
            NodeKind::This => {
                if !own_receiver {
                    push_unique(&mut captured, "this");
                }
                continue;
            }
            NodeKind::Identifier => {}
            NodeKind::Expression => continue,
        }
        // Property names are not value references.
        if node.is_property_name {
            continue;
        }
        let Some(symbol) = node.symbol else {
            return Err(CompileError::unimplemented(
                &node.text,
                format!("Identifier \"{}\" has no symbol", node.text),
            ));
        };
        let Some(value_decl) = index.symbol(symbol).value_declaration else {
            continue;
        };
        // References to ambient declarations and to class/function/property
        // declarations are fine.
        if index.is_external_declaration(value_decl)
            || index.decl(value_decl).kind.is_freely_referable()
        {
            continue;
        }
        // Anything declared outside the function that is not a top-level
        // binding is a capture.
        if !index.decl_is_inside(value_decl, func) && !index.is_global_variable(value_decl) {
            push_unique(&mut captured, &node.text);
        }
    }
    Ok(captured)
}
