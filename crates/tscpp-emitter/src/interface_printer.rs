//! Structural interface declaration printing.
//!
//! Every registered interface shape is emitted once as a plain struct
//! deriving from the runtime Object: a constructor taking every property,
//! the property slots, and, when any member needs it, a `Trace` method and
//! a virtual destructor.

use tracing::trace;
use tscpp_syntax::{
    CppType, PropertyMember, RUNTIME_NAMESPACE, TraceMethod, TypeCategory,
    not_trivially_destructible, trace_method,
};

use crate::emit_context::{EmitContext, PrintMode};
use crate::type_printer::print_type;

/// Print the C++ declaration of a structural interface.
pub fn print_interface_declaration(ty: &CppType, ctx: &mut EmitContext) -> String {
    debug_assert!(ty.category == TypeCategory::Interface);
    trace!(name = %ty.name, properties = ty.properties.len(), "print interface declaration");
    // Forward declaration.
    if ctx.mode == PrintMode::Forward {
        return format!("{}struct {};", ctx.prefix(), ty.name);
    }
    // The interface is always printed as a single full declaration.
    let mut ctx = ctx.scope().with_mode(PrintMode::Impl);
    let members: Vec<PropertyMember> = ty
        .properties
        .iter()
        .map(|(name, t)| PropertyMember::new(name.clone(), t.clone()))
        .collect();

    let mut result = format!(
        "{}struct {} : public {RUNTIME_NAMESPACE}::Object {{\n",
        ctx.prefix(),
        ty.name
    );
    ctx.level += 1;
    let mut blocks: Vec<String> = Vec::new();
    blocks.push(print_constructor(ty, &mut ctx));
    for (name, t) in &ty.properties {
        let slot_type = print_type(t, &mut ctx);
        blocks.push(format!("{}{slot_type} {name};", ctx.padding()));
    }
    if not_trivially_destructible(&members) {
        if let Some(trace) = trace_method(&members) {
            blocks.push(print_trace_method(&trace, &mut ctx));
        }
        blocks.push(format!("{}virtual ~{}() = default;", ctx.padding(), ty.name));
    }
    result.push_str(&blocks.join("\n\n"));
    ctx.level -= 1;
    result.push('\n');
    result.push_str(&ctx.padding());
    result.push_str("};");
    result
}

/// Print the synthesized `Trace` method of a class or interface.
pub fn print_trace_method(trace: &TraceMethod, ctx: &mut EmitContext) -> String {
    let mut result = format!(
        "{}void Trace(cppgc::Visitor* visitor) const override {{\n",
        ctx.padding()
    );
    ctx.level += 1;
    for member in &trace.visits {
        result.push_str(&format!("{}TraceHelper(visitor, {member});\n", ctx.padding()));
    }
    ctx.level -= 1;
    result.push_str(&ctx.padding());
    result.push('}');
    result
}

/// The interface constructor takes every property; movable values are
/// moved into place.
fn print_constructor(ty: &CppType, ctx: &mut EmitContext) -> String {
    let mut parameters: Vec<String> = Vec::new();
    let mut initializers: Vec<String> = Vec::new();
    for (name, t) in &ty.properties {
        if t.category == TypeCategory::String
            || t.category == TypeCategory::Union
            || t.is_std_optional()
        {
            initializers.push(format!("{name}(std::move({name}))"));
        } else {
            initializers.push(format!("{name}({name})"));
        }
        parameters.push(format!("{} {name}", print_type(&t.no_property(), ctx)));
    }
    format!(
        "{}{}({}) : {} {{}}",
        ctx.padding(),
        ty.name,
        parameters.join(", "),
        initializers.join(", ")
    )
}
