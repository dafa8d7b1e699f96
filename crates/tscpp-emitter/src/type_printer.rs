//! Type name rendering.
//!
//! Two positions exist:
//!
//! - [`print_type_name`] renders the *value* form, used for casts, template
//!   arguments, and base-class names.
//! - [`print_type_name_for_declaration`] renders the *storage* form of a
//!   slot, which for objects follows the ownership table:
//!
//! | persistent | collector member | rendering |
//! |------------|------------------|-----------|
//! | yes | any | `cppgc::Persistent<T>` |
//! | no | yes | `cppgc::Member<T>` |
//! | no | no | `T*` |
//!
//! A traced member handle lets the collector discover the slot during a
//! trace pass; a persistent root keeps its referent alive independently;
//! everything else relies on the ambient stack scan.

use tscpp_syntax::{CppType, NODEJS_NAMESPACE, RUNTIME_NAMESPACE, TypeCategory};

use crate::emit_context::{EmitContext, Features};

/// Render a type at a use site, recording interface usage.
pub fn print_type(ty: &CppType, ctx: &mut EmitContext) -> String {
    if ty.category == TypeCategory::Interface {
        ctx.interfaces.insert(ty.name.clone());
    }
    print_type_name_for_declaration(ty, ctx)
}

/// Print the type name used as a value: template arguments, casts, and
/// class inheritance.
pub fn print_type_name(ty: &CppType, ctx: &mut EmitContext) -> String {
    match ty.category {
        TypeCategory::Function | TypeCategory::Method => {
            panic!("Raw function type should never be printed out");
        }
        TypeCategory::Array => format!(
            "{RUNTIME_NAMESPACE}::Array<{}>",
            print_type_name_for_declaration(&ty.element_type().no_property(), ctx)
        ),
        TypeCategory::Functor => format!(
            "{RUNTIME_NAMESPACE}::Function<{}>",
            signature_string(ty, ctx)
        ),
        TypeCategory::Union => {
            let mut members: Vec<String> = ty
                .types
                .iter()
                .map(|t| print_type_name_for_declaration(&t.no_property(), ctx))
                .collect();
            // Monostate first so the union defaults to undefined.
            if ty.is_optional() {
                members.insert(0, "std::monostate".to_string());
            }
            format!("{RUNTIME_NAMESPACE}::Union<{}>", members.join(", "))
        }
        _ => {
            let mut name = ty.name.clone();
            if let Some(namespace) = &ty.namespace {
                name = add_namespace(&name, namespace, ctx);
            }
            if ty.category == TypeCategory::Class && ty.template_arguments.is_some() {
                name.push_str(&print_template_arguments(
                    ty.template_arguments.as_deref(),
                    ctx,
                ));
            }
            if ty.is_std_optional() {
                return format!("std::optional<{name}>");
            }
            name
        }
    }
}

/// Print the type name used for declaring a value slot.
pub fn print_type_name_for_declaration(ty: &CppType, ctx: &mut EmitContext) -> String {
    // At generation time it is unknown whether a substituted template
    // argument will be an object or a value; trait wrappers decide later.
    if ty.category == TypeCategory::Template {
        return match (ty.is_cppgc_member(), ty.is_optional()) {
            (true, true) => format!("{RUNTIME_NAMESPACE}::OptionalCppgcMemberType<{}>", ty.name),
            (true, false) => format!("{RUNTIME_NAMESPACE}::CppgcMemberType<{}>", ty.name),
            (false, true) => format!("{RUNTIME_NAMESPACE}::OptionalValueType<{}>", ty.name),
            (false, false) => format!("{RUNTIME_NAMESPACE}::ValueType<{}>", ty.name),
        };
    }
    // Objects are stored behind a pointer or GC handle.
    if ty.is_object() {
        let name = if ty.category == TypeCategory::Array {
            format!(
                "{RUNTIME_NAMESPACE}::Array<{}>",
                print_type_name_for_declaration(ty.element_type(), ctx)
            )
        } else {
            print_type_name(ty, ctx)
        };
        return if ty.is_persistent() {
            format!("cppgc::Persistent<{name}>")
        } else if ty.is_cppgc_member() {
            format!("cppgc::Member<{name}>")
        } else {
            format!("{name}*")
        };
    }
    // Unions declare as the tagged wrapper even when optional.
    if ty.category == TypeCategory::Union {
        let mut members: Vec<String> = ty
            .types
            .iter()
            .map(|t| print_type_name_for_declaration(t, ctx))
            .collect();
        if ty.is_optional() {
            members.insert(0, "std::monostate".to_string());
        }
        return format!("{RUNTIME_NAMESPACE}::Union<{}>", members.join(", "));
    }
    print_type_name(ty, ctx)
}

/// The C++ signature of a callable, `Return(Params…)`.
pub fn signature_string(ty: &CppType, ctx: &mut EmitContext) -> String {
    let Some(signature) = &ty.signature else {
        return String::new();
    };
    let return_type = print_type(&signature.return_type, ctx);
    let parameters: Vec<String> = signature
        .parameters
        .iter()
        .map(|p| print_type(p, ctx))
        .collect();
    format!("{return_type}({})", parameters.join(", "))
}

/// Add a namespace to an identifier according to the current context.
pub fn add_namespace(identifier: &str, namespace: &str, ctx: &EmitContext) -> String {
    // Apply the namespace alias.
    let alias = ctx
        .namespace_aliases
        .get(namespace)
        .map(String::as_str)
        .unwrap_or(namespace);
    // Qualify relative to the current namespace.
    let mut qualified = match &ctx.namespace {
        Some(current) if alias == current => identifier.to_string(),
        Some(current)
            if alias.starts_with(current.as_str())
                && alias[current.len()..].starts_with("::") =>
        {
            format!("{}::{identifier}", &alias[current.len() + 2..])
        }
        _ => format!("{alias}::{identifier}"),
    };
    // Apply the type alias when available.
    if let Some(renamed) = ctx.type_aliases.get(&qualified) {
        qualified = renamed.clone();
    }
    // Shorten what is still inside the current namespace.
    if let Some(current) = &ctx.namespace {
        if let Some(stripped) = qualified.strip_prefix(&format!("{current}::")) {
            qualified = stripped.to_string();
        }
    }
    qualified
}

/// Print the template arguments for function call sites.
pub fn print_type_template_arguments(ty: &CppType, ctx: &mut EmitContext) -> String {
    if matches!(ty.category, TypeCategory::Function | TypeCategory::Method) {
        return print_template_arguments(ty.template_arguments.as_deref(), ctx);
    }
    String::new()
}

/// Print an angle-bracket template argument list.
pub fn print_template_arguments(args: Option<&[CppType]>, ctx: &mut EmitContext) -> String {
    let Some(args) = args else {
        return String::new();
    };
    if args.is_empty() {
        return String::new();
    }
    let printed: Vec<String> = args.iter().map(|a| print_type_name(a, ctx)).collect();
    format!("<{}>", printed.join(", "))
}

/// Print the template parameter clause of a generic declaration.
pub fn print_template_declaration(ty: &CppType) -> Option<String> {
    if ty.types.is_empty() {
        return None;
    }
    let names: Vec<String> = ty
        .types
        .iter()
        .map(|t| format!("typename {}", t.name))
        .collect();
    Some(format!("template<{}>", names.join(", ")))
}

/// Record the runtime features and named types this type relies on.
pub fn mark_used(ty: &CppType, ctx: &mut EmitContext) {
    match ty.category {
        TypeCategory::Functor => {
            ctx.features |= Features::FUNCTION;
        }
        TypeCategory::String => {
            ctx.features |= Features::STRING;
        }
        TypeCategory::Union => {
            ctx.features |= Features::UNION;
        }
        TypeCategory::Array => {
            ctx.features |= Features::ARRAY;
        }
        TypeCategory::Interface => {
            ctx.features |= Features::OBJECT;
        }
        TypeCategory::Function | TypeCategory::Class => {
            ctx.used_types.insert(format!(
                "{},{}",
                ty.namespace.as_deref().unwrap_or(""),
                ty.name
            ));
        }
        TypeCategory::Namespace => match ty.name.as_str() {
            "Math" => ctx.features |= Features::MATH,
            "Number" => ctx.features |= Features::NUMBER,
            _ => {}
        },
        _ => {}
    }
    if ty.is_std_optional() {
        ctx.features |= Features::TYPE_TRAITS;
    }
    if ty.namespace.as_deref() == Some(NODEJS_NAMESPACE) {
        ctx.features |= Features::RUNTIME;
        if ty.name == "Console" {
            ctx.features |= Features::CONSOLE;
        } else if ty.name == "Process" {
            ctx.features |= Features::PROCESS;
        }
    }
    for subtype in &ty.types {
        mark_used(subtype, ctx);
    }
    if let Some(signature) = &ty.signature {
        if !ty.is_external() {
            mark_used(&signature.return_type, ctx);
            for parameter in &signature.parameters {
                mark_used(parameter, ctx);
            }
        }
    }
}
