//! C++ Emission
//!
//! Renders resolved type descriptors into concrete C++ syntax. Rendering is
//! position dependent:
//!
//! - **Value position** (casts, template arguments, base-class names):
//!   objects render as plain names, arrays/functors/unions as their runtime
//!   wrapper templates.
//! - **Declaration position** (variable/property/parameter slots): objects
//!   render through the ownership table (a persistent GC root, a traced
//!   `cppgc::Member`, or a plain pointer) and unresolved template
//!   parameters through trait-resolving wrappers.
//!
//! The shared [`EmitContext`] threads through every render call and
//! accumulates which runtime features and structural interfaces the output
//! uses; the file assembler reads those sets to decide which support
//! headers to include.

pub mod emit_context;
pub mod interface_printer;
pub mod type_printer;

pub use emit_context::{ContextScope, EmitContext, Features, PrintMode};
pub use interface_printer::{print_interface_declaration, print_trace_method};
pub use type_printer::{
    add_namespace, mark_used, print_template_arguments, print_template_declaration, print_type,
    print_type_name, print_type_name_for_declaration, print_type_template_arguments,
    signature_string,
};
