
use fixture::Fixture;
use tscpp_front::DeclKind;
use tscpp_resolver::{captured_identifiers, forbid_closure};

#[test]
fn outer_local_reference_fails_with_its_name() {
    let mut f = Fixture::new();
    let func = f.decl(DeclKind::Function, "increment", f.main);
    // `counter` is declared in an enclosing function, not at the top level.
    let outer = f.decl(DeclKind::Function, "outer", f.main);
    let counter = f.decl(DeclKind::Variable, "counter", f.main);
    f.index.decl_mut(counter).enclosing = Some(outer);
    let counter_symbol = f.symbol("counter", vec![counter], None);
    let reference = f.node("counter", Some(counter_symbol));
    f.index.decl_mut(func).body = vec![reference];

    let err = forbid_closure(&f.index, func).unwrap_err();
    assert!(err.message.contains("reference to outer state"));
    assert!(err.message.contains("\"counter\""));
}

#[test]
fn repeated_references_are_reported_once() {
    let mut f = Fixture::new();
    let func = f.decl(DeclKind::Function, "increment", f.main);
    let outer = f.decl(DeclKind::Function, "outer", f.main);
    let counter = f.decl(DeclKind::Variable, "counter", f.main);
    f.index.decl_mut(counter).enclosing = Some(outer);
    let counter_symbol = f.symbol("counter", vec![counter], None);
    let first = f.node("counter", Some(counter_symbol));
    let second = f.node("counter", Some(counter_symbol));
    f.index.decl_mut(func).body = vec![first, second];

    let captured = captured_identifiers(&f.index, func).expect("analysis runs");
    assert_eq!(captured, vec!["counter".to_string()]);
}

#[test]
fn locals_globals_and_declarations_pass() {
    let mut f = Fixture::new();
    let func = f.decl(DeclKind::Function, "run", f.main);

    // Own parameter.
    let param = f.decl(DeclKind::Parameter, "x", f.main);
    f.index.decl_mut(param).enclosing = Some(func);
    let param_symbol = f.symbol("x", vec![param], None);
    let param_ref = f.node("x", Some(param_symbol));

    // Top-level binding.
    let config = f.decl(DeclKind::Variable, "config", f.main);
    f.index.decl_mut(config).is_top_level = true;
    let config_symbol = f.symbol("config", vec![config], None);
    let config_ref = f.node("config", Some(config_symbol));

    // Function declaration.
    let helper = f.decl(DeclKind::Function, "helper", f.main);
    let helper_symbol = f.symbol("helper", vec![helper], None);
    let helper_ref = f.node("helper", Some(helper_symbol));

    f.index.decl_mut(func).body = vec![param_ref, config_ref, helper_ref];

    assert!(forbid_closure(&f.index, func).is_ok());
}

#[test]
fn property_names_are_not_references() {
    let mut f = Fixture::new();
    let func = f.decl(DeclKind::Function, "run", f.main);
    // The `length` in `values.length`: no symbol attached, but skipped
    // before symbol lookup.
    let name = f.node("length", None);
    f.index.node_mut(name).is_property_name = true;
    f.index.decl_mut(func).body = vec![name];

    assert!(forbid_closure(&f.index, func).is_ok());
}

#[test]
fn identifiers_without_symbols_are_an_error() {
    let mut f = Fixture::new();
    let func = f.decl(DeclKind::Function, "run", f.main);
    let mystery = f.node("mystery", None);
    f.index.decl_mut(func).body = vec![mystery];

    let err = captured_identifiers(&f.index, func).unwrap_err();
    assert!(err.message.contains("has no symbol"));
}

#[test]
fn arrows_capture_this_but_methods_do_not() {
    let mut f = Fixture::new();
    let arrow = f.decl(DeclKind::Arrow, "", f.main);
    let this_ref = f.this_node(arrow);
    f.index.decl_mut(arrow).body = vec![this_ref];
    let captured = captured_identifiers(&f.index, arrow).expect("analysis runs");
    assert_eq!(captured, vec!["this".to_string()]);

    let method = f.decl(DeclKind::Method, "tick", f.main);
    let this_ref = f.this_node(method);
    f.index.decl_mut(method).body = vec![this_ref];
    let captured = captured_identifiers(&f.index, method).expect("analysis runs");
    assert!(captured.is_empty());
}
