use super::*;
use crate::types::{CppType, TypeModifiers};
use indexmap::IndexMap;

fn shape(entries: &[(&str, CppType)]) -> IndexMap<String, CppType> {
    entries
        .iter()
        .map(|(name, ty)| (name.to_string(), ty.clone()))
        .collect()
}

#[test]
fn identical_shapes_share_one_name() {
    let mut registry = InterfaceRegistry::new();
    let first = registry.register(CppType::interface(
        "A",
        shape(&[
            ("x", CppType::number(TypeModifiers::PROPERTY)),
            ("y", CppType::string(TypeModifiers::PROPERTY)),
        ]),
        TypeModifiers::empty(),
    ));
    // Same shape from a different declaration site, different source name.
    let second = registry.register(CppType::interface(
        "B",
        shape(&[
            ("x", CppType::number(TypeModifiers::PROPERTY)),
            ("y", CppType::string(TypeModifiers::PROPERTY)),
        ]),
        TypeModifiers::empty(),
    ));
    assert_eq!(first.name, "Interface1");
    assert_eq!(second.name, "Interface1");
    assert_eq!(registry.len(), 1);
}

#[test]
fn differing_property_type_gets_a_new_name() {
    let mut registry = InterfaceRegistry::new();
    let first = registry.register(CppType::interface(
        "A",
        shape(&[("x", CppType::number(TypeModifiers::PROPERTY))]),
        TypeModifiers::empty(),
    ));
    let second = registry.register(CppType::interface(
        "A",
        shape(&[("x", CppType::string(TypeModifiers::PROPERTY))]),
        TypeModifiers::empty(),
    ));
    assert_eq!(first.name, "Interface1");
    assert_eq!(second.name, "Interface2");
    assert_eq!(registry.len(), 2);
}

#[test]
fn differing_property_name_gets_a_new_name() {
    let mut registry = InterfaceRegistry::new();
    registry.register(CppType::interface(
        "A",
        shape(&[("x", CppType::number(TypeModifiers::PROPERTY))]),
        TypeModifiers::empty(),
    ));
    let second = registry.register(CppType::interface(
        "A",
        shape(&[("y", CppType::number(TypeModifiers::PROPERTY))]),
        TypeModifiers::empty(),
    ));
    assert_eq!(second.name, "Interface2");
}

#[test]
fn register_retains_candidate_modifiers() {
    let mut registry = InterfaceRegistry::new();
    registry.register(CppType::interface(
        "A",
        shape(&[("x", CppType::number(TypeModifiers::PROPERTY))]),
        TypeModifiers::empty(),
    ));
    let stored_as_property = registry.register(CppType::interface(
        "B",
        shape(&[("x", CppType::number(TypeModifiers::PROPERTY))]),
        TypeModifiers::PROPERTY | TypeModifiers::OPTIONAL,
    ));
    assert_eq!(stored_as_property.name, "Interface1");
    assert!(stored_as_property.is_property());
    assert!(stored_as_property.is_optional());
}

#[test]
fn get_finds_registered_interfaces() {
    let mut registry = InterfaceRegistry::new();
    registry.register(CppType::interface(
        "A",
        shape(&[("x", CppType::number(TypeModifiers::PROPERTY))]),
        TypeModifiers::empty(),
    ));
    assert!(registry.get("Interface1").is_ok());
    let err = registry.get("Interface9").unwrap_err();
    assert!(err.to_string().contains("Interface9"));
}
