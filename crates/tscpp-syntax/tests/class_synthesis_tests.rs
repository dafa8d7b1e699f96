use super::*;
use crate::types::{CppType, TypeCategory, TypeModifiers};

fn member(name: &str, ty: CppType) -> PropertyMember {
    PropertyMember::new(name, ty)
}

fn class_field(name: &str) -> CppType {
    CppType::new(name, TypeCategory::Class, TypeModifiers::PROPERTY)
}

#[test]
fn object_members_are_traced() {
    let members = vec![
        member("count", CppType::number(TypeModifiers::PROPERTY)),
        member("child", class_field("Node")),
        member("label", CppType::string(TypeModifiers::PROPERTY)),
    ];
    let trace = trace_method(&members).expect("child needs tracing");
    assert_eq!(trace.visits, vec!["child".to_string()]);
}

#[test]
fn union_members_holding_objects_are_traced() {
    let mut u = CppType::new("union", TypeCategory::Union, TypeModifiers::PROPERTY);
    u.types = vec![
        CppType::number(TypeModifiers::empty()),
        CppType::new("Node", TypeCategory::Class, TypeModifiers::empty()),
    ];
    let members = vec![member("value", u)];
    let trace = trace_method(&members).expect("union holding an object needs tracing");
    assert_eq!(trace.visits, vec!["value".to_string()]);
}

#[test]
fn scalar_only_classes_need_no_trace() {
    let members = vec![
        member("x", CppType::number(TypeModifiers::PROPERTY)),
        member("y", CppType::boolean(TypeModifiers::PROPERTY)),
    ];
    assert!(trace_method(&members).is_none());
}

#[test]
fn destructibility_follows_member_types() {
    let trivial = vec![member("x", CppType::number(TypeModifiers::PROPERTY))];
    assert!(!not_trivially_destructible(&trivial));

    let with_string = vec![
        member("x", CppType::number(TypeModifiers::PROPERTY)),
        member("s", CppType::string(TypeModifiers::PROPERTY)),
    ];
    assert!(not_trivially_destructible(&with_string));
}
