use super::*;

fn class(name: &str) -> CppType {
    CppType::new(name, TypeCategory::Class, TypeModifiers::empty())
}

fn class_with_base(name: &str, base: CppType) -> CppType {
    let mut ty = class(name);
    ty.base = Some(Box::new(base));
    ty
}

fn array_of(element: CppType) -> CppType {
    let mut ty = CppType::new("Array", TypeCategory::Array, TypeModifiers::empty());
    ty.types.push(element);
    ty
}

fn union_of(members: Vec<CppType>, modifiers: TypeModifiers) -> CppType {
    let mut ty = CppType::new("union", TypeCategory::Union, modifiers);
    ty.types = members;
    ty
}

#[test]
fn equal_is_reflexive_and_symmetric() {
    let a = CppType::number(TypeModifiers::empty());
    let b = CppType::number(TypeModifiers::empty());
    assert!(a.equal(&a));
    assert!(a.equal(&b));
    assert!(b.equal(&a));
}

#[test]
fn equal_ignores_storage_modifiers() {
    let plain = class("Member");
    let stored = CppType::new(
        "Member",
        TypeCategory::Class,
        TypeModifiers::PROPERTY
            | TypeModifiers::STATIC
            | TypeModifiers::EXTERNAL
            | TypeModifiers::ELEMENT
            | TypeModifiers::PERSISTENT,
    );
    assert!(plain.equal(&stored));
    assert!(stored.equal(&plain));
}

#[test]
fn equal_ignores_optional_for_objects_only() {
    let obj = class("Member");
    let optional_obj = CppType::new("Member", TypeCategory::Class, TypeModifiers::OPTIONAL);
    assert!(obj.equal(&optional_obj));

    let num = CppType::number(TypeModifiers::empty());
    let optional_num = CppType::number(TypeModifiers::OPTIONAL);
    assert!(!num.equal(&optional_num));
}

#[test]
fn equal_respects_namespace_and_variadic() {
    let mut a = class("Member");
    let mut b = class("Member");
    b.namespace = Some("other".to_string());
    assert!(!a.equal(&b));

    b.namespace = None;
    a.modifiers |= TypeModifiers::VARIADIC;
    assert!(!a.equal(&b));
}

#[test]
fn union_equality_is_order_independent() {
    let a = union_of(
        vec![CppType::number(TypeModifiers::empty()), CppType::string(TypeModifiers::empty())],
        TypeModifiers::empty(),
    );
    let b = union_of(
        vec![CppType::string(TypeModifiers::empty()), CppType::number(TypeModifiers::empty())],
        TypeModifiers::empty(),
    );
    assert!(a.equal(&b));
    assert!(b.equal(&a));
}

#[test]
fn union_equality_requires_both_subsets() {
    let narrow = union_of(
        vec![CppType::number(TypeModifiers::empty())],
        TypeModifiers::empty(),
    );
    let wide = union_of(
        vec![CppType::number(TypeModifiers::empty()), CppType::string(TypeModifiers::empty())],
        TypeModifiers::empty(),
    );
    // Same name and category, overlapping members, still not equal.
    assert!(!narrow.equal(&wide));
    assert!(!wide.equal(&narrow));
}

#[test]
fn callable_equality_compares_signatures() {
    let a = CppType::callable(
        TypeCategory::Functor,
        CppType::void(TypeModifiers::empty()),
        vec![CppType::number(TypeModifiers::empty())],
        TypeModifiers::empty(),
    );
    let b = CppType::callable(
        TypeCategory::Functor,
        CppType::void(TypeModifiers::empty()),
        vec![CppType::number(TypeModifiers::empty())],
        TypeModifiers::empty(),
    );
    let c = CppType::callable(
        TypeCategory::Functor,
        CppType::void(TypeModifiers::empty()),
        vec![CppType::string(TypeModifiers::empty())],
        TypeModifiers::empty(),
    );
    assert!(a.equal(&b));
    assert!(!a.equal(&c));
}

#[test]
fn not_function_downgrades_to_functor() {
    let ty = CppType::callable(
        TypeCategory::Function,
        CppType::void(TypeModifiers::empty()),
        vec![],
        TypeModifiers::NOT_FUNCTION,
    );
    assert_eq!(ty.category, TypeCategory::Functor);
    assert!(!ty.modifiers.contains(TypeModifiers::NOT_FUNCTION));
}

#[test]
fn any_requires_external() {
    assert!(CppType::any("any", TypeModifiers::empty()).is_err());
    let ty = CppType::any("any", TypeModifiers::EXTERNAL).expect("external any is permitted");
    assert_eq!(ty.category, TypeCategory::Any);
}

#[test]
fn objects_accept_null() {
    let null = CppType::null(TypeModifiers::empty());
    for ty in [
        class("Member"),
        array_of(CppType::number(TypeModifiers::empty())),
        CppType::callable(
            TypeCategory::Functor,
            CppType::void(TypeModifiers::empty()),
            vec![],
            TypeModifiers::empty(),
        ),
    ] {
        assert!(ty.assignable_with(&null), "{:?} should accept null", ty.category);
    }
    assert!(!CppType::number(TypeModifiers::empty()).assignable_with(&null));
}

#[test]
fn derived_assignable_to_base() {
    let base = class("Base");
    let derived = class_with_base("Derived", base.clone());
    assert!(base.assignable_with(&derived));
    assert!(!derived.assignable_with(&base));
}

#[test]
fn inherits_from_walks_the_chain() {
    let root = class("Root");
    let mid = class_with_base("Mid", root.clone());
    let leaf = class_with_base("Leaf", mid.clone());
    assert!(leaf.inherits_from(&mid));
    assert!(leaf.inherits_from(&root));
    assert!(!root.inherits_from(&leaf));
    assert!(!CppType::number(TypeModifiers::empty()).inherits_from(&root));
}

#[test]
fn array_assignability_is_covariant_by_element() {
    let base = class("Base");
    let derived = class_with_base("Derived", base.clone());
    let base_array = array_of(base);
    let derived_array = array_of(derived);
    assert!(base_array.assignable_with(&derived_array));

    let number_array = array_of(CppType::number(TypeModifiers::empty()));
    assert!(!base_array.assignable_with(&number_array));
}

#[test]
fn union_accepts_member_and_sub_union() {
    let u = union_of(
        vec![CppType::number(TypeModifiers::empty()), CppType::string(TypeModifiers::empty())],
        TypeModifiers::empty(),
    );
    assert!(u.assignable_with(&CppType::number(TypeModifiers::empty())));
    assert!(!u.assignable_with(&CppType::boolean(TypeModifiers::empty())));

    let mut sub = union_of(
        vec![CppType::number(TypeModifiers::empty())],
        TypeModifiers::empty(),
    );
    sub.name = "union".to_string();
    assert!(u.assignable_with(&sub));

    let mut wider = union_of(
        vec![CppType::number(TypeModifiers::empty()), CppType::boolean(TypeModifiers::empty())],
        TypeModifiers::empty(),
    );
    wider.name = "union".to_string();
    assert!(!u.assignable_with(&wider));
}

#[test]
fn optional_accepts_non_optional_form() {
    let optional = CppType::number(TypeModifiers::OPTIONAL);
    let plain = CppType::number(TypeModifiers::empty());
    assert!(optional.assignable_with(&plain));
    assert!(!plain.assignable_with(&optional));
}

#[test]
fn std_optional_is_for_scalars_only() {
    assert!(CppType::number(TypeModifiers::OPTIONAL).is_std_optional());
    assert!(!CppType::number(TypeModifiers::empty()).is_std_optional());

    let optional_class = CppType::new("Member", TypeCategory::Class, TypeModifiers::OPTIONAL);
    assert!(!optional_class.is_std_optional());

    let optional_union = union_of(
        vec![CppType::number(TypeModifiers::empty()), CppType::string(TypeModifiers::empty())],
        TypeModifiers::OPTIONAL,
    );
    assert!(!optional_union.is_std_optional());

    let optional_template =
        CppType::new("T", TypeCategory::Template, TypeModifiers::OPTIONAL);
    assert!(!optional_template.is_std_optional());
}

#[test]
fn cppgc_member_requires_object_and_member_slot() {
    let field = CppType::new("Member", TypeCategory::Class, TypeModifiers::PROPERTY);
    assert!(field.is_cppgc_member());

    let element = CppType::new("Member", TypeCategory::Class, TypeModifiers::ELEMENT);
    assert!(element.is_cppgc_member());

    let local = class("Member");
    assert!(!local.is_cppgc_member());

    let template_field = CppType::new("T", TypeCategory::Template, TypeModifiers::PROPERTY);
    assert!(template_field.is_cppgc_member());

    let scalar_field = CppType::number(TypeModifiers::PROPERTY);
    assert!(!scalar_field.is_cppgc_member());
}

#[test]
fn has_object_sees_through_unions() {
    let u = union_of(
        vec![CppType::number(TypeModifiers::empty()), class("Member")],
        TypeModifiers::empty(),
    );
    assert!(u.has_object());
    assert!(!u.is_object());

    let scalars = union_of(
        vec![CppType::number(TypeModifiers::empty()), CppType::string(TypeModifiers::empty())],
        TypeModifiers::empty(),
    );
    assert!(!scalars.has_object());
}

#[test]
fn has_template_recurses_into_subtypes() {
    let t = CppType::new("T", TypeCategory::Template, TypeModifiers::empty());
    assert!(t.has_template());
    assert!(array_of(t).has_template());
    assert!(!array_of(CppType::number(TypeModifiers::empty())).has_template());
}

#[test]
fn strict_equal_distinguishes_member_wrapper() {
    let plain = class("Member");
    let member = CppType::new("Member", TypeCategory::Class, TypeModifiers::PROPERTY);
    assert!(plain.equal(&member));
    assert!(!plain.strict_equal(&member));
    assert!(member.strict_equal(&member.clone()));
}

#[test]
fn strict_equal_respects_union_order() {
    let ab = union_of(
        vec![CppType::number(TypeModifiers::empty()), CppType::string(TypeModifiers::empty())],
        TypeModifiers::empty(),
    );
    let ba = union_of(
        vec![CppType::string(TypeModifiers::empty()), CppType::number(TypeModifiers::empty())],
        TypeModifiers::empty(),
    );
    assert!(ab.equal(&ba));
    assert!(!ab.strict_equal(&ba));
}

#[test]
fn no_optional_and_no_property_strip_one_flag() {
    let ty = CppType::number(TypeModifiers::OPTIONAL | TypeModifiers::PROPERTY);
    assert!(!ty.no_optional().is_optional());
    assert!(ty.no_optional().is_property());
    assert!(!ty.no_property().is_property());
    assert!(ty.no_property().is_optional());
}

#[test]
fn trivially_destructible_categories() {
    assert!(CppType::void(TypeModifiers::empty()).is_trivially_destructible());
    assert!(CppType::null(TypeModifiers::empty()).is_trivially_destructible());
    assert!(CppType::number(TypeModifiers::empty()).is_trivially_destructible());
    assert!(!CppType::string(TypeModifiers::empty()).is_trivially_destructible());
    assert!(!class("Member").is_trivially_destructible());
}
