//! The `CppType` descriptor and its comparison lattice.
//!
//! A descriptor records everything the emitter needs to render a C++ type:
//! category tag, modifier flags, nested subtypes (union members, the array
//! element, generic type parameters), the immediate base class, the logical
//! namespace, and any template argument substitutions.
//!
//! | Category group | Members | Storage |
//! |----------------|---------|---------|
//! | object | array, functor, class, interface, super | pointer / GC handle |
//! | callable | functor, function, method | carries a [`Signature`] |
//! | scalar | void, null, undefined, primitive, string, … | inline value |

use bitflags::bitflags;
use indexmap::IndexMap;
use tscpp_common::{CompileError, CompileResult};

/// Category tag of a C++ type descriptor.
///
/// Determines both equality rules and emission strategy.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    Void,
    Null,
    Undefined,
    Primitive,
    String,
    Union,
    Array,
    Functor,
    Function,
    Method,
    Class,
    Interface,
    Namespace,
    External,
    Super,
    Template,
    Any,
}

bitflags! {
    /// Modifier flags of a C++ type descriptor.
    ///
    /// `NOT_FUNCTION` is a constructor-only hint: a function type bound into
    /// a variable/property/parameter slot becomes a functor. It is consumed
    /// by [`CppType::new`] and never stored.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct TypeModifiers: u16 {
        const VARIADIC = 1 << 0;
        const OPTIONAL = 1 << 1;
        const PROPERTY = 1 << 2;
        const STATIC = 1 << 3;
        const EXTERNAL = 1 << 4;
        const ELEMENT = 1 << 5;
        const PERSISTENT = 1 << 6;
        const NOT_FUNCTION = 1 << 7;
    }
}

/// Call signature carried by functor/function/method descriptors.
#[derive(Clone, Debug)]
pub struct Signature {
    pub return_type: CppType,
    pub parameters: Vec<CppType>,
}

impl Signature {
    pub fn new(return_type: CppType, parameters: Vec<CppType>) -> Self {
        Self {
            return_type,
            parameters,
        }
    }

    fn equal(&self, other: &Signature) -> bool {
        self.return_type.equal(&other.return_type)
            && self.parameters.len() == other.parameters.len()
            && self
                .parameters
                .iter()
                .zip(&other.parameters)
                .all(|(a, b)| a.equal(b))
    }
}

/// A resolved C++ type.
#[derive(Clone, Debug)]
pub struct CppType {
    pub name: String,
    pub category: TypeCategory,
    pub modifiers: TypeModifiers,
    /// Union members, the array element (always exactly one), or generic
    /// type parameters.
    pub types: Vec<CppType>,
    /// Immediate base class, object categories only.
    pub base: Option<Box<CppType>>,
    /// Logical namespace used for qualified name rendering.
    pub namespace: Option<String>,
    /// Descriptors substituted for a generic declaration's parameters.
    pub template_arguments: Option<Vec<CppType>>,
    /// Present for functor/function/method.
    pub signature: Option<Box<Signature>>,
    /// Present for interface: property name to type, insertion ordered.
    pub properties: IndexMap<String, CppType>,
}

impl CppType {
    /// Create a descriptor.
    ///
    /// The `any` category must go through [`CppType::any`]; a function
    /// category combined with `NOT_FUNCTION` is downgraded to functor.
    pub fn new(
        name: impl Into<String>,
        category: TypeCategory,
        modifiers: TypeModifiers,
    ) -> Self {
        debug_assert!(
            category != TypeCategory::Any,
            "the any category is fallible, use CppType::any"
        );
        let category = if category == TypeCategory::Function
            && modifiers.contains(TypeModifiers::NOT_FUNCTION)
        {
            TypeCategory::Functor
        } else {
            category
        };
        Self {
            name: name.into(),
            category,
            modifiers: modifiers - TypeModifiers::NOT_FUNCTION,
            types: Vec::new(),
            base: None,
            namespace: None,
            template_arguments: None,
            signature: None,
            properties: IndexMap::new(),
        }
    }

    /// The `any` type, permitted only for intentionally-unmodeled externals.
    pub fn any(name: impl Into<String>, modifiers: TypeModifiers) -> CompileResult<Self> {
        if !modifiers.contains(TypeModifiers::EXTERNAL) {
            return Err(CompileError::bare("The \"any\" type is not supported"));
        }
        let mut result = Self::new(name, TypeCategory::External, modifiers);
        result.category = TypeCategory::Any;
        Ok(result)
    }

    pub fn number(modifiers: TypeModifiers) -> Self {
        Self::new("double", TypeCategory::Primitive, modifiers)
    }

    pub fn boolean(modifiers: TypeModifiers) -> Self {
        Self::new("bool", TypeCategory::Primitive, modifiers)
    }

    pub fn string(modifiers: TypeModifiers) -> Self {
        let mut result = Self::new("String", TypeCategory::String, modifiers);
        result.namespace = Some(crate::RUNTIME_NAMESPACE.to_string());
        result
    }

    pub fn void(modifiers: TypeModifiers) -> Self {
        Self::new("void", TypeCategory::Void, modifiers)
    }

    pub fn null(modifiers: TypeModifiers) -> Self {
        Self::new("std::nullptr_t", TypeCategory::Null, modifiers)
    }

    pub fn undefined(modifiers: TypeModifiers) -> Self {
        Self::new("std::monostate", TypeCategory::Undefined, modifiers)
    }

    /// A callable descriptor. For function declarations the resolver
    /// replaces the empty name with the declared function name.
    pub fn callable(
        category: TypeCategory,
        return_type: CppType,
        parameters: Vec<CppType>,
        modifiers: TypeModifiers,
    ) -> Self {
        debug_assert!(matches!(
            category,
            TypeCategory::Functor | TypeCategory::Function | TypeCategory::Method
        ));
        let mut result = Self::new(String::new(), category, modifiers);
        result.signature = Some(Box::new(Signature::new(return_type, parameters)));
        result
    }

    /// A structural interface descriptor. Lives in the generated namespace;
    /// the registry assigns the canonical name.
    pub fn interface(
        name: impl Into<String>,
        properties: IndexMap<String, CppType>,
        modifiers: TypeModifiers,
    ) -> Self {
        let mut result = Self::new(name, TypeCategory::Interface, modifiers);
        result.namespace = Some(crate::GENERATED_NAMESPACE.to_string());
        result.properties = properties;
        result
    }

    pub fn is_variadic(&self) -> bool {
        self.modifiers.contains(TypeModifiers::VARIADIC)
    }

    pub fn is_optional(&self) -> bool {
        self.modifiers.contains(TypeModifiers::OPTIONAL)
    }

    pub fn is_property(&self) -> bool {
        self.modifiers.contains(TypeModifiers::PROPERTY)
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.contains(TypeModifiers::STATIC)
    }

    pub fn is_external(&self) -> bool {
        self.modifiers.contains(TypeModifiers::EXTERNAL)
    }

    pub fn is_element(&self) -> bool {
        self.modifiers.contains(TypeModifiers::ELEMENT)
    }

    pub fn is_persistent(&self) -> bool {
        self.modifiers.contains(TypeModifiers::PERSISTENT)
    }

    /// Check if this is the same type as `other`.
    ///
    /// Modifiers static/property/external/element/persistent are ignored.
    /// For object types the optional modifier does not affect the C++ type
    /// either, so it is ignored for them as well.
    pub fn equal(&self, other: &CppType) -> bool {
        if self.category != other.category {
            return false;
        }
        // Structural interfaces compare by property shape alone; the name is
        // a registry artifact.
        if self.category == TypeCategory::Interface {
            return self.properties.len() == other.properties.len()
                && self
                    .properties
                    .iter()
                    .all(|(name, ty)| other.properties.get(name).is_some_and(|o| ty.equal(o)));
        }
        if self.name != other.name
            || self.namespace != other.namespace
            || self.is_variadic() != other.is_variadic()
        {
            return false;
        }
        if !self.is_object() && self.is_optional() != other.is_optional() {
            return false;
        }
        match self.category {
            // Order-independent member equality in both directions.
            TypeCategory::Union => {
                self.types
                    .iter()
                    .all(|t| other.types.iter().any(|s| t.equal(s)))
                    && other
                        .types
                        .iter()
                        .all(|s| self.types.iter().any(|t| s.equal(t)))
            }
            TypeCategory::Functor | TypeCategory::Function | TypeCategory::Method => {
                match (&self.signature, &other.signature) {
                    (Some(a), Some(b)) => a.equal(b),
                    (None, None) => true,
                    _ => false,
                }
            }
            _ => true,
        }
    }

    /// Test whether the types are strictly equal in the context of C++.
    ///
    /// Used in the rare places where C++ requires two operands to have
    /// exactly the same type: an object held through `cppgc::Member` is a
    /// different type, and union member order matters.
    pub fn strict_equal(&self, other: &CppType) -> bool {
        if !self.equal(other) {
            return false;
        }
        if self.is_object() {
            return self.is_cppgc_member() == other.is_cppgc_member();
        }
        if self.category == TypeCategory::Union {
            return self.types.len() == other.types.len()
                && self
                    .types
                    .iter()
                    .zip(&other.types)
                    .all(|(a, b)| a.strict_equal(b));
        }
        true
    }

    /// Check if this type can be assigned from `source` directly in C++.
    pub fn assignable_with(&self, source: &CppType) -> bool {
        // Array depends on its element type.
        if self.category == TypeCategory::Array && source.category == TypeCategory::Array {
            return self.element_type().assignable_with(source.element_type());
        }
        // Object can always be assigned with null.
        if self.is_object() && source.category == TypeCategory::Null {
            return true;
        }
        // Derived class can be assigned to base class.
        if source.inherits_from(self) {
            return true;
        }
        // Union can be directly assigned with its subtype.
        if self.category == TypeCategory::Union && source.category != TypeCategory::Union {
            return self.types.iter().any(|t| t.assignable_with(source));
        }
        // Union accepts another union when every member is accepted.
        if self.category == TypeCategory::Union && source.category == TypeCategory::Union {
            return source.types.iter().all(|t| self.assignable_with(t));
        }
        // Optional type can be assigned with its non-optional form.
        if self.is_optional() && self.no_optional().equal(source) {
            return true;
        }
        self.equal(source)
    }

    /// Return whether this type inherits from `base`.
    pub fn inherits_from(&self, base: &CppType) -> bool {
        if !self.is_object() || !base.is_object() {
            return false;
        }
        match &self.base {
            Some(parent) => parent.equal(base) || parent.inherits_from(base),
            None => false,
        }
    }

    /// Whether this type can be trivially destructed.
    pub fn is_trivially_destructible(&self) -> bool {
        matches!(
            self.category,
            TypeCategory::Void | TypeCategory::Null | TypeCategory::Primitive
        )
    }

    /// Whether this type inherits from the runtime Object and is therefore
    /// stored as a pointer or GC handle rather than an inline value.
    pub fn is_object(&self) -> bool {
        matches!(
            self.category,
            TypeCategory::Array
                | TypeCategory::Functor
                | TypeCategory::Class
                | TypeCategory::Interface
                | TypeCategory::Super
        )
    }

    /// Whether this type, or any type it contains, is an object.
    pub fn has_object(&self) -> bool {
        if self.is_object() {
            return true;
        }
        if self.category == TypeCategory::Union {
            return self.types.iter().any(|t| t.has_object());
        }
        false
    }

    /// Whether this type, or any type it contains, depends on an unresolved
    /// generic parameter.
    pub fn has_template(&self) -> bool {
        if self.category == TypeCategory::Template {
            return true;
        }
        self.types.iter().any(|t| t.has_template())
    }

    /// Whether this type is represented by `std::optional`.
    ///
    /// Scalar optionals wrap the value; object optionals use a nullable
    /// pointer instead.
    pub fn is_std_optional(&self) -> bool {
        self.category != TypeCategory::Union
            && self.category != TypeCategory::Template
            && self.is_optional()
            && !self.has_object()
    }

    /// Whether this slot is wrapped by `cppgc::Member`.
    ///
    /// A member or element slot holding a GC-managed object must be held
    /// through a traced handle so the collector can discover it.
    pub fn is_cppgc_member(&self) -> bool {
        (self.is_object() || self.category == TypeCategory::Template)
            && (self.is_property() || self.is_element())
    }

    /// The element type of an array.
    pub fn element_type(&self) -> &CppType {
        debug_assert!(self.category == TypeCategory::Array, "only array has an element type");
        &self.types[0]
    }

    /// A copy of this type without the `optional` modifier.
    pub fn no_optional(&self) -> CppType {
        let mut result = self.clone();
        result.modifiers -= TypeModifiers::OPTIONAL;
        result
    }

    /// A copy of this type without the `property` modifier.
    pub fn no_property(&self) -> CppType {
        let mut result = self.clone();
        result.modifiers -= TypeModifiers::PROPERTY;
        result
    }
}

#[cfg(test)]
#[path = "../tests/type_tests.rs"]
mod tests;
