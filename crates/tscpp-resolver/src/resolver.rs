//! The resolution algorithm.
//!
//! `resolve_type` evaluates a fixed precedence ladder once the source type
//! at a site is known:
//!
//! 1. Externally-modeled Node.js runtime objects (fixed allowlist)
//! 2. Literal types, collapsed to their general primitive
//! 3. Unions (literal-only unions collapse; `undefined` folds into the
//!    `optional` flag)
//! 4. Type parameters
//! 5. Builtin scalars
//! 6. Arrays
//! 7. Namespace imports and builtin singleton interfaces
//! 8. Classes and constructor types
//! 9. Callables (functor vs method vs function by declaration kind)
//! 10. Structural interfaces, deduplicated through the registry
//! 11. Anything else is a fatal resolution error
//!
//! Sites without an explicit type annotation resolve through every
//! reachable root declaration; plural results merge into one union.

use indexmap::IndexMap;
use smallvec::SmallVec;
use tracing::trace;
use tscpp_common::{CompileError, CompileResult};
use tscpp_front::{
    DeclId, DeclKind, Hint, NodeId, SigId, SourceIndex, SourceType, SymbolId, TypeId, parse_hints,
};
use tscpp_syntax::{CppType, InterfaceRegistry, NODEJS_NAMESPACE, TypeCategory, TypeModifiers};

/// Resolves source types to C++ type descriptors.
///
/// Holds the project-scoped interface registry; one resolver instance lives
/// for the whole compilation.
pub struct TypeResolver<'a> {
    index: &'a SourceIndex,
    pub interfaces: InterfaceRegistry,
}

impl<'a> TypeResolver<'a> {
    pub fn new(index: &'a SourceIndex) -> Self {
        Self {
            index,
            interfaces: InterfaceRegistry::new(),
        }
    }

    /// Resolve the type of the expression or declaration at `node`.
    ///
    /// Relies on the checker type directly when there is no declaration or
    /// a builtin is involved; otherwise resolves through the declarations
    /// so modifier inference sees the original binding sites.
    pub fn resolve_node_type(&mut self, node: NodeId) -> CompileResult<CppType> {
        let index = self.index;
        trace!(node = node.0, text = %index.node(node).text, "resolve_node_type");
        let decls = self.original_declarations(node);
        let use_checker_type = match &decls {
            None => true,
            Some(decls) => decls.iter().any(|d| index.is_builtin_declaration(*d)),
        };
        if use_checker_type {
            let ty = self.checked_type_at(node)?;
            return self.resolve_type_at(ty, node, None);
        }
        let decls = decls.unwrap_or_default();
        let mut results: Vec<CppType> = Vec::new();
        for decl in decls {
            let modifiers = self.type_modifiers(Some(decl));
            let mut types = self.type_nodes(decl)?;
            // Unknown type parameters defeat declaration-driven resolution;
            // fall back to the checker's already-instantiated type.
            if types.iter().any(|t| self.has_type_parameter(*t)) {
                types = vec![self.checked_type_at(node)?];
            }
            for ty in types {
                results.push(self.resolve_type_at(ty, node, Some(modifiers))?);
            }
        }
        // Some symbols have multiple declarations that resolve to the same
        // C++ type; keep one of each.
        let mut unique: Vec<CppType> = Vec::new();
        for ty in results {
            if !unique.iter().any(|u| u.equal(&ty)) {
                unique.push(ty);
            }
        }
        Self::merge_types(unique)
    }

    /// Resolve the type of `symbol` as seen from `location`.
    pub fn resolve_symbol_type(
        &mut self,
        symbol: SymbolId,
        location: NodeId,
        modifiers: Option<TypeModifiers>,
    ) -> CompileResult<CppType> {
        let index = self.index;
        let Some(ty) = index.type_of_symbol_at(symbol, location) else {
            return Err(CompileError::unimplemented(
                &index.node(location).text,
                format!(
                    "Can not resolve the type of symbol \"{}\"",
                    index.symbol(symbol).name
                ),
            ));
        };
        self.resolve_type_at(ty, location, modifiers)
    }

    /// Resolve a type, attributing any failure to `location`.
    pub fn resolve_type_at(
        &mut self,
        ty: TypeId,
        location: NodeId,
        modifiers: Option<TypeModifiers>,
    ) -> CompileResult<CppType> {
        let text = self.index.node(location).text.clone();
        self.resolve_type(ty, Some(location), modifiers)
            .map_err(|error| CompileError::rewrap(text, error))
    }

    /// Resolve a source type to a C++ type.
    pub fn resolve_type(
        &mut self,
        ty: TypeId,
        location: Option<NodeId>,
        modifiers: Option<TypeModifiers>,
    ) -> CompileResult<CppType> {
        let index = self.index;
        // Node.js runtime objects bypass general inference.
        if index.is_nodejs_type(ty) {
            if let Some(result) = self.resolve_nodejs_type(ty, location) {
                return Ok(result);
            }
        }
        let m = modifiers.unwrap_or_default();
        match index.source_type(ty).clone() {
            // Literal precision is not retained in C++.
            SourceType::NumberLiteral(_) | SourceType::Number => Ok(CppType::number(m)),
            SourceType::StringLiteral(_) | SourceType::String => Ok(CppType::string(m)),
            SourceType::BooleanLiteral(_) | SourceType::Boolean => Ok(CppType::boolean(m)),
            SourceType::Union(members) => {
                let name = index.type_to_string(ty);
                self.resolve_union_type(name, &members, location, modifiers)
            }
            SourceType::TypeParameter(name) => {
                Ok(CppType::new(name, TypeCategory::Template, m))
            }
            SourceType::Void | SourceType::Never => Ok(CppType::void(m)),
            SourceType::Null => Ok(CppType::null(m)),
            SourceType::Undefined => Ok(CppType::undefined(m)),
            SourceType::Any | SourceType::Unknown => {
                CppType::any(index.type_to_string(ty), m)
            }
            SourceType::Array(element) => {
                let name = index.type_to_string(ty);
                self.resolve_array_type(name, element, location, m)
            }
            SourceType::ModuleImports(symbol) | SourceType::BuiltinInterface(symbol) => {
                let mut result = CppType::new(
                    index.symbol(symbol).name.clone(),
                    TypeCategory::Namespace,
                    TypeModifiers::empty(),
                );
                result.namespace = self.type_namespace(ty);
                Ok(result)
            }
            SourceType::Class(class) => self.resolve_class_type(&class, location, m),
            SourceType::Function(signatures) => {
                let Some(location) = location else {
                    return Err(CompileError::bare(
                        "Functions can only be parsed knowing its location",
                    ));
                };
                let Some(signature) = signatures.first() else {
                    return Err(CompileError::bare("Function type has no call signature"));
                };
                self.resolve_signature_type(*signature, location, modifiers)
            }
            SourceType::Interface(interface) => {
                self.resolve_interface_type(interface.symbol, &interface.properties, location, m)
            }
        }
    }

    /// Resolve a call signature into a functor/function/method type.
    pub fn resolve_signature_type(
        &mut self,
        sig: SigId,
        location: NodeId,
        mut modifiers: Option<TypeModifiers>,
    ) -> CompileResult<CppType> {
        let index = self.index;
        let data = index.signature(sig).clone();
        // Tell whether this is a function, functor, or method.
        let mut namespace = None;
        let category = match data.declaration {
            Some(decl) => {
                namespace = self.namespace_from_declarations(&[decl]);
                match index.decl(decl).kind {
                    DeclKind::FunctionExpression
                    | DeclKind::Arrow
                    | DeclKind::FunctionTypeNode => TypeCategory::Functor,
                    DeclKind::Method | DeclKind::MethodSignature => {
                        // We need to know whether the method is static.
                        if modifiers.is_none() {
                            modifiers = Some(self.type_modifiers(Some(decl)));
                        }
                        TypeCategory::Method
                    }
                    _ => TypeCategory::Function,
                }
            }
            // Likely a function parameter.
            None => TypeCategory::Functor,
        };
        let return_type = self.resolve_type(data.return_type, Some(location), None)?;
        let parameters = self.resolve_signature_parameters(&data.parameters, location)?;
        let mut result = CppType::callable(
            category,
            return_type,
            parameters,
            modifiers.unwrap_or_default(),
        );
        // Function declarations are named by their function name.
        if let Some(decl) = data.declaration {
            let d = index.decl(decl);
            if d.kind == DeclKind::Function && !d.name.is_empty() {
                result.name = d.name.clone();
            }
        }
        result.namespace = namespace;
        result.types = data
            .type_params
            .iter()
            .map(|p| self.resolve_type(*p, None, None))
            .collect::<CompileResult<Vec<_>>>()?;
        if let Some(args) = &data.type_args {
            result.template_arguments = Some(
                args.iter()
                    .map(|a| self.resolve_type(*a, None, None))
                    .collect::<CompileResult<Vec<_>>>()?,
            );
        }
        Ok(result)
    }

    /// Resolve the types of signature parameters at the call location.
    fn resolve_signature_parameters(
        &mut self,
        parameters: &[SymbolId],
        location: NodeId,
    ) -> CompileResult<Vec<CppType>> {
        let index = self.index;
        parameters
            .iter()
            .map(|parameter| {
                // Modifiers come from the parameter's original declaration.
                let modifiers = self.type_modifiers(index.symbol(*parameter).value_declaration);
                self.resolve_symbol_type(*parameter, location, Some(modifiers))
            })
            .collect()
    }

    /// Resolve a class (or constructor) type.
    fn resolve_class_type(
        &mut self,
        class: &tscpp_front::ClassType,
        location: Option<NodeId>,
        modifiers: TypeModifiers,
    ) -> CompileResult<CppType> {
        let index = self.index;
        let mut result = CppType::new(
            index.symbol(class.symbol).name.clone(),
            TypeCategory::Class,
            modifiers,
        );
        result.namespace = self.namespace_from_declarations(&index.symbol(class.symbol).declarations);
        if let Some(base) = class.base {
            result.base = Some(Box::new(self.resolve_type(base, None, None)?));
        }
        result.types = class
            .type_params
            .iter()
            .map(|p| self.resolve_type(*p, location, None))
            .collect::<CompileResult<Vec<_>>>()?;
        if let Some(args) = &class.type_args {
            result.template_arguments = Some(
                args.iter()
                    .map(|a| self.resolve_type(*a, location, None))
                    .collect::<CompileResult<Vec<_>>>()?,
            );
        }
        Ok(result)
    }

    /// Resolve a structural interface type and register it.
    fn resolve_interface_type(
        &mut self,
        symbol: SymbolId,
        properties: &[SymbolId],
        location: Option<NodeId>,
        modifiers: TypeModifiers,
    ) -> CompileResult<CppType> {
        let index = self.index;
        let Some(location) = location else {
            return Err(CompileError::bare(
                "Can not parse interface type without location",
            ));
        };
        if properties.is_empty() {
            return Err(CompileError::bare(
                "Empty interface means any and is not supported",
            ));
        }
        let mut resolved = IndexMap::new();
        for property in properties {
            let ty =
                self.resolve_symbol_type(*property, location, Some(TypeModifiers::PROPERTY))?;
            resolved.insert(index.symbol(*property).name.clone(), ty);
        }
        let candidate = CppType::interface(
            index.symbol(symbol).name.clone(),
            resolved,
            modifiers,
        );
        Ok(self.interfaces.register(candidate))
    }

    /// Resolve a union type.
    fn resolve_union_type(
        &mut self,
        name: String,
        members: &[TypeId],
        location: Option<NodeId>,
        modifiers: Option<TypeModifiers>,
    ) -> CompileResult<CppType> {
        let index = self.index;
        let m = modifiers.unwrap_or_default();
        // Literal unions only enumerate values; they are a single type.
        if members
            .iter()
            .all(|t| index.source_type(*t).is_number_literal())
        {
            return Ok(CppType::number(m));
        }
        if members
            .iter()
            .all(|t| index.source_type(*t).is_string_literal())
        {
            return Ok(CppType::string(m));
        }
        if members
            .iter()
            .all(|t| index.source_type(*t).is_boolean_like())
        {
            return Ok(CppType::boolean(m));
        }
        // Add each unique member. Only the storage-relevant modifiers
        // propagate into members.
        let member_modifiers = m & (TypeModifiers::PROPERTY | TypeModifiers::ELEMENT);
        let mut has_undefined = false;
        let mut result = CppType::new(name, TypeCategory::Union, m);
        for member in members {
            let subtype = self.resolve_type(*member, location, Some(member_modifiers))?;
            if subtype.category == TypeCategory::Undefined {
                has_undefined = true;
            }
            if !result.types.iter().any(|s| s.equal(&subtype)) {
                result.types.push(subtype);
            }
        }
        if has_undefined {
            // "T | undefined" is an optional T, not a union.
            if result.types.len() == 2 {
                if let Some(only) = result
                    .types
                    .iter()
                    .find(|t| t.category != TypeCategory::Undefined)
                {
                    result = only.clone();
                }
            }
            result.modifiers |= TypeModifiers::OPTIONAL;
        }
        // An optional union never lists undefined as an alternative.
        if result.category == TypeCategory::Union && result.is_optional() {
            result
                .types
                .retain(|t| t.category != TypeCategory::Undefined);
        }
        Ok(result)
    }

    /// Resolve an array type.
    fn resolve_array_type(
        &mut self,
        name: String,
        element: TypeId,
        location: Option<NodeId>,
        modifiers: TypeModifiers,
    ) -> CompileResult<CppType> {
        let mut result = CppType::new(name, TypeCategory::Array, modifiers);
        result.types.push(self.resolve_type(
            element,
            location,
            Some(TypeModifiers::ELEMENT | modifiers),
        )?);
        Ok(result)
    }

    /// A fixed allowlist of Node.js runtime objects the C++ runtime models.
    fn resolve_nodejs_type(&mut self, ty: TypeId, location: Option<NodeId>) -> Option<CppType> {
        let index = self.index;
        let symbol = index.symbol_of_type(ty);
        let mut result = match index.source_type(ty) {
            SourceType::Class(_) | SourceType::Interface(_) => {
                let name = &index.symbol(symbol?).name;
                match name.as_str() {
                    "Process" => Some(CppType::new(
                        "Process",
                        TypeCategory::Class,
                        TypeModifiers::empty(),
                    )),
                    "Console" => Some(CppType::new(
                        "Console",
                        TypeCategory::Class,
                        TypeModifiers::empty(),
                    )),
                    _ => None,
                }
            }
            SourceType::Function(_) => {
                // The gc() intrinsic.
                if index.node(location?).text == "gc" {
                    Some(CppType::callable(
                        TypeCategory::Function,
                        CppType::void(TypeModifiers::empty()),
                        Vec::new(),
                        TypeModifiers::empty(),
                    ))
                } else {
                    None
                }
            }
            _ => None,
        };
        if let Some(result) = &mut result {
            result.namespace = Some(NODEJS_NAMESPACE.to_string());
            result.modifiers |= TypeModifiers::EXTERNAL;
        }
        result
    }

    /// Merge plural resolution results into one type.
    ///
    /// Structurally-identical access paths can statically resolve to
    /// multiple declarations (narrowing through a union of objects); the
    /// merged result is the flattened union of everything found.
    fn merge_types(mut types: Vec<CppType>) -> CompileResult<CppType> {
        if types.len() == 1 {
            return Ok(types.swap_remove(0));
        }
        let mut members: Vec<CppType> = Vec::new();
        for ty in types {
            if ty.category == TypeCategory::Union {
                for member in ty.types {
                    if !members.iter().any(|m| m.equal(&member)) {
                        members.push(member);
                    }
                }
            } else if !members.iter().any(|m| m.equal(&ty)) {
                members.push(ty);
            }
        }
        match members.len() {
            0 => Err(CompileError::bare("Can not resolve type from declarations")),
            1 => Ok(members.swap_remove(0)),
            _ => {
                let name = members
                    .iter()
                    .map(|m| m.name.clone())
                    .collect::<Vec<_>>()
                    .join(" | ");
                let mut result =
                    CppType::new(name, TypeCategory::Union, TypeModifiers::empty());
                result.types = members;
                Ok(result)
            }
        }
    }

    /// Infer the type modifiers from a declaration.
    pub fn type_modifiers(&self, decl: Option<DeclId>) -> TypeModifiers {
        let index = self.index;
        let Some(decl) = decl else {
            return TypeModifiers::empty();
        };
        let d = index.decl(decl);
        let mut modifiers = TypeModifiers::empty();
        // A function bound into a value slot becomes a functor.
        if d.kind.binds_value_slot() {
            modifiers |= TypeModifiers::NOT_FUNCTION;
        }
        if d.kind.is_property_like() {
            modifiers |= TypeModifiers::PROPERTY;
        }
        if (d.kind.is_property_like() || d.kind.is_method_like()) && self.is_static_property(decl)
        {
            modifiers |= TypeModifiers::STATIC;
        }
        if d.kind == DeclKind::Parameter && d.is_rest {
            modifiers |= TypeModifiers::VARIADIC;
        }
        if let Some(comment) = &d.leading_comment {
            for hint in parse_hints(comment) {
                if hint == Hint::Persistent {
                    modifiers |= TypeModifiers::PERSISTENT;
                }
            }
        }
        // Optional when explicitly marked, or when the type is inferred and
        // every root declaration is optional.
        let roots = self.root_declarations(decl);
        if d.has_question_token
            || (!d.has_type_node()
                && roots
                    .iter()
                    .all(|r| index.decl(*r).has_question_token))
        {
            modifiers |= TypeModifiers::OPTIONAL;
        }
        // External when any root declaration lives in an ambient file.
        if roots.iter().any(|r| index.is_external_declaration(*r)) {
            modifiers |= TypeModifiers::EXTERNAL;
        }
        modifiers
    }

    /// Validate that a function-like declaration closes over nothing.
    pub fn forbid_closure(&self, func: DeclId) -> CompileResult<()> {
        crate::captures::forbid_closure(self.index, func)
    }

    // =========================================================================
    // Declaration digging
    // =========================================================================

    /// The type ids that determine the type of a declaration.
    ///
    /// An explicit annotation wins; otherwise the initializer's declarations
    /// are followed transitively, falling back to the checker's type of the
    /// initializer expression.
    fn type_nodes(&self, decl: DeclId) -> CompileResult<Vec<TypeId>> {
        let index = self.index;
        let d = index.decl(decl);
        if matches!(
            d.kind,
            DeclKind::Variable | DeclKind::Property | DeclKind::Parameter
        ) {
            if let Some(ty) = d.declared_type {
                return Ok(vec![ty]);
            }
            if let Some(initializer) = d.initializer {
                return match self.original_declarations(initializer) {
                    None => Ok(vec![self.checked_type_at(initializer)?]),
                    Some(decls) => {
                        let mut result = Vec::new();
                        for decl in decls {
                            result.extend(self.type_nodes(decl)?);
                        }
                        Ok(result)
                    }
                };
            }
            return Err(CompileError::unimplemented(
                &d.text,
                "Can not find type or initializer in the declaration",
            ));
        }
        match d.self_type {
            Some(ty) => Ok(vec![ty]),
            None => Err(CompileError::unimplemented(
                &d.text,
                "No type information at declaration",
            )),
        }
    }

    /// The root declarations that decide the type of a declaration.
    ///
    /// For `let a = object.prop` this returns the declaration of
    /// `prop: type`.
    fn root_declarations(&self, decl: DeclId) -> SmallVec<[DeclId; 1]> {
        let index = self.index;
        let d = index.decl(decl);
        if matches!(
            d.kind,
            DeclKind::Variable | DeclKind::Property | DeclKind::Parameter
        ) && d.declared_type.is_none()
        {
            if let Some(initializer) = d.initializer {
                if let Some(decls) = self.original_declarations(initializer) {
                    return decls
                        .into_iter()
                        .flat_map(|d| self.root_declarations(d))
                        .collect();
                }
            }
        }
        SmallVec::from_elem(decl, 1)
    }

    /// The declarations behind the symbol at a node, digging across imports.
    fn original_declarations(&self, node: NodeId) -> Option<Vec<DeclId>> {
        let index = self.index;
        let symbol = index.symbol_at(node)?;
        let declarations = &index.symbol(symbol).declarations;
        if declarations.is_empty() {
            return None;
        }
        // Imported symbols resolve through the imported file.
        if declarations
            .iter()
            .all(|d| index.decl(*d).kind == DeclKind::ImportSpecifier)
        {
            let ty = index.type_at(node)?;
            let target = index.symbol_of_type(ty)?;
            let value = index.symbol(target).value_declaration?;
            return Some(vec![value]);
        }
        Some(declarations.to_vec())
    }

    // =========================================================================
    // Namespaces
    // =========================================================================

    fn type_namespace(&self, ty: TypeId) -> Option<String> {
        let index = self.index;
        let symbol = index.symbol_of_type(ty)?;
        let declarations = &index.symbol(symbol).declarations;
        if declarations.is_empty() {
            return None;
        }
        self.namespace_from_declarations(declarations)
    }

    fn namespace_from_declarations(&self, decls: &[DeclId]) -> Option<String> {
        let index = self.index;
        // With multiple declarations, ignore the ones from the DOM library.
        // That happens a lot for "console".
        let chosen = if decls.len() == 1 {
            Some(decls[0])
        } else {
            decls
                .iter()
                .copied()
                .find(|d| index.file(index.decl(*d).file).origin != tscpp_front::FileOrigin::DomLib)
        }?;
        let file = index.file(index.decl(chosen).file);
        // A single-file project's own code has no namespace.
        if self.user_file_count() == 1 && !file.is_declaration {
            return None;
        }
        file.namespace.clone()
    }

    fn user_file_count(&self) -> usize {
        let index = self.index;
        (0..index.file_count())
            .filter(|i| {
                index.file(tscpp_front::FileId(*i as u32)).origin == tscpp_front::FileOrigin::User
            })
            .count()
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn checked_type_at(&self, node: NodeId) -> CompileResult<TypeId> {
        let index = self.index;
        index.type_at(node).ok_or_else(|| {
            CompileError::unimplemented(&index.node(node).text, "No type information at location")
        })
    }

    /// Whether the type or its subtypes has unresolved type parameters.
    fn has_type_parameter(&self, ty: TypeId) -> bool {
        let index = self.index;
        match index.source_type(ty) {
            SourceType::TypeParameter(_) => true,
            SourceType::Union(members) => members.iter().any(|m| self.has_type_parameter(*m)),
            SourceType::Array(element) => self.has_type_parameter(*element),
            _ => false,
        }
    }

    /// Whether a member declaration should be treated as static.
    ///
    /// Some types are interfaces in the source but are modeled as classes
    /// in C++ (detected via construct signatures); their members become
    /// static.
    fn is_static_property(&self, decl: DeclId) -> bool {
        let index = self.index;
        let d = index.decl(decl);
        if d.is_static {
            return true;
        }
        let Some(parent) = d.parent_type else {
            return false;
        };
        matches!(
            index.source_type(parent),
            SourceType::Class(class) if class.is_constructor
        )
    }
}
