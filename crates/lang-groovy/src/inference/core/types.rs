//! Data structures for the type inference system.
//!
//! These are pure data types with no behavior logic.

use super::unification::Substitution;
use groovyscope_api::{TypeRef, names};

/// Helper trait for TypeRef operations
pub trait TypeRefExt {
    fn as_fqn(&self) -> Option<String>;

    /// The type a wildcard stands for when read: its upper bound, or
    /// `java.lang.Object` for `?` and `? super X`.
    fn upper_bound(&self) -> TypeRef;
}

impl TypeRefExt for TypeRef {
    fn as_fqn(&self) -> Option<String> {
        self.fqn().map(str::to_string)
    }

    fn upper_bound(&self) -> TypeRef {
        match self {
            TypeRef::Wildcard {
                bound: Some(bound),
                is_upper_bound: true,
            } => bound.upper_bound(),
            TypeRef::Wildcard { .. } => TypeRef::object(),
            other => other.clone(),
        }
    }
}

/// Information about a type (class, interface, trait, enum, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
    /// Fully qualified name, nested types joined with `$`
    pub fqn: String,
    pub kind: TypeKind,
    /// Generic type parameters, e.g., `<K, V>`
    pub type_parameters: Vec<TypeParameter>,
    /// Direct superclass; `None` for interfaces and `java.lang.Object`
    pub superclass: Option<TypeRef>,
    /// Directly implemented (or, for interfaces, extended) interfaces
    pub interfaces: Vec<TypeRef>,
}

impl TypeInfo {
    pub fn new(fqn: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            fqn: fqn.into(),
            kind,
            type_parameters: Vec::new(),
            superclass: None,
            interfaces: Vec::new(),
        }
    }

    pub fn is_interface(&self) -> bool {
        matches!(self.kind, TypeKind::Interface | TypeKind::Trait)
    }

    /// Direct supertypes, superclass first.
    pub fn supertypes(&self) -> impl Iterator<Item = &TypeRef> {
        self.superclass.iter().chain(self.interfaces.iter())
    }

    /// The type as seen from inside its own declaration (`List<E>`).
    pub fn self_type(&self) -> TypeRef {
        if self.type_parameters.is_empty() {
            TypeRef::id(&self.fqn)
        } else {
            TypeRef::generic(
                &self.fqn,
                self.type_parameters
                    .iter()
                    .map(|p| TypeRef::var(&p.name))
                    .collect(),
            )
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Interface,
    Trait,
    Enum,
    Primitive,
}

/// A generic type parameter declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParameter {
    /// Parameter name, e.g., "T"
    pub name: String,
    /// Upper bounds, e.g., `Comparable<T>` for `T extends Comparable<T>`
    pub bounds: Vec<TypeRef>,
}

impl TypeParameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bounds: Vec::new(),
        }
    }
}

/// Information about a member (field, method, constructor)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberInfo {
    /// Simple name, e.g., "get" or "size"
    pub name: String,
    pub kind: MemberKind,
    /// The type that declares this member (may differ from lookup type due to inheritance)
    pub declaring_type: String,
    /// Field type or method return type
    pub type_ref: TypeRef,
    /// Method parameters (None for fields)
    pub parameters: Option<Vec<ParameterInfo>>,
    /// Modifiers like `static` and `default`
    pub modifiers: Vec<String>,
    /// Method type parameters, e.g. `<T>` in `<T> T with(...)`
    pub type_parameters: Vec<TypeParameter>,
}

impl MemberInfo {
    /// Fully qualified member name, e.g., "java.util.List#get"
    pub fn fqn(&self) -> String {
        format!("{}#{}", self.declaring_type, self.name)
    }

    pub fn is_static(&self) -> bool {
        self.has_modifier("static")
    }

    pub fn is_default(&self) -> bool {
        self.has_modifier("default")
    }

    pub fn has_modifier(&self, modifier: &str) -> bool {
        self.modifiers.iter().any(|m| m == modifier)
    }

    pub fn is_method(&self) -> bool {
        self.kind == MemberKind::Method
    }

    pub fn params(&self) -> &[ParameterInfo] {
        self.parameters.as_deref().unwrap_or(&[])
    }

    pub fn is_varargs(&self) -> bool {
        self.params().last().is_some_and(|p| p.is_varargs)
    }

    /// Erased parameter types, used to detect identical signatures.
    pub fn erased_signature(&self) -> Vec<TypeRef> {
        self.params().iter().map(|p| p.type_ref.erasure()).collect()
    }

    /// A copy with `subst` applied to the return and parameter types.
    pub fn substituted(&self, subst: &Substitution) -> MemberInfo {
        if subst.is_empty() {
            return self.clone();
        }
        let mut member = self.clone();
        member.type_ref = subst.apply(&member.type_ref);
        if let Some(params) = &mut member.parameters {
            for p in params {
                p.type_ref = subst.apply(&p.type_ref);
            }
        }
        member
    }
}

/// Kind of member
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Field,
    Method,
    Constructor,
}

/// Information about a method parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterInfo {
    /// Parameter name (may be synthetic like "arg0")
    pub name: String,
    pub type_ref: TypeRef,
    /// True when this parameter is declared with `...` varargs syntax.
    pub is_varargs: bool,
}

impl ParameterInfo {
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
            is_varargs: false,
        }
    }
}

/// Context for type name resolution
#[derive(Debug, Clone, Default)]
pub struct TypeResolutionContext {
    /// Current package, e.g., "com.example"
    pub package: Option<String>,
    /// Single-type imports as (visible simple name, FQN), aliases included
    pub imports: Vec<(String, String)>,
    /// On-demand imports (`import java.util.regex.*`), package or outer class names
    pub star_imports: Vec<String>,
    /// Type parameters in scope (for generic methods/classes)
    pub type_parameters: Vec<String>,
    /// Types defined in the current file (FQN list)
    pub known_fqns: Vec<String>,
}

impl TypeResolutionContext {
    /// Packages searched for simple names after explicit imports.
    pub const DEFAULT_PACKAGES: &'static [&'static str] = &[
        "java.lang",
        "java.util",
        "java.io",
        "java.net",
        "groovy.lang",
        "groovy.util",
    ];

    /// Classes imported by default in every Groovy source.
    pub const DEFAULT_CLASSES: &'static [&'static str] = &[names::BIG_DECIMAL, names::BIG_INTEGER];
}
