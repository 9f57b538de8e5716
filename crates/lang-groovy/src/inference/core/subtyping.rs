//! Subtyping and Groovy argument assignability.
//!
//! Determines if one type is a subtype of another, and how an argument may
//! be passed to a parameter. Supports:
//! - Identity
//! - Primitives (widening, boxing, unboxing)
//! - Classes (extends) and interfaces (implements)
//! - Arrays (covariant for references, invariant for primitives)
//! - Groovy coercions (GString to String, closure to single-method interface)

use crate::inference::core::type_system::GroovyTypeSystem;
use crate::inference::core::types::{MemberInfo, MemberKind, TypeKind, TypeRefExt};
use groovyscope_api::{TypeRef, names};

/// How an argument may be passed to a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assignability {
    /// Subtype, boxing, unboxing or primitive widening
    Exact,
    /// Accepted through a Groovy runtime coercion, or the argument is unknown
    Coerced,
    No,
}

/// Check if `sub` is a subtype of `super_type`.
pub fn is_subtype<T: GroovyTypeSystem + ?Sized>(sub: &TypeRef, super_type: &TypeRef, ts: &T) -> bool {
    // 1. Reflexivity
    if sub == super_type {
        return true;
    }

    // 2. java.lang.Object is supertype of all reference types
    if super_type.fqn() == Some(names::OBJECT) && super_type.type_args().is_empty() {
        return !matches!(sub, TypeRef::Raw(_));
    }

    match (sub, super_type) {
        // Primitive widening
        (TypeRef::Raw(s1), TypeRef::Raw(s2)) => is_primitive_subtype(s1, s2),

        // Arrays (Covariant for references)
        (
            TypeRef::Array { .. },
            TypeRef::Array { .. },
        ) => match (sub.component(), super_type.component()) {
            (Some(e1), Some(e2)) if !e1.is_primitive() && !e2.is_primitive() => {
                is_subtype(&e1, &e2, ts)
            }
            (Some(e1), Some(e2)) => e1 == e2,
            _ => false,
        },

        // Class/Interface hierarchy, generics compared by erasure
        _ => match (sub.fqn(), super_type.fqn()) {
            (Some(sub_id), Some(super_id)) => is_class_subtype(sub_id, super_id, ts),
            _ => false,
        },
    }
}

/// How an argument of type `arg` may be passed where `param` is expected.
pub fn assignability<T: GroovyTypeSystem + ?Sized>(
    arg: &TypeRef,
    param: &TypeRef,
    ts: &T,
) -> Assignability {
    let param = param.upper_bound();
    match (arg, &param) {
        (TypeRef::Unknown, _) | (TypeRef::Var(_), _) => return Assignability::Coerced,
        (_, TypeRef::Var(_)) | (_, TypeRef::Unknown) => return Assignability::Exact,
        _ => {}
    }

    if arg.erasure() == param.erasure() {
        return Assignability::Exact;
    }
    if param.fqn() == Some(names::OBJECT) {
        return Assignability::Exact;
    }

    match (arg, &param) {
        (TypeRef::Raw(a), TypeRef::Raw(p)) => {
            return if is_primitive_subtype(a, p) {
                Assignability::Exact
            } else {
                Assignability::No
            };
        }
        (TypeRef::Raw(_), _) => return assignability(&arg.boxed(), &param, ts),
        (_, TypeRef::Raw(p)) => {
            return match arg.unboxed() {
                Some(TypeRef::Raw(a)) if a == *p || is_primitive_subtype(&a, p) => {
                    Assignability::Exact
                }
                _ => Assignability::No,
            };
        }
        (TypeRef::Array { .. }, TypeRef::Array { .. }) => {
            return if is_subtype(&arg.erasure(), &param.erasure(), ts) {
                Assignability::Exact
            } else {
                Assignability::No
            };
        }
        (TypeRef::Array { .. }, _) | (_, TypeRef::Array { .. }) => return Assignability::No,
        _ => {}
    }

    let (Some(arg_fqn), Some(param_fqn)) = (arg.fqn(), param.fqn()) else {
        return Assignability::No;
    };
    if is_class_subtype(arg_fqn, param_fqn, ts) {
        return Assignability::Exact;
    }
    if let (Some(TypeRef::Raw(a)), Some(TypeRef::Raw(p))) = (arg.unboxed(), param.unboxed()) {
        if is_primitive_subtype(&a, &p) {
            return Assignability::Coerced;
        }
    }
    if arg_fqn == names::GSTRING && param_fqn == names::STRING {
        return Assignability::Coerced;
    }
    if arg_fqn == names::CLOSURE && is_sam_type(param_fqn, ts) {
        return Assignability::Coerced;
    }
    Assignability::No
}

/// An interface with exactly one abstract method, counting inherited ones.
pub fn is_sam_type<T: GroovyTypeSystem + ?Sized>(fqn: &str, ts: &T) -> bool {
    sam_method(fqn, ts).is_some()
}

/// The single abstract method of a functional interface, searched through
/// the interface and its ancestors (excluding `java.lang.Object`).
pub fn sam_method<T: GroovyTypeSystem + ?Sized>(fqn: &str, ts: &T) -> Option<MemberInfo> {
    let info = ts.get_type_info(fqn)?;
    if info.kind != TypeKind::Interface {
        return None;
    }
    let mut abstract_methods: Vec<MemberInfo> = Vec::new();
    let types = std::iter::once(fqn.to_string())
        .chain(ts.walk_ancestors(fqn))
        .filter(|t| t != names::OBJECT);
    for owner in types {
        for member in ts.get_all_members(&owner) {
            if member.kind != MemberKind::Method || member.is_static() || member.is_default() {
                continue;
            }
            let duplicate = abstract_methods.iter().any(|m| {
                m.name == member.name && m.params().len() == member.params().len()
            });
            if !duplicate {
                abstract_methods.push(member);
            }
        }
    }
    if abstract_methods.len() == 1 {
        abstract_methods.pop()
    } else {
        None
    }
}

fn is_primitive_subtype(sub: &str, sup: &str) -> bool {
    match sub {
        "byte" => matches!(sup, "short" | "int" | "long" | "float" | "double"),
        "short" => matches!(sup, "int" | "long" | "float" | "double"),
        "char" => matches!(sup, "int" | "long" | "float" | "double"),
        "int" => matches!(sup, "long" | "float" | "double"),
        "long" => matches!(sup, "float" | "double"),
        "float" => matches!(sup, "double"),
        _ => false,
    }
}

fn is_class_subtype<T: GroovyTypeSystem + ?Sized>(sub_fqn: &str, super_fqn: &str, ts: &T) -> bool {
    if sub_fqn == super_fqn {
        return true;
    }

    // BFS search up the hierarchy
    ts.walk_ancestors(sub_fqn).any(|ancestor| ancestor == super_fqn)
}
