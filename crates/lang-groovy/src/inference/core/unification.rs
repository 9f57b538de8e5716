//! Type unification and substitution.
//!
//! Binds method type variables from argument types so that generic return
//! types like `<T> T with(U self, Closure<T> c)` can be instantiated.

use super::type_system::GroovyTypeSystem;
use super::types::{MemberInfo, TypeRefExt};
use groovyscope_api::TypeRef;
use std::collections::HashMap;

/// A map from type variables to concrete types.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Substitution {
    map: HashMap<String, TypeRef>,
}

impl Substitution {
    /// Create a new empty substitution.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, TypeRef)>) -> Self {
        Self {
            map: pairs.into_iter().collect(),
        }
    }

    /// Add a mapping.
    pub fn insert(&mut self, var: String, ty: TypeRef) {
        self.map.insert(var, ty);
    }

    pub fn get(&self, var: &str) -> Option<&TypeRef> {
        self.map.get(var)
    }

    pub fn contains(&self, var: &str) -> bool {
        self.map.contains_key(var)
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Merge `other` in; bindings already present win.
    pub fn extend(&mut self, other: &Substitution) {
        for (var, ty) in &other.map {
            self.map.entry(var.clone()).or_insert_with(|| ty.clone());
        }
    }

    /// Apply this substitution to a type. Unbound variables stay as they are.
    pub fn apply(&self, ty: &TypeRef) -> TypeRef {
        match ty {
            TypeRef::Var(name) => self.map.get(name).cloned().unwrap_or_else(|| ty.clone()),
            TypeRef::Array {
                element,
                dimensions,
            } => {
                let mut out = self.apply(element);
                for _ in 0..*dimensions {
                    out = TypeRef::array_of(out);
                }
                out
            }
            TypeRef::Generic { base, args } => TypeRef::Generic {
                base: Box::new(self.apply(base)),
                args: args.iter().map(|arg| self.apply(arg)).collect(),
            },
            TypeRef::Wildcard {
                bound: Some(bound),
                is_upper_bound,
            } => TypeRef::Wildcard {
                bound: Some(Box::new(self.apply(bound))),
                is_upper_bound: *is_upper_bound,
            },
            // Primitives and others remain unchanged
            _ => ty.clone(),
        }
    }
}

/// Infer the method type variables of `member` from the argument types.
///
/// Only variables declared by the method are bound; the first binding found
/// for a variable wins. Unknown arguments bind nothing.
pub fn infer_type_args<T: GroovyTypeSystem + ?Sized>(
    ts: &T,
    member: &MemberInfo,
    arg_types: &[TypeRef],
) -> Substitution {
    let mut subst = Substitution::new();
    if member.type_parameters.is_empty() {
        return subst;
    }
    let vars: Vec<&str> = member
        .type_parameters
        .iter()
        .map(|p| p.name.as_str())
        .collect();

    let params = member.params();
    for (i, arg) in arg_types.iter().enumerate() {
        let Some(param) = params.get(i).or_else(|| params.last().filter(|p| p.is_varargs))
        else {
            break;
        };
        let expected = match (&param.type_ref, param.is_varargs && !arg.is_array()) {
            (TypeRef::Array { .. }, true) => param.type_ref.component().unwrap_or(TypeRef::Unknown),
            (ty, _) => ty.clone(),
        };
        bind(ts, &expected, arg, &vars, &mut subst);
    }
    subst
}

/// Bind variables in `param` against the concrete `arg`.
pub fn bind<T: GroovyTypeSystem + ?Sized>(
    ts: &T,
    param: &TypeRef,
    arg: &TypeRef,
    vars: &[&str],
    subst: &mut Substitution,
) {
    if arg.is_unknown() {
        return;
    }
    match param {
        TypeRef::Var(name) if vars.contains(&name.as_str()) => {
            if !subst.contains(name) {
                subst.insert(name.clone(), arg.boxed());
            }
        }
        TypeRef::Wildcard {
            bound: Some(bound), ..
        } => bind(ts, bound, arg, vars, subst),
        TypeRef::Array { .. } => {
            if let (Some(p_elem), Some(a_elem)) = (param.component(), arg.component()) {
                bind(ts, &p_elem, &a_elem, vars, subst);
            }
        }
        TypeRef::Generic { args: p_args, .. } => {
            let Some(base) = param.fqn() else {
                return;
            };
            let Some(view) = ts.as_super(arg, base) else {
                return;
            };
            for (p, a) in p_args.iter().zip(view.type_args()) {
                bind(ts, p, &a.upper_bound(), vars, subst);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use groovyscope_api::names;

    #[test]
    fn test_apply_replaces_vars_inside_generics_and_arrays() {
        let subst = Substitution::from_pairs([("T".to_string(), TypeRef::string())]);
        let list = TypeRef::generic(names::LIST, vec![TypeRef::var("T")]);
        assert_eq!(subst.apply(&list).to_string(), "java.util.List<java.lang.String>");

        let arr = TypeRef::array_of(TypeRef::var("T"));
        assert_eq!(subst.apply(&arr).to_string(), "java.lang.String[]");

        let unbound = TypeRef::var("U");
        assert_eq!(subst.apply(&unbound), unbound);
    }

    #[test]
    fn test_array_substitution_flattens_dimensions() {
        let subst = Substitution::from_pairs([(
            "T".to_string(),
            TypeRef::array_of(TypeRef::raw("int")),
        )]);
        let arr = TypeRef::array_of(TypeRef::var("T"));
        assert_eq!(subst.apply(&arr).to_string(), "int[][]");
    }
}
