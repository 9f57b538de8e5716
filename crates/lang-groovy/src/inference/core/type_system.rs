//! Core trait definitions for the type system abstraction.
//!
//! These traits abstract away the data source, allowing the inference
//! engine to work with the builtin table, script declarations, or mock
//! implementations.

use super::subtyping::{Assignability, assignability};
use super::types::{MemberInfo, ParameterInfo, TypeInfo, TypeRefExt, TypeResolutionContext};
use super::unification::{Substitution, infer_type_args};
use groovyscope_api::{Confidence, TypeRef, names};
use std::collections::{HashSet, VecDeque};

/// Provides type information by FQN.
///
/// This is the primary way to look up type metadata.
pub trait TypeProvider {
    /// Get type info for a fully qualified name.
    ///
    /// Returns `None` if the type is not found.
    fn get_type_info(&self, fqn: &str) -> Option<TypeInfo>;

    /// Resolve a simple or qualified type name to its FQN.
    ///
    /// Uses the provided context (imports, package) to resolve the name.
    fn resolve_type_name(&self, name: &str, context: &TypeResolutionContext) -> Option<String>;
}

/// Provides inheritance relationship information.
pub trait InheritanceProvider {
    /// Direct supertypes as declared, superclass first.
    fn supertypes(&self, fqn: &str) -> Vec<TypeRef>;

    /// Walk all ancestor types (superclasses and interfaces) in BFS order.
    ///
    /// `java.lang.Object` is always yielded last for reference types.
    fn walk_ancestors(&self, fqn: &str) -> Box<dyn Iterator<Item = String> + '_> {
        let mut seen: HashSet<String> = HashSet::from([fqn.to_string()]);
        let mut queue: VecDeque<String> = VecDeque::from([fqn.to_string()]);
        let mut order = Vec::new();
        while let Some(current) = queue.pop_front() {
            for parent in self.supertypes(&current) {
                let Some(parent) = parent.as_fqn() else {
                    continue;
                };
                if parent != names::OBJECT && seen.insert(parent.clone()) {
                    order.push(parent.clone());
                    queue.push_back(parent);
                }
            }
        }
        if fqn != names::OBJECT && !TypeRef::is_primitive_name(fqn) {
            order.push(names::OBJECT.to_string());
        }
        Box::new(order.into_iter())
    }
}

/// Provides member (field/method) lookup.
///
/// This is used to find members within a single type (not walking inheritance).
pub trait MemberProvider {
    /// Find all members directly declared in the given type with the matching name.
    ///
    /// Does NOT search the inheritance hierarchy.
    fn get_members(&self, type_fqn: &str, member_name: &str) -> Vec<MemberInfo>;

    /// Get all members directly declared in the given type.
    fn get_all_members(&self, type_fqn: &str) -> Vec<MemberInfo>;
}

/// The overload chosen for a call, with how sure the choice is.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodMatch {
    pub member: MemberInfo,
    /// `Exact` when every argument matched without coercion
    pub confidence: Confidence,
    /// Method type variables bound from the arguments
    pub substitution: Substitution,
}

impl MethodMatch {
    /// Return type with method type variables substituted.
    pub fn return_type(&self) -> TypeRef {
        self.substitution.apply(&self.member.type_ref)
    }

    /// Declared type of parameter `index` after substitution.
    pub fn param_type(&self, index: usize) -> Option<TypeRef> {
        self.member
            .params()
            .get(index)
            .map(|p| self.substitution.apply(&p.type_ref))
    }
}

/// The combined type system interface.
///
/// Provides a unified facade for type inference operations.
/// Includes a default implementation for hierarchy search.
pub trait GroovyTypeSystem: TypeProvider + InheritanceProvider + MemberProvider {
    /// Find every member with the name along the hierarchy, closest type
    /// first. Overrides (same erased signature) hide inherited members.
    fn find_member_in_hierarchy(&self, type_fqn: &str, member_name: &str) -> Vec<MemberInfo> {
        let mut found: Vec<MemberInfo> = Vec::new();
        let types = std::iter::once(type_fqn.to_string()).chain(self.walk_ancestors(type_fqn));
        for fqn in types {
            for member in self.get_members(&fqn, member_name) {
                let hidden = found.iter().any(|f| {
                    f.kind == member.kind && f.erased_signature() == member.erased_signature()
                });
                if !hidden {
                    found.push(member);
                }
            }
        }
        found
    }

    /// View `ty` as its supertype `target_fqn`, carrying type arguments
    /// through parameterised supertypes (`ArrayList<String>` as `Iterable`
    /// is `Iterable<String>`). Raw types yield unknown arguments.
    fn as_super(&self, ty: &TypeRef, target_fqn: &str) -> Option<TypeRef> {
        let start = match ty {
            TypeRef::Raw(_) => ty.boxed(),
            TypeRef::Id(_) | TypeRef::Generic { .. } => ty.clone(),
            _ => return None,
        };
        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([start]);
        while let Some(current) = queue.pop_front() {
            let Some(fqn) = current.as_fqn() else {
                continue;
            };
            if fqn == target_fqn {
                return Some(current);
            }
            if !seen.insert(fqn.clone()) {
                continue;
            }
            let Some(info) = self.get_type_info(&fqn) else {
                continue;
            };
            let args = current.type_args();
            let subst = Substitution::from_pairs(info.type_parameters.iter().enumerate().map(
                |(i, p)| {
                    let arg = args.get(i).cloned().unwrap_or(TypeRef::Unknown);
                    (p.name.clone(), arg)
                },
            ));
            for parent in info.supertypes() {
                queue.push_back(subst.apply(parent));
            }
        }
        if target_fqn == names::OBJECT {
            return Some(TypeRef::object());
        }
        None
    }

    /// Resolve the best matching method among candidates based on argument types.
    ///
    /// Phases, first non-empty wins: fixed arity with exact arguments, fixed
    /// arity allowing Groovy coercions, varargs exact, varargs with
    /// coercions. When nothing is type-compatible the first candidate of the
    /// same arity (or the first declared) is returned as an inferred guess.
    fn resolve_method(&self, candidates: &[MemberInfo], arg_types: &[TypeRef]) -> Option<MethodMatch> {
        if candidates.is_empty() {
            return None;
        }

        let exact = |arg: &TypeRef, p: &TypeRef| self.assignability(arg, p) == Assignability::Exact;
        let loose = |arg: &TypeRef, p: &TypeRef| self.assignability(arg, p) != Assignability::No;

        let phases: [(&dyn Fn(&[ParameterInfo]) -> bool, Confidence); 4] = [
            (
                &|params: &[ParameterInfo]| matches_fixed_arity(params, arg_types, exact),
                Confidence::Exact,
            ),
            (
                &|params: &[ParameterInfo]| matches_fixed_arity(params, arg_types, loose),
                Confidence::Inferred,
            ),
            (
                &|params: &[ParameterInfo]| matches_varargs_arity(params, arg_types, exact),
                Confidence::Exact,
            ),
            (
                &|params: &[ParameterInfo]| matches_varargs_arity(params, arg_types, loose),
                Confidence::Inferred,
            ),
        ];

        for (matches, confidence) in phases {
            let matching = collect_matching_candidates(candidates, matches);
            if let Some(member) = select_most_specific(self, matching, arg_types) {
                let substitution = infer_type_args(self, &member, arg_types);
                return Some(MethodMatch {
                    member,
                    confidence,
                    substitution,
                });
            }
        }

        // No type-compatible candidate: fall back to the first declared.
        let member = candidates
            .iter()
            .find(|c| c.params().len() == arg_types.len())
            .unwrap_or(&candidates[0])
            .clone();
        tracing::debug!(
            "No type-compatible overload of '{}' for {} argument(s); using first declared in {}",
            member.name,
            arg_types.len(),
            member.declaring_type
        );
        let substitution = infer_type_args(self, &member, arg_types);
        Some(MethodMatch {
            member,
            confidence: Confidence::Inferred,
            substitution,
        })
    }

    /// How an argument of type `arg` may be passed where `param` is expected.
    fn assignability(&self, arg: &TypeRef, param: &TypeRef) -> Assignability {
        assignability(arg, param, self)
    }

    /// Check if sub is a subtype of super_type.
    ///
    /// Delegates to `subtyping::is_subtype` logic.
    fn is_subtype(&self, sub: &TypeRef, super_type: &TypeRef) -> bool {
        super::subtyping::is_subtype(sub, super_type, self)
    }
}

// Blanket implementation: any type implementing all three traits gets GroovyTypeSystem
impl<T: TypeProvider + InheritanceProvider + MemberProvider> GroovyTypeSystem for T {}

fn matches_fixed_arity<F>(params: &[ParameterInfo], arg_types: &[TypeRef], matches: F) -> bool
where
    F: Fn(&TypeRef, &TypeRef) -> bool,
{
    if params.len() != arg_types.len() {
        return false;
    }

    params
        .iter()
        .zip(arg_types.iter())
        .all(|(p, a)| matches(a, &p.type_ref))
}

fn matches_varargs_arity<F>(params: &[ParameterInfo], arg_types: &[TypeRef], matches: F) -> bool
where
    F: Fn(&TypeRef, &TypeRef) -> bool,
{
    let Some(last_param) = params.last() else {
        return false;
    };

    if !last_param.is_varargs {
        return false;
    }

    let Some(element) = last_param.type_ref.component() else {
        return false;
    };

    let fixed_count = params.len() - 1;
    if arg_types.len() < fixed_count {
        return false;
    }

    // Prefix arguments (before varargs tail)
    if !params[..fixed_count]
        .iter()
        .zip(arg_types[..fixed_count].iter())
        .all(|(p, a)| matches(a, &p.type_ref))
    {
        return false;
    }

    // No varargs arguments provided
    if arg_types.len() == fixed_count {
        return true;
    }

    // Direct array pass-through: foo(String[]) called with one String[] argument.
    if arg_types.len() == params.len() && matches(&arg_types[fixed_count], &last_param.type_ref) {
        return true;
    }

    // Expanded varargs: foo(String...) called with N String arguments.
    arg_types[fixed_count..].iter().all(|a| matches(a, &element))
}

fn collect_matching_candidates(
    candidates: &[MemberInfo],
    matches: &dyn Fn(&[ParameterInfo]) -> bool,
) -> Vec<MemberInfo> {
    candidates
        .iter()
        .filter(|cand| cand.parameters.as_deref().is_some_and(matches))
        .cloned()
        .collect()
}

fn select_most_specific<T: GroovyTypeSystem + ?Sized>(
    ts: &T,
    candidates: Vec<MemberInfo>,
    arg_types: &[TypeRef],
) -> Option<MemberInfo> {
    if candidates.len() <= 1 {
        return candidates.into_iter().next();
    }

    let scores: Vec<i32> = candidates
        .iter()
        .enumerate()
        .map(|(i, cand)| {
            candidates
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, other)| {
                    let cand_more_specific = is_more_specific_than(ts, cand, other, arg_types);
                    let other_more_specific = is_more_specific_than(ts, other, cand, arg_types);
                    match (cand_more_specific, other_more_specific) {
                        (true, false) => 1,
                        (false, true) => -1,
                        _ => 0,
                    }
                })
                .sum()
        })
        .collect();

    // strictly greater keeps the first declared on ties
    let mut best_idx = 0usize;
    for (i, score) in scores.iter().enumerate() {
        if *score > scores[best_idx] {
            best_idx = i;
        }
    }
    let ties = scores.iter().filter(|s| **s == scores[best_idx]).count();
    if ties > 1 {
        tracing::debug!(
            "Ambiguous overload of '{}': {} candidates tie, using first declared in {}",
            candidates[best_idx].name,
            ties,
            candidates[best_idx].declaring_type
        );
    }

    candidates.into_iter().nth(best_idx)
}

fn is_more_specific_than<T: GroovyTypeSystem + ?Sized>(
    ts: &T,
    left: &MemberInfo,
    right: &MemberInfo,
    arg_types: &[TypeRef],
) -> bool {
    let Some(left_types) = effective_param_types(left, arg_types.len()) else {
        return false;
    };
    let Some(right_types) = effective_param_types(right, arg_types.len()) else {
        return false;
    };
    if left_types.len() != right_types.len() {
        return false;
    }

    let mut strict = false;
    for (l, r) in left_types.iter().zip(right_types.iter()) {
        let (l, r) = (l.erasure(), r.erasure());
        if l == r {
            continue;
        }
        if ts.is_subtype(&l, &r) {
            strict = true;
        } else {
            return false;
        }
    }
    strict
}

fn effective_param_types(member: &MemberInfo, arg_count: usize) -> Option<Vec<TypeRef>> {
    let params = member.parameters.as_ref()?;
    let Some(last) = params.last() else {
        return Some(vec![]);
    };

    if !last.is_varargs || params.len() == arg_count {
        if params.len() == arg_count {
            return Some(params.iter().map(|p| p.type_ref.clone()).collect());
        }
        return None;
    }

    let element = last.type_ref.component()?;
    let fixed_count = params.len() - 1;
    if arg_count < fixed_count {
        return None;
    }

    let mut types = Vec::with_capacity(arg_count);
    for p in &params[..fixed_count] {
        types.push(p.type_ref.clone());
    }
    for _ in fixed_count..arg_count {
        types.push(element.clone());
    }
    Some(types)
}
