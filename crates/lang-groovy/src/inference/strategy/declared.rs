//! Variables, class references and the members types declare: script
//! classes, the builtin JDK table and static imports.

use super::{
    LookupStrategy, accessor_names, class_of, class_target, dispatch_type, list_of, member_binding,
    receiver_substitution, symbol_binding,
};
use crate::inference::closure::elements;
use crate::inference::context::{CallSelection, InferContext, LookupResult};
use crate::inference::core::type_system::GroovyTypeSystem;
use crate::inference::core::types::{MemberInfo, MemberKind, TypeRefExt};
use crate::inference::scope::SymbolKind;
use crate::parser::{ExprId, ExprKind};
use groovyscope_api::{Confidence, LookupOrigin, TypeBinding, TypeRef, names};

const ORIGIN: LookupOrigin = LookupOrigin::Declared;

pub struct DeclaredLookup;

impl LookupStrategy for DeclaredLookup {
    fn attempt(&self, expr: ExprId, ctx: &InferContext<'_>) -> Option<LookupResult> {
        match &ctx.unit.expr(expr).kind {
            ExprKind::Ident(name) => ident(ctx, expr, name).map(LookupResult::new),
            ExprKind::Property {
                receiver,
                name,
                spread,
                ..
            } => property(ctx, expr, *receiver, name, *spread).map(LookupResult::new),
            ExprKind::Call {
                receiver,
                name,
                args,
                spread,
                ..
            } => {
                let arg_types = ctx.arg_types(args);
                match receiver {
                    Some(receiver) => call(ctx, *receiver, name, &arg_types, *spread),
                    None => unqualified_call(ctx, expr, name, &arg_types),
                }
            }
            _ => None,
        }
    }
}

fn ident(ctx: &InferContext<'_>, expr: ExprId, name: &str) -> Option<TypeBinding> {
    if let Some((_, symbol)) = ctx.symbol(expr, name) {
        if matches!(symbol.kind, SymbolKind::ClosureParam { .. }) {
            return None;
        }
        let binding = symbol_binding(ctx, symbol);
        return (!binding.is_unknown()).then_some(binding);
    }
    if let Some(fqn) = ctx.ts.resolve_name(name) {
        return Some(class_reference(fqn));
    }
    if let Some(binding) = property_on(ctx, &ctx.owner_type(expr), name) {
        return Some(binding);
    }
    ctx.ts
        .static_imports()
        .iter()
        .filter(|import| import.member.as_deref().is_none_or(|m| m == name))
        .find_map(|import| member_property(ctx, &TypeRef::id(&import.class), name, true))
}

fn class_reference(fqn: String) -> TypeBinding {
    TypeBinding::exact(class_of(TypeRef::Id(fqn.clone())), fqn, ORIGIN)
}

fn property(
    ctx: &InferContext<'_>,
    expr: ExprId,
    receiver: ExprId,
    name: &str,
    spread: bool,
) -> Option<TypeBinding> {
    if let Some(dotted) = ctx.unit.dotted_name(expr) {
        let root = dotted.split('.').next().unwrap_or_default();
        if ctx.symbol(expr, root).is_none() {
            if let Some(fqn) = ctx.ts.resolve_name(&dotted) {
                return Some(class_reference(fqn));
            }
        }
    }

    let receiver = ctx.infer(receiver);
    if receiver.is_unknown() {
        return None;
    }
    let target = if spread {
        elements(ctx.ts, &receiver.type_ref).single()
    } else {
        receiver.type_ref.clone()
    };
    if target.is_unknown() {
        return None;
    }
    let binding = property_on(ctx, &target, name)?;
    Some(TypeBinding {
        type_ref: if spread {
            list_of(binding.type_ref)
        } else {
            binding.type_ref
        },
        confidence: binding.confidence.min(receiver.confidence),
        ..binding
    })
}

/// Property `name` read from a value of type `receiver`.
///
/// Tried in order: statics of a class reference, map values, fields, bean
/// getters, array `length`, and a method of that name.
pub(crate) fn property_on(
    ctx: &InferContext<'_>,
    receiver: &TypeRef,
    name: &str,
) -> Option<TypeBinding> {
    if let Some(target) = class_target(receiver) {
        if let Some(binding) = member_property(ctx, target, name, true) {
            return Some(binding);
        }
    }
    if receiver.is_array() && name == "length" {
        return Some(TypeBinding::exact(TypeRef::raw("int"), names::OBJECT, ORIGIN));
    }
    let receiver = dispatch_type(receiver);
    if let Some(map) = ctx.ts.as_super(&receiver, names::MAP) {
        let value = map
            .type_args()
            .get(1)
            .map(TypeRefExt::upper_bound)
            .unwrap_or(TypeRef::Unknown);
        return Some(member_binding(value, names::MAP, ORIGIN, Confidence::Exact));
    }
    member_property(ctx, &receiver, name, false)
}

fn member_property(
    ctx: &InferContext<'_>,
    receiver: &TypeRef,
    name: &str,
    statics_only: bool,
) -> Option<TypeBinding> {
    let fqn = receiver.fqn()?;
    let admits = |m: &MemberInfo| !statics_only || m.is_static();
    let seen_as = |m: &MemberInfo, confidence| {
        let m = m.substituted(&receiver_substitution(ctx.ts, receiver, &m.declaring_type));
        let ty = match m.type_ref {
            TypeRef::Var(_) => TypeRef::Unknown,
            ty => ty,
        };
        member_binding(ty, m.declaring_type, ORIGIN, confidence)
    };

    let named = ctx.ts.find_member_in_hierarchy(fqn, name);
    if let Some(field) = named
        .iter()
        .find(|m| m.kind == MemberKind::Field && admits(*m))
    {
        return Some(seen_as(field, Confidence::Exact));
    }
    for accessor in accessor_names(name) {
        let getter = ctx
            .ts
            .find_member_in_hierarchy(fqn, &accessor)
            .into_iter()
            .find(|m| m.is_method() && m.params().is_empty() && admits(m));
        if let Some(getter) = getter {
            return Some(seen_as(&getter, Confidence::Exact));
        }
    }
    let method = named.iter().find(|m| m.is_method() && admits(*m))?;
    Some(seen_as(method, Confidence::Inferred))
}

fn call(
    ctx: &InferContext<'_>,
    receiver: ExprId,
    name: &str,
    arg_types: &[TypeRef],
    spread: bool,
) -> Option<LookupResult> {
    let receiver = ctx.infer(receiver);
    if receiver.is_unknown() {
        return None;
    }
    let target = if spread {
        elements(ctx.ts, &receiver.type_ref).single()
    } else {
        receiver.type_ref.clone()
    };
    if target.is_unknown() {
        return None;
    }
    let (binding, selection) = method_on(ctx, &target, name, arg_types)?;
    let binding = TypeBinding {
        type_ref: if spread {
            list_of(binding.type_ref)
        } else {
            binding.type_ref
        },
        confidence: binding.confidence.min(receiver.confidence),
        ..binding
    };
    Some(LookupResult::call(binding, selection))
}

/// Calls without a receiver: closure variables, methods of the enclosing
/// class or script, then static imports.
fn unqualified_call(
    ctx: &InferContext<'_>,
    expr: ExprId,
    name: &str,
    arg_types: &[TypeRef],
) -> Option<LookupResult> {
    if let Some((_, symbol)) = ctx.symbol(expr, name) {
        let variable = symbol_binding(ctx, symbol);
        if variable.type_ref.fqn() == Some(names::CLOSURE) {
            let binding = match variable.type_ref.type_args().first() {
                Some(result) if variable.confidence == Confidence::Exact => {
                    TypeBinding::of_type(result.clone(), ORIGIN, Confidence::Exact)
                }
                _ => TypeBinding::of_type(TypeRef::object(), ORIGIN, Confidence::Inferred),
            };
            return Some(LookupResult::new(binding));
        }
    }

    let owner = ctx.owner_type(expr);
    if let Some((binding, selection)) = method_on(ctx, &owner, name, arg_types) {
        return Some(LookupResult::call(binding, selection));
    }
    ctx.ts
        .static_imports()
        .iter()
        .filter(|import| import.member.as_deref().is_none_or(|m| m == name))
        .find_map(|import| {
            let class = TypeRef::id(&import.class);
            let statics: Vec<MemberInfo> = ctx
                .ts
                .find_member_in_hierarchy(&import.class, name)
                .into_iter()
                .filter(|m| m.is_method() && m.is_static())
                .collect();
            select(ctx, &class, &statics, arg_types)
        })
        .map(|(binding, selection)| LookupResult::call(binding, selection))
}

/// Method `name` called on a value of type `receiver`. A class reference
/// offers the class's static methods before those of `java.lang.Class`.
pub(crate) fn method_on(
    ctx: &InferContext<'_>,
    receiver: &TypeRef,
    name: &str,
    arg_types: &[TypeRef],
) -> Option<(TypeBinding, CallSelection)> {
    if let Some(target) = class_target(receiver) {
        let statics: Vec<MemberInfo> = target
            .fqn()
            .map(|fqn| ctx.ts.find_member_in_hierarchy(fqn, name))
            .unwrap_or_default()
            .into_iter()
            .filter(|m| m.is_method() && m.is_static())
            .collect();
        if let Some(found) = select(ctx, target, &statics, arg_types) {
            return Some(found);
        }
    }
    let receiver = dispatch_type(receiver);
    let fqn = receiver.fqn()?;
    let candidates: Vec<MemberInfo> = ctx
        .ts
        .find_member_in_hierarchy(fqn, name)
        .into_iter()
        .filter(MemberInfo::is_method)
        .map(|m| m.substituted(&receiver_substitution(ctx.ts, &receiver, &m.declaring_type)))
        .collect();
    select(ctx, &receiver, &candidates, arg_types)
}

fn select(
    ctx: &InferContext<'_>,
    receiver: &TypeRef,
    candidates: &[MemberInfo],
    arg_types: &[TypeRef],
) -> Option<(TypeBinding, CallSelection)> {
    let method = ctx.ts.resolve_method(candidates, arg_types)?;
    let binding = member_binding(
        method.return_type(),
        &method.member.declaring_type,
        ORIGIN,
        method.confidence,
    );
    Some((binding, CallSelection::new(method, receiver.clone())))
}
