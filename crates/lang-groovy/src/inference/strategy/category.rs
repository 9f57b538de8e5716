//! Methods that exist only at runtime: categories activated by
//! `use(Category) { ... }` and closures assigned through `Type.metaClass`.

use super::{LookupStrategy, accessor_names, class_target, member_binding};
use crate::inference::closure::enclosing_call;
use crate::inference::context::{CallSelection, InferContext, LookupResult};
use crate::inference::core::subtyping::Assignability;
use crate::inference::core::type_system::GroovyTypeSystem;
use crate::inference::core::types::MemberInfo;
use crate::parser::{ExprId, ExprKind};
use groovyscope_api::{Confidence, LookupOrigin, TypeBinding, TypeRef, names};

const ORIGIN: LookupOrigin = LookupOrigin::Category;

pub struct CategoryLookup;

impl LookupStrategy for CategoryLookup {
    fn attempt(&self, expr: ExprId, ctx: &InferContext<'_>) -> Option<LookupResult> {
        match &ctx.unit.expr(expr).kind {
            ExprKind::Call {
                receiver,
                name,
                args,
                ..
            } => {
                let (receiver, confidence) = match receiver {
                    Some(receiver) => {
                        let receiver = ctx.infer(*receiver);
                        if receiver.is_unknown() {
                            return None;
                        }
                        (receiver.type_ref, receiver.confidence)
                    }
                    None => (ctx.owner_type(expr), Confidence::Exact),
                };
                let arg_types = ctx.arg_types(args);
                if let Some((binding, selection)) =
                    category_call(ctx, expr, &receiver, name, &arg_types)
                {
                    let binding = TypeBinding {
                        confidence: binding.confidence.min(confidence),
                        ..binding
                    };
                    return Some(LookupResult::call(binding, selection));
                }
                metaclass_method(ctx, &receiver, name).map(LookupResult::new)
            }
            ExprKind::Property { receiver, name, .. } => {
                let receiver = ctx.infer(*receiver);
                if receiver.is_unknown() {
                    return None;
                }
                accessor_names(name).iter().find_map(|accessor| {
                    let binding = match category_call(ctx, expr, &receiver.type_ref, accessor, &[]) {
                        Some((binding, _)) => TypeBinding {
                            type_ref: match binding.type_ref {
                                TypeRef::Var(_) => TypeRef::object(),
                                ty => ty,
                            },
                            confidence: binding.confidence.min(receiver.confidence),
                            ..binding
                        },
                        None => metaclass_method(ctx, &receiver.type_ref, accessor)?,
                    };
                    Some(LookupResult::new(binding))
                })
            }
            _ => None,
        }
    }
}

/// Category classes in effect at `expr`, innermost `use` block first.
fn active_categories(ctx: &InferContext<'_>, expr: ExprId) -> Vec<String> {
    ctx.unit
        .enclosing_closures(expr)
        .filter_map(|closure| {
            let (call, _) = enclosing_call(ctx.unit, closure)?;
            match &ctx.unit.expr(call).kind {
                ExprKind::Call {
                    receiver: None,
                    name,
                    args,
                    ..
                } if name == "use" => Some(
                    args.iter()
                        .filter(|a| **a != closure)
                        .filter_map(|a| ctx.unit.dotted_name(*a))
                        .filter_map(|n| ctx.ts.resolve_name(&n))
                        .collect::<Vec<_>>(),
                ),
                _ => None,
            }
        })
        .flatten()
        .collect()
}

/// A static method of an active category taking the receiver as `self`.
fn category_call(
    ctx: &InferContext<'_>,
    expr: ExprId,
    receiver: &TypeRef,
    name: &str,
    arg_types: &[TypeRef],
) -> Option<(TypeBinding, CallSelection)> {
    let args: Vec<TypeRef> = std::iter::once(receiver.clone())
        .chain(arg_types.iter().cloned())
        .collect();
    active_categories(ctx, expr).into_iter().find_map(|category| {
        let candidates: Vec<MemberInfo> = ctx
            .ts
            .find_member_in_hierarchy(&category, name)
            .into_iter()
            .filter(|m| m.is_method() && m.is_static())
            .filter(|m| {
                m.params().first().is_some_and(|p| {
                    ctx.ts.assignability(receiver, &p.type_ref) != Assignability::No
                })
            })
            .collect();
        let method = ctx.ts.resolve_method(&candidates, &args)?;
        tracing::trace!("{} resolved through category {}", name, category);
        let binding = member_binding(
            method.return_type(),
            &method.member.declaring_type,
            ORIGIN,
            method.confidence,
        );
        let selection = CallSelection {
            self_offset: 1,
            ..CallSelection::new(method, receiver.clone())
        };
        Some((binding, selection))
    })
}

/// A closure assigned as `X.metaClass.name`, or `X.metaClass.static.name`
/// for calls on the class itself.
fn metaclass_method(ctx: &InferContext<'_>, receiver: &TypeRef, name: &str) -> Option<TypeBinding> {
    ctx.scopes
        .metaclass_additions()
        .iter()
        .filter(|addition| addition.name == name)
        .find_map(|addition| {
            let class = ctx
                .unit
                .dotted_name(addition.receiver)
                .and_then(|n| ctx.ts.resolve_name(&n))?;
            let target = TypeRef::Id(class.clone());
            let applies = if addition.is_static {
                class_target(receiver)
                    .is_some_and(|t| t.fqn() == Some(class.as_str()) || ctx.ts.is_subtype(t, &target))
            } else {
                receiver.fqn() != Some(names::CLASS)
                    && ctx.ts.assignability(receiver, &target) == Assignability::Exact
            };
            if !applies {
                return None;
            }
            let value = ctx.infer(addition.value);
            let ty = match value.type_ref.type_args().first() {
                Some(result)
                    if value.confidence == Confidence::Exact
                        && value.type_ref.fqn() == Some(names::CLOSURE) =>
                {
                    result.clone()
                }
                _ => TypeRef::object(),
            };
            Some(TypeBinding::inferred(ty, class, ORIGIN))
        })
}
