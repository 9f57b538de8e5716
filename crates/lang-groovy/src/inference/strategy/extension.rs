//! Extension methods from the catalog: `DefaultGroovyMethods` and friends,
//! plus whatever modules the classpath contributes.
//!
//! An extension method takes its receiver as the first parameter, so a call
//! `xs.each { }` is resolved as `each(xs, { })` against every candidate whose
//! `self` parameter accepts the receiver.

use super::{LookupStrategy, accessor_names, class_target, list_of, member_binding};
use crate::catalog::ExtensionMethod;
use crate::inference::closure::elements;
use crate::inference::context::{CallSelection, InferContext, LookupResult};
use crate::inference::core::subtyping::Assignability;
use crate::inference::core::type_system::GroovyTypeSystem;
use crate::inference::core::types::MemberInfo;
use crate::parser::{ExprId, ExprKind, UnaryOp};
use groovyscope_api::{Confidence, LookupOrigin, TypeBinding, TypeRef};

const ORIGIN: LookupOrigin = LookupOrigin::Extension;

pub struct ExtensionLookup;

impl LookupStrategy for ExtensionLookup {
    fn attempt(&self, expr: ExprId, ctx: &InferContext<'_>) -> Option<LookupResult> {
        match &ctx.unit.expr(expr).kind {
            ExprKind::Call {
                receiver,
                name,
                args,
                spread,
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
                let self_type = if *spread {
                    elements(ctx.ts, &receiver).single()
                } else {
                    receiver
                };
                if self_type.is_unknown() {
                    return None;
                }
                let arg_types = ctx.arg_types(args);
                let (binding, selection) = extension_call(ctx, &self_type, name, &arg_types)?;
                let binding = TypeBinding {
                    type_ref: if *spread {
                        list_of(binding.type_ref)
                    } else {
                        binding.type_ref
                    },
                    confidence: binding.confidence.min(confidence),
                    ..binding
                };
                Some(LookupResult::call(binding, selection))
            }
            ExprKind::Property {
                receiver,
                name,
                spread,
                ..
            } => {
                let receiver = ctx.infer(*receiver);
                if receiver.is_unknown() {
                    return None;
                }
                let self_type = if *spread {
                    elements(ctx.ts, &receiver.type_ref).single()
                } else {
                    receiver.type_ref.clone()
                };
                if self_type.is_unknown() {
                    return None;
                }
                let binding = extension_property(ctx, &self_type, name)?;
                Some(LookupResult::new(TypeBinding {
                    type_ref: if *spread {
                        list_of(binding.type_ref)
                    } else {
                        binding.type_ref
                    },
                    confidence: binding.confidence.min(receiver.confidence),
                    ..binding
                }))
            }
            ExprKind::Binary { op, lhs, rhs } => {
                let name = op.method_name()?;
                operator(ctx, *lhs, name, &[*rhs])
            }
            ExprKind::Index {
                receiver, index, ..
            } => operator(ctx, *receiver, "getAt", &[*index]),
            ExprKind::Unary { op, operand, .. } => {
                let name = match op {
                    UnaryOp::BitwiseNegate => "bitwiseNegate",
                    UnaryOp::Negate => "negative",
                    UnaryOp::Plus => "positive",
                    UnaryOp::Increment => "next",
                    UnaryOp::Decrement => "previous",
                    UnaryOp::Not => return None,
                };
                operator(ctx, *operand, name, &[])
            }
            _ => None,
        }
    }
}

/// An operator dispatched to the extension method it stands for
/// (`a << b` is `leftShift(a, b)`).
fn operator(
    ctx: &InferContext<'_>,
    operand: ExprId,
    name: &str,
    args: &[ExprId],
) -> Option<LookupResult> {
    let operand = ctx.infer(operand);
    if operand.is_unknown() {
        return None;
    }
    let arg_types = ctx.arg_types(args);
    let (binding, selection) = extension_call(ctx, &operand.type_ref, name, &arg_types)?;
    let binding = TypeBinding {
        confidence: binding.confidence.min(operand.confidence),
        ..binding
    };
    Some(LookupResult::call(binding, selection))
}

/// Resolve extension method `name` on `receiver`.
///
/// A class reference (`Class<X>`) first tries static extensions of `X`,
/// then instance extensions of `Class` itself. The first exact match wins,
/// otherwise the first inferred one.
pub(crate) fn extension_call(
    ctx: &InferContext<'_>,
    receiver: &TypeRef,
    name: &str,
    arg_types: &[TypeRef],
) -> Option<(TypeBinding, CallSelection)> {
    let candidates = ctx.catalog.candidates(name);
    if candidates.is_empty() {
        return None;
    }
    let mut groups: Vec<(TypeRef, Vec<&ExtensionMethod>)> = Vec::with_capacity(2);
    if let Some(target) = class_target(receiver) {
        let statics = candidates.iter().filter(|m| m.is_static_extension).collect();
        groups.push((target.clone(), statics));
    }
    let instance = candidates.iter().filter(|m| !m.is_static_extension).collect();
    groups.push((receiver.clone(), instance));

    let mut fallback = None;
    for (self_type, group) in groups {
        let Some(found) = select(ctx, &self_type, &group, arg_types) else {
            continue;
        };
        if found.0.confidence == Confidence::Exact {
            return Some(found);
        }
        fallback.get_or_insert(found);
    }
    fallback
}

fn select(
    ctx: &InferContext<'_>,
    self_type: &TypeRef,
    group: &[&ExtensionMethod],
    arg_types: &[TypeRef],
) -> Option<(TypeBinding, CallSelection)> {
    let applicable: Vec<&ExtensionMethod> = group
        .iter()
        .copied()
        .filter(|m| ctx.ts.assignability(self_type, &m.self_type) != Assignability::No)
        .collect();
    if applicable.is_empty() {
        return None;
    }
    let members: Vec<MemberInfo> = applicable.iter().map(|m| m.member.clone()).collect();
    let args: Vec<TypeRef> = std::iter::once(self_type.clone())
        .chain(arg_types.iter().cloned())
        .collect();
    let method = ctx.ts.resolve_method(&members, &args)?;
    let extension = applicable.iter().find(|m| m.member == method.member)?;
    tracing::trace!(
        "{}({}) resolved to {} from module {}",
        extension.name(),
        self_type,
        extension.declaring_type(),
        extension.module
    );
    let binding = member_binding(
        method.return_type(),
        extension.declaring_type(),
        ORIGIN,
        method.confidence,
    );
    let selection = CallSelection {
        method,
        receiver: self_type.clone(),
        shape: extension.closure.clone(),
        self_offset: 1,
    };
    Some((binding, selection))
}

/// Property `name` through an extension getter (`file.text` is
/// `getText(file)`), else an extension method of that name.
fn extension_property(ctx: &InferContext<'_>, receiver: &TypeRef, name: &str) -> Option<TypeBinding> {
    let accepts = |m: &ExtensionMethod| {
        !m.is_static_extension && ctx.ts.assignability(receiver, &m.self_type) != Assignability::No
    };
    for accessor in accessor_names(name) {
        let getters: Vec<MemberInfo> = ctx
            .catalog
            .candidates(&accessor)
            .iter()
            .filter(|m| m.member.params().len() == 1 && accepts(*m))
            .map(|m| m.member.clone())
            .collect();
        let Some(method) = ctx
            .ts
            .resolve_method(&getters, std::slice::from_ref(receiver))
        else {
            continue;
        };
        let ty = match method.return_type() {
            TypeRef::Var(_) => TypeRef::Unknown,
            ty => ty,
        };
        return Some(member_binding(
            ty,
            &method.member.declaring_type,
            ORIGIN,
            method.confidence,
        ));
    }

    let named: Vec<&ExtensionMethod> = ctx
        .catalog
        .candidates(name)
        .iter()
        .filter(|m| accepts(*m))
        .collect();
    let method = named
        .iter()
        .find(|m| ctx.ts.assignability(receiver, &m.self_type) == Assignability::Exact)
        .or_else(|| named.first())?;
    let ty = match &method.member.type_ref {
        TypeRef::Var(_) => TypeRef::Unknown,
        ty => ty.clone(),
    };
    Some(member_binding(
        ty,
        method.declaring_type(),
        ORIGIN,
        Confidence::Inferred,
    ))
}
