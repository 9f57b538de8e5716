//! Types fixed by the shape of the expression: literals, constructors,
//! operators on builtin operands, casts and closure parameters.

use super::LookupStrategy;
use crate::inference::closure;
use crate::inference::context::{InferContext, LookupResult};
use crate::inference::core::type_system::TypeProvider;
use crate::inference::scope::SymbolKind;
use crate::parser::{BinaryOp, ExprId, ExprKind, LiteralKind, MapKey, UnaryOp};
use groovyscope_api::{Confidence, LookupOrigin, TypeBinding, TypeRef, names};

const MATCHER: &str = "java.util.regex.Matcher";
const NUMBER: &str = "java.lang.Number";
const DOUBLE: &str = "java.lang.Double";

pub struct StructuralLookup;

impl LookupStrategy for StructuralLookup {
    fn attempt(&self, expr: ExprId, ctx: &InferContext<'_>) -> Option<LookupResult> {
        let binding = match &ctx.unit.expr(expr).kind {
            ExprKind::Literal(kind) => literal(*kind),
            ExprKind::List(items) => {
                let element = common_type(ctx, items.iter().copied());
                exact(TypeRef::generic(names::LIST, vec![element]))
            }
            ExprKind::Map(entries) => {
                let key = common_type_of(
                    entries.iter().map(|e| match &e.key {
                        MapKey::Name(_) => Some(TypeRef::string()),
                        MapKey::Expr(k) => known(ctx.infer(*k)),
                    }),
                );
                let value = common_type(ctx, entries.iter().map(|e| e.value));
                exact(TypeRef::generic(names::LINKED_HASH_MAP, vec![key, value]))
            }
            ExprKind::Closure { .. } => {
                let body = closure::body_binding(ctx, expr);
                let ty = if body.confidence == Confidence::Exact {
                    TypeRef::generic(names::CLOSURE, vec![body.type_ref.boxed()])
                } else {
                    TypeRef::id(names::CLOSURE)
                };
                exact(ty)
            }
            ExprKind::New { ty, .. } => {
                let ty = ctx.ts.resolve_type(ty, &[]);
                if ty.is_unknown() {
                    return None;
                }
                exact(ty)
            }
            ExprKind::Cast { ty, .. } => {
                let ty = ctx.ts.resolve_type(ty, &[]);
                if ty.is_unknown() {
                    return None;
                }
                exact(ty)
            }
            ExprKind::This => exact(ctx.owner_type(expr)),
            ExprKind::Super => {
                let owner = ctx.owner_type(expr);
                let parent = owner
                    .fqn()
                    .and_then(|fqn| ctx.ts.get_type_info(fqn))
                    .and_then(|info| info.superclass)
                    .unwrap_or_else(TypeRef::object);
                exact(parent)
            }
            ExprKind::Paren(inner) => ctx.infer(*inner),
            ExprKind::Binary { op, lhs, rhs } => binary(ctx, *op, *lhs, *rhs)?,
            ExprKind::Unary { op, operand, .. } => unary(ctx, *op, *operand)?,
            ExprKind::Assign { op, target, value } => match op {
                None => ctx.infer(*value),
                Some(_) => ctx.infer(*target),
            },
            ExprKind::Index { receiver, .. } => {
                let receiver = ctx.infer(*receiver);
                let component = receiver.type_ref.component()?;
                TypeBinding::of_type(component, LookupOrigin::Structural, receiver.confidence)
            }
            ExprKind::Ternary {
                cond,
                then,
                otherwise,
            } => ternary(ctx, *cond, *then, *otherwise),
            ExprKind::Ident(name) => match ctx.symbol(expr, name) {
                Some((_, symbol)) if matches!(symbol.kind, SymbolKind::ClosureParam { .. }) => {
                    super::symbol_binding(ctx, symbol)
                }
                _ => return None,
            },
            ExprKind::Property { .. } | ExprKind::Call { .. } | ExprKind::Error => return None,
        };
        if binding.is_unknown() {
            return None;
        }
        Some(LookupResult::new(binding))
    }
}

fn exact(ty: TypeRef) -> TypeBinding {
    TypeBinding::of_type(ty, LookupOrigin::Structural, Confidence::Exact)
}

fn known(binding: TypeBinding) -> Option<TypeRef> {
    (!binding.is_unknown()).then_some(binding.type_ref)
}

fn literal(kind: LiteralKind) -> TypeBinding {
    let fqn = match kind {
        LiteralKind::Integer => names::INTEGER,
        LiteralKind::Long => names::LONG,
        LiteralKind::BigInteger => names::BIG_INTEGER,
        LiteralKind::BigDecimal => names::BIG_DECIMAL,
        LiteralKind::Double => DOUBLE,
        LiteralKind::Float => "java.lang.Float",
        LiteralKind::String => names::STRING,
        LiteralKind::GString => names::GSTRING,
        LiteralKind::Boolean => names::BOOLEAN,
        LiteralKind::Null => {
            return TypeBinding::of_type(
                TypeRef::object(),
                LookupOrigin::Structural,
                Confidence::Inferred,
            );
        }
    };
    exact(TypeRef::id(fqn))
}

/// The element type shared by every item, `Object` when they differ.
fn common_type(ctx: &InferContext<'_>, items: impl Iterator<Item = ExprId>) -> TypeRef {
    common_type_of(items.map(|item| known(ctx.infer(item))))
}

fn common_type_of(types: impl Iterator<Item = Option<TypeRef>>) -> TypeRef {
    let mut common: Option<TypeRef> = None;
    for ty in types {
        let Some(ty) = ty.map(|t| t.boxed()) else {
            return TypeRef::object();
        };
        match &common {
            None => common = Some(ty),
            Some(c) if *c == ty => {}
            Some(_) => return TypeRef::object(),
        }
    }
    common.unwrap_or_else(TypeRef::object)
}

/// Builtin numeric types in promotion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Numeric {
    Integer,
    Long,
    BigInteger,
    BigDecimal,
    Float,
    Double,
}

impl Numeric {
    fn of(ty: &TypeRef) -> Option<Numeric> {
        let numeric = match ty.boxed().fqn()? {
            "java.lang.Byte" | "java.lang.Short" | names::INTEGER => Numeric::Integer,
            names::LONG => Numeric::Long,
            names::BIG_INTEGER => Numeric::BigInteger,
            names::BIG_DECIMAL => Numeric::BigDecimal,
            "java.lang.Float" => Numeric::Float,
            DOUBLE => Numeric::Double,
            _ => return None,
        };
        Some(numeric)
    }

    fn is_floating(self) -> bool {
        matches!(self, Numeric::Float | Numeric::Double)
    }

    fn is_integral(self) -> bool {
        matches!(self, Numeric::Integer | Numeric::Long | Numeric::BigInteger)
    }

    /// Result of `+ - *`. Floats promote to `Double`.
    fn promote(self, other: Numeric) -> &'static str {
        match self.max(other) {
            Numeric::Integer => names::INTEGER,
            Numeric::Long => names::LONG,
            Numeric::BigInteger => names::BIG_INTEGER,
            Numeric::BigDecimal => names::BIG_DECIMAL,
            Numeric::Float | Numeric::Double => DOUBLE,
        }
    }
}

fn is_string(ty: &TypeRef) -> bool {
    matches!(ty.fqn(), Some(names::STRING) | Some(names::GSTRING))
}

fn binary(ctx: &InferContext<'_>, op: BinaryOp, lhs: ExprId, rhs: ExprId) -> Option<TypeBinding> {
    match op {
        BinaryOp::RegexFind => return Some(exact(TypeRef::id(MATCHER))),
        BinaryOp::Compare => return Some(exact(TypeRef::id(names::INTEGER))),
        op if op.is_boolean() => return Some(exact(TypeRef::id(names::BOOLEAN))),
        BinaryOp::Range | BinaryOp::RangeExclusive => {
            let from = ctx.infer(lhs);
            let element = known(from).map(|t| t.boxed()).unwrap_or_else(TypeRef::object);
            return Some(exact(TypeRef::generic(names::RANGE, vec![element])));
        }
        _ => {}
    }

    let left = ctx.infer(lhs);
    if left.is_unknown() {
        return None;
    }
    let right = ctx.infer(rhs);
    if op == BinaryOp::Plus && is_string(&left.type_ref) {
        let confidence = if right.is_unknown() {
            Confidence::Exact
        } else {
            left.confidence.min(right.confidence)
        };
        return Some(TypeBinding::of_type(TypeRef::string(), LookupOrigin::Structural, confidence));
    }
    if right.is_unknown() {
        return None;
    }

    let (l, r) = (Numeric::of(&left.type_ref)?, Numeric::of(&right.type_ref)?);
    let fqn = match op {
        BinaryOp::Plus | BinaryOp::Minus | BinaryOp::Multiply => l.promote(r),
        BinaryOp::Divide if l.is_floating() || r.is_floating() => DOUBLE,
        BinaryOp::Divide => names::BIG_DECIMAL,
        BinaryOp::Modulo => l.promote(r),
        BinaryOp::Power if l.is_floating() || r.is_floating() => DOUBLE,
        BinaryOp::Power if l == Numeric::BigDecimal => names::BIG_DECIMAL,
        BinaryOp::Power => NUMBER,
        BinaryOp::BitAnd
        | BinaryOp::BitOr
        | BinaryOp::BitXor
        | BinaryOp::LeftShift
        | BinaryOp::RightShift
            if l.is_integral() && r.is_integral() =>
        {
            l.promote(r)
        }
        _ => return None,
    };
    Some(TypeBinding::of_type(
        TypeRef::id(fqn),
        LookupOrigin::Structural,
        left.confidence.min(right.confidence),
    ))
}

fn unary(ctx: &InferContext<'_>, op: UnaryOp, operand: ExprId) -> Option<TypeBinding> {
    if op == UnaryOp::Not {
        return Some(exact(TypeRef::id(names::BOOLEAN)));
    }
    let binding = ctx.infer(operand);
    if binding.is_unknown() {
        return None;
    }
    let numeric = Numeric::of(&binding.type_ref);
    let ty = match op {
        UnaryOp::BitwiseNegate if is_string(&binding.type_ref) => TypeRef::id(names::PATTERN),
        UnaryOp::BitwiseNegate if numeric.is_some_and(Numeric::is_integral) => binding.type_ref,
        UnaryOp::Negate | UnaryOp::Plus | UnaryOp::Increment | UnaryOp::Decrement
            if numeric.is_some() =>
        {
            binding.type_ref
        }
        _ => return None,
    };
    Some(TypeBinding::of_type(ty, LookupOrigin::Structural, binding.confidence))
}

fn ternary(
    ctx: &InferContext<'_>,
    cond: ExprId,
    then: Option<ExprId>,
    otherwise: ExprId,
) -> TypeBinding {
    let inferred_object =
        || TypeBinding::of_type(TypeRef::object(), LookupOrigin::Structural, Confidence::Inferred);
    let Some(then) = then else {
        // elvis: the condition's value when truthy
        let cond = ctx.infer(cond);
        return if cond.is_unknown() {
            ctx.infer(otherwise)
        } else {
            cond
        };
    };
    let (then, otherwise) = (ctx.infer(then), ctx.infer(otherwise));
    if then.is_unknown() || otherwise.is_unknown() || then.type_ref != otherwise.type_ref {
        return inferred_object();
    }
    TypeBinding::of_type(
        then.type_ref,
        LookupOrigin::Structural,
        then.confidence.min(otherwise.confidence),
    )
}
