//! Lookup strategies.
//!
//! Each strategy implements [`LookupStrategy`]: it either does not apply to
//! an expression (`None`) or produces a binding. The chain tries them in the
//! order of [`Strategy::CHAIN`].

mod category;
mod declared;
mod extension;
mod structural;

pub use category::CategoryLookup;
pub use declared::DeclaredLookup;
pub use extension::ExtensionLookup;
pub use structural::StructuralLookup;

use crate::inference::adapters::ScriptTypeSystem;
use crate::inference::closure::{self, elements};
use crate::inference::context::{InferContext, LookupResult};
use crate::inference::core::type_system::{GroovyTypeSystem, TypeProvider};
use crate::inference::core::types::TypeRefExt;
use crate::inference::core::unification::Substitution;
use crate::inference::scope::{Symbol, SymbolKind};
use crate::parser::ExprId;
use groovyscope_api::{Confidence, LookupOrigin, TypeBinding, TypeRef, names};

/// A type lookup strategy.
pub trait LookupStrategy {
    /// Attempt to bind the expression.
    ///
    /// Returns `None` if this strategy doesn't apply or finds nothing.
    fn attempt(&self, expr: ExprId, ctx: &InferContext<'_>) -> Option<LookupResult>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Structural,
    Declared,
    Extension,
    Category,
}

impl Strategy {
    /// Priority order of the lookup chain.
    pub const CHAIN: [Strategy; 4] = [
        Strategy::Structural,
        Strategy::Declared,
        Strategy::Extension,
        Strategy::Category,
    ];

    pub fn origin(self) -> LookupOrigin {
        match self {
            Strategy::Structural => LookupOrigin::Structural,
            Strategy::Declared => LookupOrigin::Declared,
            Strategy::Extension => LookupOrigin::Extension,
            Strategy::Category => LookupOrigin::Category,
        }
    }

    pub fn attempt(self, expr: ExprId, ctx: &InferContext<'_>) -> Option<LookupResult> {
        match self {
            Strategy::Structural => StructuralLookup.attempt(expr, ctx),
            Strategy::Declared => DeclaredLookup.attempt(expr, ctx),
            Strategy::Extension => ExtensionLookup.attempt(expr, ctx),
            Strategy::Category => CategoryLookup.attempt(expr, ctx),
        }
    }
}

/// Binding of a variable at its declaration.
pub fn symbol_binding(ctx: &InferContext<'_>, symbol: &Symbol) -> TypeBinding {
    let declared = |ty: TypeRef, confidence| {
        if ty.is_unknown() {
            TypeBinding::unknown()
        } else {
            TypeBinding::of_type(ty, LookupOrigin::Declared, confidence)
        }
    };
    match &symbol.kind {
        SymbolKind::Declared(ty) => declared(ty.clone(), Confidence::Exact),
        SymbolKind::Initializer(init) | SymbolKind::Binding(init) => {
            let init = ctx.infer(*init);
            declared(init.type_ref, init.confidence)
        }
        SymbolKind::Untyped => declared(TypeRef::object(), Confidence::Inferred),
        SymbolKind::ForIn(iterable) => {
            let iterable = ctx.infer(*iterable);
            if iterable.is_unknown() {
                return TypeBinding::unknown();
            }
            declared(
                elements(ctx.ts, &iterable.type_ref).single(),
                Confidence::Inferred,
            )
        }
        SymbolKind::ClosureParam { closure, index } => closure::param_binding(ctx, *closure, *index),
    }
}

/// A member's binding; an unresolvable type is `Object`, inferred.
pub(crate) fn member_binding(
    type_ref: TypeRef,
    declaring: impl Into<String>,
    origin: LookupOrigin,
    confidence: Confidence,
) -> TypeBinding {
    if type_ref.is_unknown() {
        TypeBinding::new(TypeRef::object(), declaring, origin, Confidence::Inferred)
    } else {
        TypeBinding::new(type_ref, declaring, origin, confidence)
    }
}

/// Class type variables of `declaring` as seen through `receiver`
/// (`E` is `String` for members of `List` called on `ArrayList<String>`).
pub(crate) fn receiver_substitution(
    ts: &ScriptTypeSystem,
    receiver: &TypeRef,
    declaring: &str,
) -> Substitution {
    let Some(info) = ts.get_type_info(declaring) else {
        return Substitution::new();
    };
    if info.type_parameters.is_empty() {
        return Substitution::new();
    }
    let view = ts.as_super(receiver, declaring);
    let args = view.as_ref().map(TypeRef::type_args).unwrap_or(&[]);
    Substitution::from_pairs(info.type_parameters.iter().enumerate().map(|(i, p)| {
        let arg = args.get(i).map(TypeRefExt::upper_bound).unwrap_or(TypeRef::Unknown);
        (p.name.clone(), arg)
    }))
}

/// `java.lang.Class<X>`: the `X`.
pub(crate) fn class_target(ty: &TypeRef) -> Option<&TypeRef> {
    if ty.fqn() != Some(names::CLASS) {
        return None;
    }
    ty.type_args().first().filter(|t| t.fqn().is_some())
}

pub(crate) fn class_of(ty: TypeRef) -> TypeRef {
    TypeRef::generic(names::CLASS, vec![ty])
}

pub(crate) fn list_of(ty: TypeRef) -> TypeRef {
    TypeRef::generic(names::LIST, vec![ty.boxed()])
}

/// Bean accessor names for property `name`: `getName`, `isName`.
pub(crate) fn accessor_names(name: &str) -> [String; 2] {
    let mut chars = name.chars();
    let cap = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => String::new(),
    };
    [format!("get{cap}"), format!("is{cap}")]
}

/// The receiver of a member access as the member sees it: primitives
/// boxed, arrays as `Object`.
pub(crate) fn dispatch_type(ty: &TypeRef) -> TypeRef {
    match ty {
        TypeRef::Raw(_) => ty.boxed(),
        TypeRef::Array { .. } => TypeRef::object(),
        _ => ty.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessor_names() {
        assert_eq!(accessor_names("days"), ["getDays".to_string(), "isDays".to_string()]);
    }

    #[test]
    fn test_class_target() {
        let class = class_of(TypeRef::string());
        assert_eq!(class_target(&class), Some(&TypeRef::string()));
        assert_eq!(class_target(&TypeRef::string()), None);
    }
}
