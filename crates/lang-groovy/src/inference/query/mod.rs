//! Answering "what is the type at this range".

mod locate;

pub use locate::{Target, locate};

use crate::inference::context::InferContext;
use crate::inference::core::type_system::MemberProvider;
use crate::inference::scope::DeclTarget;
use crate::inference::strategy::{member_binding, symbol_binding};
use groovyscope_api::{Confidence, LookupOrigin, TypeBinding};

/// Binding of whatever `target` names.
pub fn resolve_target(ctx: &InferContext<'_>, target: &Target) -> TypeBinding {
    match target {
        Target::Expr(id) => ctx.infer(*id),
        Target::Decl(DeclTarget::Symbol(symbol)) => ctx
            .scopes
            .symbol(*symbol)
            .map(|s| symbol_binding(ctx, s))
            .unwrap_or_else(TypeBinding::unknown),
        Target::Decl(DeclTarget::Member { owner, name }) => ctx
            .ts
            .get_members(owner, name)
            .into_iter()
            .next()
            .map(|m| member_binding(m.type_ref, owner, LookupOrigin::Declared, Confidence::Exact))
            .unwrap_or_else(TypeBinding::unknown),
        Target::Nothing => TypeBinding::unknown(),
    }
}
