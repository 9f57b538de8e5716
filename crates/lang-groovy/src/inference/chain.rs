//! The lookup chain.
//!
//! Strategies are tried in priority order. The first exact binding wins;
//! failing that, the first inferred one; failing that, unknown. Resolution is
//! an unfold over [`ChainState`]:
//!
//! ```text
//! Unstarted ─► Trying(0) ─► Trying(1) ─► ... ─► Trying(n)
//!                 │             │                  │
//!                 ▼             ▼                  ▼
//!           ResolvedExact ResolvedExact   ResolvedInferred | Unknown
//! ```

use crate::inference::context::{InferContext, LookupResult};
use crate::inference::strategy::Strategy;
use crate::parser::ExprId;

#[derive(Debug, Clone)]
pub enum ChainState {
    Unstarted,
    Trying {
        index: usize,
        /// First inferred result seen so far
        best: Option<LookupResult>,
    },
    ResolvedExact(LookupResult),
    ResolvedInferred(LookupResult),
    Unknown,
}

impl ChainState {
    /// Advance one step; `None` once the state is final.
    fn step(&self, expr: ExprId, ctx: &InferContext<'_>) -> Option<ChainState> {
        match self {
            ChainState::Unstarted => Some(ChainState::Trying {
                index: 0,
                best: None,
            }),
            ChainState::Trying { index, best } => {
                let Some(strategy) = Strategy::CHAIN.get(*index) else {
                    return Some(match best {
                        Some(result) => ChainState::ResolvedInferred(result.clone()),
                        None => ChainState::Unknown,
                    });
                };
                let next = match strategy.attempt(expr, ctx) {
                    Some(result) if result.stops_chain() => {
                        tracing::trace!("{:?} resolved exactly by {} lookup", expr, strategy.origin());
                        return Some(ChainState::ResolvedExact(result));
                    }
                    Some(result) if best.is_none() && !result.binding.is_unknown() => Some(result),
                    _ => best.clone(),
                };
                Some(ChainState::Trying {
                    index: index + 1,
                    best: next,
                })
            }
            ChainState::ResolvedExact(_) | ChainState::ResolvedInferred(_) | ChainState::Unknown => {
                None
            }
        }
    }

    pub fn into_result(self) -> Option<LookupResult> {
        match self {
            ChainState::ResolvedExact(result) | ChainState::ResolvedInferred(result) => Some(result),
            _ => None,
        }
    }
}

/// Run the chain for `expr`.
pub fn resolve(expr: ExprId, ctx: &InferContext<'_>) -> Option<LookupResult> {
    std::iter::successors(Some(ChainState::Unstarted), |state| state.step(expr, ctx))
        .last()
        .and_then(ChainState::into_result)
}
