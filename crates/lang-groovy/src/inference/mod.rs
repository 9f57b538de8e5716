//! Groovy Type Inference System
//!
//! Answers "what is the static type of this expression" for dynamically
//! typed Groovy code, by trying a fixed list of lookup strategies.
//!
//! # Architecture
//!
//! ```text
//! Strategy::CHAIN          →  Structural, Declared, Extension, Category
//!       │                     first Exact wins, else first Inferred
//!       ▼
//! InferContext (per query) →  memo, cycle guard, selected call overloads
//!       │
//!       ├──► ScopeManager        variables visible at each expression
//!       ├──► ScriptTypeSystem    script classes over the builtin JDK table
//!       └──► ExtensionCatalog    DGM and extension module methods
//! ```
//!
//! # Key Traits
//!
//! - [`TypeProvider`] - Resolves FQN to type information
//! - [`InheritanceProvider`] - Walks supertype hierarchy
//! - [`MemberProvider`] - Finds members in types
//! - [`GroovyTypeSystem`] - Combines all three
//! - [`LookupStrategy`] - One step of the lookup chain

pub mod adapters;
mod chain;
pub mod closure;
pub mod context;
pub mod core;
pub mod query;
pub mod scope;
pub mod strategy;

// Re-export public API
pub use core::type_system::{
    GroovyTypeSystem, InheritanceProvider, MemberProvider, MethodMatch, TypeProvider,
};

pub use core::types::{
    MemberInfo, MemberKind, ParameterInfo, TypeInfo, TypeKind, TypeRefExt, TypeResolutionContext,
};

pub use adapters::ScriptTypeSystem;
pub use chain::{ChainState, resolve};
pub use context::{CallSelection, InferContext, InferenceOptions, LookupResult};
pub use query::{Target, locate};
pub use scope::{ScopeBuilder, ScopeManager};
pub use strategy::{LookupStrategy, Strategy};
