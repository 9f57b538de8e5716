//! Lexical scopes of a compilation unit.
//!
//! Built in one pass before any query runs; inference only reads them.

mod builder;
mod manager;
mod table;

pub use builder::ScopeBuilder;
pub use manager::{
    DeclSite, DeclTarget, MetaclassAddition, Owner, Scope, ScopeIndex, ScopeKind, ScopeManager,
    SymbolRef,
};
pub use table::{Symbol, SymbolKind, SymbolTable};
