//! The extension method catalog.
//!
//! Groovy attaches static helper methods to existing types: the runtime's
//! own `DefaultGroovyMethods` family and any extension modules found on the
//! classpath. The catalog lists them all, in the order Groovy registers
//! them, so the first registration of a signature wins.
//!
//! ```text
//!  ExtensionModuleProvider ──► CatalogBuilder ──► ExtensionCatalog
//!  (classpath, memory)          (+ standard)       (per scope, cached)
//! ```

mod builder;
mod cache;
mod classpath;
mod dgm;
mod model;
mod provider;

pub use builder::CatalogBuilder;
pub use cache::{CatalogCache, ScopeId};
pub use classpath::{ClasspathModuleProvider, DESCRIPTOR_PATHS};
pub use model::{
    ClassDescriptor, ClosureHint, ClosureShape, ExtensionCatalog, ExtensionMethod, MethodEntry,
    ModuleDescriptor,
};
pub use provider::{ExtensionModuleProvider, StaticModuleProvider};

/// FQN of the class every standard method belongs to before Groovy 2.0.
pub const DEFAULT_GROOVY_METHODS: &str = dgm::DGM;
