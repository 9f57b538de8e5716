//! Static type inference for Groovy scripts.
//!
//! ```ignore
//! use groovyscope_groovy::{CatalogBuilder, GroovyInferencer};
//!
//! let catalog = CatalogBuilder::new(GroovyLevel::V2_5).build();
//! let analysis = GroovyInferencer::new(Arc::new(catalog)).analyze("[1, 2].collect { it * 2 }");
//! let binding = analysis.type_at(span);
//! ```

pub mod builtin;
pub mod catalog;
pub mod error;
pub mod facade;
pub mod inference;
pub mod parser;

pub use catalog::{CatalogBuilder, CatalogCache, ExtensionCatalog, ScopeId};
pub use error::{CatalogError, ExtensionLoadFailure, Result};
pub use facade::{GroovyInferencer, SourceAnalysis};
pub use inference::InferenceOptions;
