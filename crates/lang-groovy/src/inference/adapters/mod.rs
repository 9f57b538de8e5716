//! Adapters that implement GroovyTypeSystem for various data sources.

mod script;

pub use script::{ScriptTypeSystem, StaticImport};
