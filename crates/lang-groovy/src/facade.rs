//! Entry point: analyse a source text, then ask for types at ranges.

use crate::catalog::{CatalogCache, ClasspathModuleProvider, ExtensionCatalog};
use crate::inference::query::{self, Target, locate};
use crate::inference::{InferContext, InferenceOptions, ScopeManager, ScriptTypeSystem};
use crate::parser::{self, CompilationUnit, ExprId, ParseError};
use groovyscope_api::{Span, TypeBinding};
use groovyscope_core::GroovyscopeConfig;
use std::sync::Arc;

/// Type inference over one extension catalog.
///
/// Cheap to clone; the catalog is shared.
#[derive(Debug, Clone)]
pub struct GroovyInferencer {
    catalog: Arc<ExtensionCatalog>,
    options: InferenceOptions,
}

impl GroovyInferencer {
    pub fn new(catalog: Arc<ExtensionCatalog>) -> Self {
        Self {
            catalog,
            options: InferenceOptions::default(),
        }
    }

    pub fn with_options(mut self, options: InferenceOptions) -> Self {
        self.options = options;
        self
    }

    /// An inferencer over the configured classpath and Groovy level. The
    /// catalog comes from `cache`, built on first use.
    pub fn from_config(config: &GroovyscopeConfig, cache: &CatalogCache) -> Self {
        let provider = ClasspathModuleProvider::new(config.classpath.clone());
        let catalog = cache.catalog_for(&provider, config.groovy_level);
        Self::new(catalog).with_options(InferenceOptions::from(config))
    }

    pub fn catalog(&self) -> &ExtensionCatalog {
        &self.catalog
    }

    pub fn options(&self) -> &InferenceOptions {
        &self.options
    }

    /// Parse `source` and build its scopes. Never fails: syntax errors are
    /// reported by [`SourceAnalysis::parse_errors`].
    pub fn analyze(&self, source: &str) -> SourceAnalysis {
        let unit = parser::parse(source);
        let ts = ScriptTypeSystem::new(&unit, &self.options.script_class);
        let scopes = ScopeManager::build(&unit, &ts);
        tracing::debug!(
            "Analyzed {} bytes: {} expressions, {} scopes, {} parse errors",
            source.len(),
            unit.exprs.len(),
            scopes.len(),
            unit.errors.len()
        );
        SourceAnalysis {
            source: source.to_string(),
            unit,
            ts,
            scopes,
            catalog: Arc::clone(&self.catalog),
            options: self.options.clone(),
        }
    }
}

/// One analysed source text.
///
/// Each query runs with a fresh memo, so answers never depend on the order
/// queries are asked in.
pub struct SourceAnalysis {
    source: String,
    unit: CompilationUnit,
    ts: ScriptTypeSystem,
    scopes: ScopeManager,
    catalog: Arc<ExtensionCatalog>,
    options: InferenceOptions,
}

impl SourceAnalysis {
    /// The type of whatever `span` refers to.
    pub fn type_at(&self, span: Span) -> TypeBinding {
        let target = locate(&self.unit, &self.scopes, span);
        if target == Target::Nothing {
            return TypeBinding::unknown();
        }
        query::resolve_target(&self.context(), &target)
    }

    /// FQN of the type declaring the member at `span`.
    pub fn declaring_type_at(&self, span: Span) -> String {
        self.type_at(span).declaring_type
    }

    pub fn binding_of(&self, expr: ExprId) -> TypeBinding {
        self.context().infer(expr)
    }

    pub fn parse_errors(&self) -> &[ParseError] {
        &self.unit.errors
    }

    pub fn unit(&self) -> &CompilationUnit {
        &self.unit
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Span of an occurrence of `text`: the first, or else the last.
    pub fn find_text(&self, text: &str, first: bool) -> Option<Span> {
        if text.is_empty() {
            return None;
        }
        let start = if first {
            self.source.find(text)
        } else {
            self.source.rfind(text)
        }?;
        Some(Span::new(start, start + text.len()))
    }

    fn context(&self) -> InferContext<'_> {
        InferContext::new(
            &self.unit,
            &self.ts,
            &self.catalog,
            &self.scopes,
            &self.options,
        )
    }
}
