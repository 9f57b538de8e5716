use groovyscope_api::{Confidence, Span, TypeBinding};
use groovyscope_core::GroovyLevel;
use groovyscope_groovy::{CatalogBuilder, ExtensionCatalog, GroovyInferencer};
use once_cell::sync::Lazy;
use std::sync::Arc;

static CATALOG_2_5: Lazy<Arc<ExtensionCatalog>> =
    Lazy::new(|| Arc::new(CatalogBuilder::new(GroovyLevel::V2_5).build()));
static CATALOG_1_8: Lazy<Arc<ExtensionCatalog>> =
    Lazy::new(|| Arc::new(CatalogBuilder::new(GroovyLevel::V1_8).build()));

#[allow(dead_code)]
pub fn inferencer(level: GroovyLevel) -> GroovyInferencer {
    let catalog = match level {
        GroovyLevel::V1_8 => Arc::clone(&CATALOG_1_8),
        GroovyLevel::V2_5 => Arc::clone(&CATALOG_2_5),
        other => Arc::new(CatalogBuilder::new(other).build()),
    };
    GroovyInferencer::new(catalog)
}

/// Span of the last occurrence of `text` in `source`.
#[allow(dead_code)]
pub fn last_span(source: &str, text: &str) -> Span {
    let start = source
        .rfind(text)
        .unwrap_or_else(|| panic!("'{text}' not found in source"));
    Span::new(start, start + text.len())
}

#[allow(dead_code)]
pub fn first_span(source: &str, text: &str) -> Span {
    let start = source
        .find(text)
        .unwrap_or_else(|| panic!("'{text}' not found in source"));
    Span::new(start, start + text.len())
}

#[allow(dead_code)]
pub fn binding_at(source: &str, span: Span) -> TypeBinding {
    let analysis = inferencer(GroovyLevel::V2_5).analyze(source);
    analysis.type_at(span)
}

/// Type of the last occurrence of `text`.
#[allow(dead_code)]
pub fn assert_type(source: &str, text: &str, expected: &str) {
    assert_type_in(source, last_span(source, text), expected);
}

#[allow(dead_code)]
pub fn assert_type_in(source: &str, span: Span, expected: &str) {
    let binding = binding_at(source, span);
    assert_eq!(
        binding.type_ref.to_string(),
        expected,
        "wrong type at {}..{} ({:?}) in:\n{source}",
        span.start,
        span.end,
        &source[span.start..span.end]
    );
}

#[allow(dead_code)]
pub fn assert_confidence(source: &str, text: &str, expected: Confidence) {
    let binding = binding_at(source, last_span(source, text));
    assert_eq!(binding.confidence, expected, "binding: {binding}");
}

/// Declaring type of the last occurrence of `text` at `level`.
#[allow(dead_code)]
pub fn assert_declaring(source: &str, text: &str, level: GroovyLevel, expected: &str) {
    let analysis = inferencer(level).analyze(source);
    let declaring = analysis.declaring_type_at(last_span(source, text));
    assert_eq!(declaring, expected, "wrong declaring type in:\n{source}");
}
