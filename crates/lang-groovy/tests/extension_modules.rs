//! Extension modules from the classpath and the shared catalog cache.

mod common;

use common::last_span;
use groovyscope_api::{Confidence, LookupOrigin};
use groovyscope_core::{GroovyLevel, GroovyscopeConfig};
use groovyscope_groovy::catalog::{
    ClassDescriptor, ClasspathModuleProvider, ClosureHint, DESCRIPTOR_PATHS, ExtensionModuleProvider,
    ModuleDescriptor, StaticModuleProvider,
};
use groovyscope_groovy::{CatalogBuilder, CatalogCache, GroovyInferencer};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::thread;
use tempfile::tempdir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const MODULE: &str = "moduleName=acme-strings\nmoduleVersion=1.2\nextensionClasses=com.acme.StringExtensions\n";

const CLASS: &str = r#"{
  "name": "com.acme.StringExtensions",
  "methods": [
    "static Integer shout(String self)",
    { "signature": "static void eachWord(String self, groovy.lang.Closure c)",
      "closure": { "simple": ["java.lang.String"] } }
  ]
}"#;

fn write_jar(path: &Path, files: &[(&str, &str)]) {
    let mut jar = ZipWriter::new(File::create(path).unwrap());
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    for (name, text) in files {
        jar.start_file(*name, options).unwrap();
        jar.write_all(text.as_bytes()).unwrap();
    }
    jar.finish().unwrap();
}

fn acme_provider() -> StaticModuleProvider {
    StaticModuleProvider::new("acme")
        .with_module(
            ModuleDescriptor::new("acme-strings").with_extension_class("com.acme.StringExtensions"),
        )
        .with_class(
            ClassDescriptor::new("com.acme.StringExtensions")
                .with_method("static Integer shout(String self)")
                .with_closure_method(
                    "static void eachWord(String self, groovy.lang.Closure c)",
                    ClosureHint::Simple(vec!["java.lang.String".to_string()]),
                ),
        )
}

#[test]
fn test_jar_module_reaches_inference() {
    let dir = tempdir().unwrap();
    let jar = dir.path().join("acme.jar");
    write_jar(
        &jar,
        &[
            (DESCRIPTOR_PATHS[0], MODULE),
            ("com/acme/StringExtensions.json", CLASS),
        ],
    );

    let provider = ClasspathModuleProvider::new([&jar]);
    assert_eq!(provider.modules().len(), 1);

    let catalog = CatalogBuilder::new(GroovyLevel::V2_5)
        .with_provider(&provider)
        .build();
    assert!(catalog.load_failures().is_empty());
    assert!(catalog.classes().iter().any(|c| c == "com.acme.StringExtensions"));

    let inferencer = GroovyInferencer::new(Arc::new(catalog));
    let source = "'a'.shout()";
    let binding = inferencer.analyze(source).type_at(last_span(source, "shout"));
    assert_eq!(binding.type_name(), "java.lang.Integer");
    assert_eq!(binding.declaring_type, "com.acme.StringExtensions");
    assert_eq!(binding.origin, LookupOrigin::Extension);
}

#[test]
fn test_directory_of_jars() {
    let dir = tempdir().unwrap();
    write_jar(
        &dir.path().join("acme.jar"),
        &[
            (DESCRIPTOR_PATHS[1], MODULE),
            ("com/acme/StringExtensions.json", CLASS),
        ],
    );

    let provider = ClasspathModuleProvider::new([dir.path()]);
    assert_eq!(provider.roots().count(), 2);
    let catalog = CatalogBuilder::new(GroovyLevel::V2_5)
        .with_provider(&provider)
        .build();
    assert_eq!(catalog.candidates("shout").len(), 1);
}

#[test]
fn test_module_closure_hint() {
    let provider = acme_provider();
    let catalog = CatalogBuilder::new(GroovyLevel::V2_5)
        .with_provider(&provider)
        .build();
    let source = "'a b'.eachWord { w -> w }";
    let binding = GroovyInferencer::new(Arc::new(catalog))
        .analyze(source)
        .type_at(last_span(source, "w"));
    assert_eq!(binding.type_name(), "java.lang.String");
    assert_eq!(binding.confidence, Confidence::Inferred);
}

#[test]
fn test_failing_module_is_recorded_and_skipped() {
    let provider = acme_provider().with_module(
        ModuleDescriptor::new("broken")
            .with_extension_class("com.acme.Missing")
            .with_extension_class("com.acme.StringExtensions"),
    );
    let catalog = CatalogBuilder::new(GroovyLevel::V2_5)
        .with_provider(&provider)
        .build();

    let failures = catalog.load_failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].module, "broken");
    assert_eq!(failures[0].class, "com.acme.Missing");
    // the healthy module still contributes its methods once
    assert_eq!(catalog.candidates("shout").len(), 1);
}

#[test]
fn test_concurrent_requests_share_one_catalog() {
    let cache = Arc::new(CatalogCache::new());
    let provider = Arc::new(acme_provider());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = Arc::clone(&cache);
            let provider = Arc::clone(&provider);
            thread::spawn(move || cache.catalog_for(provider.as_ref(), GroovyLevel::V2_5))
        })
        .collect();
    let catalogs: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    for catalog in &catalogs[1..] {
        assert!(Arc::ptr_eq(&catalogs[0], catalog));
    }
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_levels_are_cached_separately() {
    let cache = CatalogCache::new();
    let provider = acme_provider();
    let new = cache.catalog_for(&provider, GroovyLevel::V2_5);
    let old = cache.catalog_for(&provider, GroovyLevel::V1_8);
    assert!(!Arc::ptr_eq(&new, &old));
    assert_eq!(old.level(), GroovyLevel::V1_8);
    assert_eq!(cache.len(), 2);

    let scope = provider.scope_id();
    assert!(cache.invalidate_level(scope, GroovyLevel::V1_8));
    assert!(!cache.invalidate_level(scope, GroovyLevel::V1_8));
    assert!(cache.get(scope, GroovyLevel::V2_5).is_some());
}

#[test]
fn test_classpath_change_invalidates_all_levels() {
    let cache = CatalogCache::new();
    let provider = acme_provider();
    let before = cache.catalog_for(&provider, GroovyLevel::V2_5);
    cache.catalog_for(&provider, GroovyLevel::V1_8);

    assert!(cache.invalidate(provider.scope_id()));
    assert!(cache.is_empty());
    assert!(cache.get(provider.scope_id(), GroovyLevel::V2_5).is_none());

    let after = cache.catalog_for(&provider, GroovyLevel::V2_5);
    assert!(!Arc::ptr_eq(&before, &after));
    assert_eq!(after.candidates("shout").len(), 1);
}

#[test]
fn test_inferencer_from_config() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("classes");
    fs::create_dir_all(root.join("META-INF/groovy")).unwrap();
    fs::create_dir_all(root.join("com/acme")).unwrap();
    fs::write(root.join(DESCRIPTOR_PATHS[0]), MODULE).unwrap();
    fs::write(root.join("com/acme/StringExtensions.json"), CLASS).unwrap();

    let config = GroovyscopeConfig {
        classpath: vec![root],
        ..GroovyscopeConfig::default()
    };
    let cache = CatalogCache::new();
    let inferencer = GroovyInferencer::from_config(&config, &cache);
    assert_eq!(inferencer.catalog().level(), config.groovy_level);

    let source = "'a'.shout()";
    let binding = inferencer.analyze(source).type_at(last_span(source, "shout"));
    assert_eq!(binding.type_name(), "java.lang.Integer");
    assert_eq!(cache.len(), 1);
}
