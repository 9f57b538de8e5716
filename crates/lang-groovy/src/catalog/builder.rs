//! Assembles an [`ExtensionCatalog`] from the standard runtime classes and
//! the modules of any number of providers.

use super::dgm::{self, DGM, STANDARD_MODULE};
use super::model::{
    ClassDescriptor, ClosureHint, ClosureShape, ExtensionCatalog, ExtensionMethod, ModuleDescriptor,
};
use super::provider::ExtensionModuleProvider;
use crate::builtin::jdk;
use crate::error::{CatalogError, ExtensionLoadFailure, Result};
use crate::inference::core::types::MemberInfo;
use crate::parser::signature;
use groovyscope_api::TypeRef;
use groovyscope_core::GroovyLevel;
use std::collections::HashSet;

/// A module whose classes all loaded.
struct LoadedModule {
    instance: Vec<(String, Vec<ExtensionMethod>)>,
    statics: Vec<(String, Vec<ExtensionMethod>)>,
}

pub struct CatalogBuilder<'a> {
    level: GroovyLevel,
    providers: Vec<&'a dyn ExtensionModuleProvider>,
}

impl<'a> CatalogBuilder<'a> {
    pub fn new(level: GroovyLevel) -> Self {
        Self {
            level,
            providers: Vec::new(),
        }
    }

    pub fn with_provider(mut self, provider: &'a dyn ExtensionModuleProvider) -> Self {
        self.providers.push(provider);
        self
    }

    pub fn build(self) -> ExtensionCatalog {
        let mut registry = Registry::new(self.level);

        for (class, lines) in dgm::INSTANCE_CLASSES {
            let declaring = if self.level.has_split_dgm() { class } else { &DGM };
            let methods = standard_methods(declaring, lines, false);
            registry.add_class(declaring, methods, false);
        }

        let mut loaded = Vec::new();
        for provider in &self.providers {
            for module in provider.modules() {
                match load_module(*provider, &module) {
                    Ok(m) => {
                        tracing::debug!(
                            "Loaded extension module '{}' {}",
                            module.name,
                            module.version
                        );
                        loaded.push(m);
                    }
                    Err(failure) => {
                        tracing::warn!(
                            "Skipping extension module '{}': cannot load {}: {}",
                            failure.module,
                            failure.class,
                            failure.reason
                        );
                        registry.catalog.load_failures.push(failure);
                    }
                }
            }
        }

        for module in &mut loaded {
            for (class, methods) in module.instance.drain(..) {
                registry.add_class(&class, methods, false);
            }
        }
        for (class, lines) in dgm::STATIC_CLASSES {
            registry.add_class(class, standard_methods(class, lines, true), true);
        }
        for module in &mut loaded {
            for (class, methods) in module.statics.drain(..) {
                registry.add_class(&class, methods, true);
            }
        }

        registry.catalog
    }
}

struct Registry {
    catalog: ExtensionCatalog,
    seen: HashSet<(String, Vec<TypeRef>, bool)>,
}

impl Registry {
    fn new(level: GroovyLevel) -> Self {
        Self {
            catalog: ExtensionCatalog::empty(level),
            seen: HashSet::new(),
        }
    }

    fn add_class(&mut self, class: &str, methods: Vec<ExtensionMethod>, is_static: bool) {
        let classes = if is_static {
            &mut self.catalog.static_classes
        } else {
            &mut self.catalog.classes
        };
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
        for method in methods {
            if !self.seen.insert(method.dedupe_key()) {
                tracing::debug!(
                    "Ignoring duplicate extension {}#{} from module {}",
                    method.declaring_type(),
                    method.name(),
                    method.module
                );
                continue;
            }
            self.catalog
                .methods
                .entry(method.name().to_string())
                .or_default()
                .push(method);
        }
    }
}

fn standard_methods(declaring: &str, lines: &[&str], is_static: bool) -> Vec<ExtensionMethod> {
    let resolve = |n: &str| jdk().resolve_simple(n);
    let mut methods = Vec::with_capacity(lines.len());
    for line in lines {
        let (sig, hint) = dgm::split_entry(line);
        let member = match signature::parse_member(sig, declaring, &[], &resolve) {
            Ok(member) => member,
            Err(e) => {
                tracing::warn!("Skipping standard extension in {}: {}", declaring, e);
                continue;
            }
        };
        let shape = hint
            .parse::<ClosureHint>()
            .and_then(|h| h.resolve().map_err(|e| e.to_string()));
        let shape = match shape {
            Ok(shape) => shape,
            Err(e) => {
                tracing::warn!("Bad closure hint on {}#{}: {}", declaring, member.name, e);
                ClosureShape::None
            }
        };
        methods.extend(to_extension(member, shape, is_static, STANDARD_MODULE));
    }
    methods
}

/// Load every class of a module, or report the first that fails.
fn load_module(
    provider: &dyn ExtensionModuleProvider,
    descriptor: &ModuleDescriptor,
) -> std::result::Result<LoadedModule, ExtensionLoadFailure> {
    let module = descriptor.name.as_str();
    let load = |class: &String, is_static: bool| {
        provider
            .load_class(class)
            .and_then(|desc| convert_class(class, &desc, is_static, module))
            .map(|methods| (class.clone(), methods))
            .map_err(|e| ExtensionLoadFailure {
                module: module.to_string(),
                class: class.clone(),
                reason: e.to_string(),
            })
    };
    Ok(LoadedModule {
        instance: descriptor
            .extension_classes
            .iter()
            .map(|c| load(c, false))
            .collect::<std::result::Result<_, _>>()?,
        statics: descriptor
            .static_extension_classes
            .iter()
            .map(|c| load(c, true))
            .collect::<std::result::Result<_, _>>()?,
    })
}

fn convert_class(
    class: &str,
    desc: &ClassDescriptor,
    is_static: bool,
    module: &str,
) -> Result<Vec<ExtensionMethod>> {
    let resolve = |n: &str| jdk().resolve_simple(n);
    let invalid = |reason: String| CatalogError::InvalidClass {
        name: class.to_string(),
        reason,
    };
    let mut methods = Vec::new();
    for entry in &desc.methods {
        let member = signature::parse_member(entry.signature(), class, &[], &resolve)
            .map_err(|e| invalid(e.to_string()))?;
        let shape = entry.closure().resolve().map_err(|e| invalid(e.to_string()))?;
        methods.extend(to_extension(member, shape, is_static, module));
    }
    Ok(methods)
}

/// Only static methods with a `self` parameter can extend a type.
fn to_extension(
    member: MemberInfo,
    closure: ClosureShape,
    is_static_extension: bool,
    module: &str,
) -> Option<ExtensionMethod> {
    if !member.is_method() || !member.is_static() {
        tracing::debug!("Ignoring non-static member {}", member.fqn());
        return None;
    }
    let Some(self_param) = member.params().first() else {
        tracing::debug!("Ignoring {} without a self parameter", member.fqn());
        return None;
    };
    Some(ExtensionMethod {
        self_type: self_param.type_ref.clone(),
        member,
        is_static_extension,
        closure,
        module: module.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::provider::StaticModuleProvider;

    fn acme() -> StaticModuleProvider {
        StaticModuleProvider::new("acme")
            .with_module(
                ModuleDescriptor::new("acme-ext")
                    .with_extension_class("com.acme.ListExtensions")
                    .with_static_extension_class("com.acme.StaticExtensions"),
            )
            .with_class(
                ClassDescriptor::new("com.acme.ListExtensions")
                    .with_method("static <T> java.util.List<T> shout(java.util.List<T> self)")
                    .with_method("java.lang.String notStatic(java.util.List self)")
                    .with_method("static void noSelf()")
                    // same erased signature as the standard method: ignored
                    .with_method("static java.lang.String dump(java.lang.Object self)"),
            )
            .with_class(
                ClassDescriptor::new("com.acme.StaticExtensions")
                    .with_method("static java.lang.String hello(java.lang.String self)"),
            )
    }

    #[test]
    fn test_standard_catalog_order_and_split_classes() {
        let catalog = CatalogBuilder::new(GroovyLevel::V2_5).build();
        assert_eq!(catalog.classes()[0], DGM);
        assert_eq!(catalog.classes().len(), 5);
        assert_eq!(catalog.static_classes(), &[dgm::DGSM.to_string()]);

        let each_line: Vec<&str> = catalog
            .candidates("eachLine")
            .iter()
            .map(|m| m.declaring_type())
            .collect();
        assert!(each_line.contains(&"org.codehaus.groovy.runtime.IOGroovyMethods"));
        assert!(each_line.contains(&"org.codehaus.groovy.runtime.StringGroovyMethods"));
        assert!(catalog.load_failures().is_empty());
    }

    #[test]
    fn test_old_levels_attribute_everything_to_dgm() {
        let catalog = CatalogBuilder::new(GroovyLevel::V1_8).build();
        assert_eq!(catalog.classes(), &[DGM.to_string()]);
        assert!(catalog.candidates("eachLine").iter().all(|m| m.declaring_type() == DGM));
    }

    #[test]
    fn test_module_methods_are_registered_after_standard() {
        let provider = acme();
        let catalog = CatalogBuilder::new(GroovyLevel::V2_5)
            .with_provider(&provider)
            .build();

        let shout = catalog.candidates("shout");
        assert_eq!(shout.len(), 1);
        assert_eq!(shout[0].module, "acme-ext");
        assert_eq!(shout[0].self_type.to_string(), "java.util.List<T>");
        assert!(catalog.candidates("notStatic").is_empty());
        assert!(catalog.candidates("noSelf").is_empty());

        let dump = catalog.candidates("dump");
        assert_eq!(dump.len(), 1);
        assert_eq!(dump[0].declaring_type(), DGM);

        let hello = catalog.candidates("hello");
        assert!(hello[0].is_static_extension);
        assert_eq!(
            catalog.static_classes().last().map(String::as_str),
            Some("com.acme.StaticExtensions")
        );
    }

    #[test]
    fn test_failing_module_is_skipped_whole() {
        let provider = StaticModuleProvider::new("broken")
            .with_module(
                ModuleDescriptor::new("half")
                    .with_extension_class("com.acme.Good")
                    .with_extension_class("com.acme.Missing"),
            )
            .with_module(ModuleDescriptor::new("fine").with_extension_class("com.acme.Fine"))
            .with_class(
                ClassDescriptor::new("com.acme.Good")
                    .with_method("static java.lang.String good(java.lang.String self)"),
            )
            .with_class(
                ClassDescriptor::new("com.acme.Fine")
                    .with_method("static java.lang.String fine(java.lang.String self)"),
            );
        let catalog = CatalogBuilder::new(GroovyLevel::V2_5)
            .with_provider(&provider)
            .build();

        assert!(catalog.candidates("good").is_empty());
        assert_eq!(catalog.candidates("fine").len(), 1);
        assert_eq!(
            catalog.load_failures(),
            &[ExtensionLoadFailure {
                module: "half".to_string(),
                class: "com.acme.Missing".to_string(),
                reason: "Extension class not found: com.acme.Missing".to_string(),
            }]
        );
    }

    #[test]
    fn test_unparsable_signature_fails_the_module() {
        let provider = StaticModuleProvider::new("bad-sig")
            .with_module(ModuleDescriptor::new("bad").with_extension_class("com.acme.Bad"))
            .with_class(
                ClassDescriptor::new("com.acme.Bad").with_method("static Frobnicator x(Object self)"),
            );
        let catalog = CatalogBuilder::new(GroovyLevel::V2_5)
            .with_provider(&provider)
            .build();
        assert_eq!(catalog.load_failures().len(), 1);
        assert_eq!(catalog.load_failures()[0].class, "com.acme.Bad");
    }
}
