use super::cache::ScopeId;
use super::model::{ClassDescriptor, ModuleDescriptor};
use crate::error::{CatalogError, Result};
use std::collections::HashMap;

/// Source of extension modules for one classpath scope.
///
/// The catalog builder only ever sees modules through this trait, so a
/// provider can be backed by jars, directories, or plain memory.
pub trait ExtensionModuleProvider: Send + Sync {
    /// Identity of the scope; equal scopes share a cached catalog.
    fn scope_id(&self) -> ScopeId;

    /// Module descriptors, in classpath order.
    fn modules(&self) -> Vec<ModuleDescriptor>;

    /// Load the descriptor of one extension class by FQN.
    fn load_class(&self, name: &str) -> Result<ClassDescriptor>;
}

/// Modules and classes held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticModuleProvider {
    label: String,
    modules: Vec<ModuleDescriptor>,
    classes: HashMap<String, ClassDescriptor>,
}

impl StaticModuleProvider {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn with_module(mut self, module: ModuleDescriptor) -> Self {
        self.modules.push(module);
        self
    }

    pub fn with_class(mut self, class: ClassDescriptor) -> Self {
        self.classes.insert(class.name.clone(), class);
        self
    }
}

impl ExtensionModuleProvider for StaticModuleProvider {
    fn scope_id(&self) -> ScopeId {
        ScopeId::of(&self.label)
    }

    fn modules(&self) -> Vec<ModuleDescriptor> {
        self.modules.clone()
    }

    fn load_class(&self, name: &str) -> Result<ClassDescriptor> {
        self.classes
            .get(name)
            .cloned()
            .ok_or_else(|| CatalogError::ClassNotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_provider_lookup() {
        let provider = StaticModuleProvider::new("mem")
            .with_module(ModuleDescriptor::new("m").with_extension_class("a.B"))
            .with_class(ClassDescriptor::new("a.B"));
        assert_eq!(provider.modules().len(), 1);
        assert!(provider.load_class("a.B").is_ok());
        assert!(matches!(
            provider.load_class("a.C"),
            Err(CatalogError::ClassNotFound(name)) if name == "a.C"
        ));
        assert_eq!(provider.scope_id(), StaticModuleProvider::new("mem").scope_id());
    }
}
