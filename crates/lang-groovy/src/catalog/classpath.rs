//! Extension modules discovered on a classpath of directories and jars.

use super::cache::ScopeId;
use super::model::{ClassDescriptor, ModuleDescriptor};
use super::provider::ExtensionModuleProvider;
use crate::error::{CatalogError, Result};
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::ZipArchive;
use zip::result::ZipError;

/// Where Groovy looks for module descriptors, current location first.
pub const DESCRIPTOR_PATHS: &[&str] = &[
    "META-INF/groovy/org.codehaus.groovy.runtime.ExtensionModule",
    "META-INF/services/org.codehaus.groovy.runtime.ExtensionModule",
];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Root {
    Dir(PathBuf),
    Jar(PathBuf),
}

impl Root {
    fn path(&self) -> &Path {
        match self {
            Root::Dir(p) | Root::Jar(p) => p,
        }
    }

    /// Text of `name` inside this root, if present.
    fn read(&self, name: &str) -> Result<Option<String>> {
        match self {
            Root::Dir(dir) => {
                let path = dir.join(name);
                if !path.is_file() {
                    return Ok(None);
                }
                Ok(Some(fs::read_to_string(path)?))
            }
            Root::Jar(jar) => {
                let file = File::open(jar)?;
                let mut archive = ZipArchive::new(file)?;
                let mut entry = match archive.by_name(name) {
                    Ok(entry) => entry,
                    Err(ZipError::FileNotFound) => return Ok(None),
                    Err(e) => return Err(e.into()),
                };
                let mut text = String::new();
                entry.read_to_string(&mut text)?;
                Ok(Some(text))
            }
        }
    }
}

/// Scans classpath entries once, at construction.
///
/// A directory entry is a root itself and contributes every `*.jar` directly
/// inside it. Class descriptors live at `<fqn as path>.json`.
#[derive(Debug, Clone)]
pub struct ClasspathModuleProvider {
    entries: Vec<PathBuf>,
    roots: Vec<Root>,
    modules: Vec<ModuleDescriptor>,
}

impl ClasspathModuleProvider {
    pub fn new<I, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let entries: Vec<PathBuf> = entries.into_iter().map(Into::into).collect();
        let roots = collect_roots(&entries);
        let modules = roots.iter().filter_map(read_descriptor).collect::<Vec<_>>();
        tracing::debug!(
            "Scanned {} classpath entries: {} roots, {} extension modules",
            entries.len(),
            roots.len(),
            modules.len()
        );
        Self {
            entries,
            roots,
            modules,
        }
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    /// Directories and jars searched, in order.
    pub fn roots(&self) -> impl Iterator<Item = &Path> {
        self.roots.iter().map(Root::path)
    }
}

impl ExtensionModuleProvider for ClasspathModuleProvider {
    fn scope_id(&self) -> ScopeId {
        ScopeId::from_entries(&self.entries)
    }

    fn modules(&self) -> Vec<ModuleDescriptor> {
        self.modules.clone()
    }

    fn load_class(&self, name: &str) -> Result<ClassDescriptor> {
        let path = format!("{}.json", name.replace('.', "/"));
        for root in &self.roots {
            let Some(text) = root.read(&path)? else {
                continue;
            };
            let desc: ClassDescriptor = serde_json::from_str(&text)?;
            if desc.name != name {
                return Err(CatalogError::InvalidClass {
                    name: name.to_string(),
                    reason: format!("descriptor declares '{}'", desc.name),
                });
            }
            return Ok(desc);
        }
        Err(CatalogError::ClassNotFound(name.to_string()))
    }
}

fn collect_roots(entries: &[PathBuf]) -> Vec<Root> {
    let mut roots = Vec::new();
    for entry in entries {
        if entry.is_dir() {
            roots.push(Root::Dir(entry.clone()));
            let mut jars: Vec<PathBuf> = WalkDir::new(entry)
                .min_depth(1)
                .max_depth(1)
                .into_iter()
                .filter_map(|e| e.ok())
                .map(|e| e.into_path())
                .filter(|p| is_jar(p))
                .collect();
            jars.sort();
            roots.extend(jars.into_iter().map(Root::Jar));
        } else if is_jar(entry) && entry.is_file() {
            roots.push(Root::Jar(entry.clone()));
        } else {
            tracing::warn!("Ignoring classpath entry {}", entry.display());
        }
    }
    roots
}

fn is_jar(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "jar")
}

fn read_descriptor(root: &Root) -> Option<ModuleDescriptor> {
    for location in DESCRIPTOR_PATHS {
        let text = match root.read(location) {
            Ok(Some(text)) => text,
            Ok(None) => continue,
            Err(e) => {
                tracing::warn!("Cannot read {} in {}: {}", location, root.path().display(), e);
                return None;
            }
        };
        let path = root.path().join(location);
        return match ModuleDescriptor::from_properties(&text, &path) {
            Ok(module) => Some(module),
            Err(e) => {
                tracing::warn!("{}", e);
                None
            }
        };
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(root: &Path, rel: &str, text: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, text).unwrap();
    }

    #[test]
    fn test_directory_root_modules_and_classes() {
        let dir = tempdir().unwrap();
        write(
            dir.path(),
            DESCRIPTOR_PATHS[1],
            "moduleName=legacy\nmoduleVersion=0.1\nextensionClasses=com.acme.Legacy\n",
        );
        write(
            dir.path(),
            "com/acme/Legacy.json",
            r#"{"name": "com.acme.Legacy", "methods": ["static String old(String self)"]}"#,
        );

        let provider = ClasspathModuleProvider::new([dir.path()]);
        let modules = provider.modules();
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].name, "legacy");
        assert_eq!(provider.load_class("com.acme.Legacy").unwrap().methods.len(), 1);
        assert!(matches!(
            provider.load_class("com.acme.Nope"),
            Err(CatalogError::ClassNotFound(_))
        ));
    }

    #[test]
    fn test_missing_entries_are_ignored() {
        let provider = ClasspathModuleProvider::new(["/definitely/not/here.jar"]);
        assert_eq!(provider.roots().count(), 0);
        assert!(provider.modules().is_empty());
    }

    #[test]
    fn test_mismatched_descriptor_name() {
        let dir = tempdir().unwrap();
        write(dir.path(), "a/B.json", r#"{"name": "a.C"}"#);
        let provider = ClasspathModuleProvider::new([dir.path()]);
        assert!(matches!(
            provider.load_class("a.B"),
            Err(CatalogError::InvalidClass { .. })
        ));
    }
}
