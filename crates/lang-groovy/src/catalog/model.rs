//! Catalog data: closure shapes, extension methods and module descriptors.

use crate::builtin::jdk;
use crate::error::{CatalogError, ExtensionLoadFailure, Result};
use crate::inference::core::types::MemberInfo;
use crate::parser::signature::{self, SignatureError};
use groovyscope_api::TypeRef;
use groovyscope_core::GroovyLevel;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// How the parameters of a closure argument are typed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ClosureShape {
    #[default]
    None,
    /// Each parameter is the receiver (`with`, `addShutdownHook`)
    Receiver,
    /// The declared type of the method's first parameter
    FirstParam,
    /// The receiver's element type; maps give an entry, or key and value
    Element,
    /// Every parameter is an element (`sort { a, b -> }`)
    Comparator,
    /// Element followed by an `Integer` index
    WithIndex,
    /// Accumulator followed by the element
    Inject,
    /// Fixed parameter types
    Simple(Vec<TypeRef>),
}

/// Serialised form of a [`ClosureShape`] in class descriptors.
///
/// `"element"`, `"firstParam"`, `{"simple": ["java.io.File"]}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClosureHint {
    #[default]
    None,
    Receiver,
    FirstParam,
    Element,
    Comparator,
    WithIndex,
    Inject,
    Simple(Vec<String>),
}

impl ClosureHint {
    pub fn resolve(&self) -> std::result::Result<ClosureShape, SignatureError> {
        let shape = match self {
            ClosureHint::None => ClosureShape::None,
            ClosureHint::Receiver => ClosureShape::Receiver,
            ClosureHint::FirstParam => ClosureShape::FirstParam,
            ClosureHint::Element => ClosureShape::Element,
            ClosureHint::Comparator => ClosureShape::Comparator,
            ClosureHint::WithIndex => ClosureShape::WithIndex,
            ClosureHint::Inject => ClosureShape::Inject,
            ClosureHint::Simple(types) => ClosureShape::Simple(
                types
                    .iter()
                    .map(|t| signature::parse_type_ref(t, &[], &|n| jdk().resolve_simple(n)))
                    .collect::<std::result::Result<_, _>>()?,
            ),
        };
        Ok(shape)
    }
}

impl FromStr for ClosureHint {
    type Err = String;

    /// Parse the compact form: `element`, `simple:java.io.File,java.lang.String`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(types) = s.strip_prefix("simple:") {
            return Ok(ClosureHint::Simple(split_top_level(types)));
        }
        match s {
            "" | "none" => Ok(ClosureHint::None),
            "receiver" => Ok(ClosureHint::Receiver),
            "firstParam" => Ok(ClosureHint::FirstParam),
            "element" => Ok(ClosureHint::Element),
            "comparator" => Ok(ClosureHint::Comparator),
            "withIndex" => Ok(ClosureHint::WithIndex),
            "inject" => Ok(ClosureHint::Inject),
            other => Err(format!("unknown closure hint '{other}'")),
        }
    }
}

/// Split on commas that are not nested inside `<...>`.
fn split_top_level(text: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();
    for c in text.chars() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(current.trim().to_string());
                current.clear();
                continue;
            }
            _ => {}
        }
        current.push(c);
    }
    if !current.trim().is_empty() {
        parts.push(current.trim().to_string());
    }
    parts
}

/// A static helper method that Groovy attaches to its first parameter's type.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtensionMethod {
    /// The helper as declared, `self` included as the first parameter
    pub member: MemberInfo,
    pub self_type: TypeRef,
    /// Registered from a static extension class (`Thread.start { }`)
    pub is_static_extension: bool,
    pub closure: ClosureShape,
    /// Name of the module that contributed the method
    pub module: String,
}

impl ExtensionMethod {
    pub fn name(&self) -> &str {
        &self.member.name
    }

    pub fn declaring_type(&self) -> &str {
        &self.member.declaring_type
    }

    /// Identity used to drop later registrations of the same helper.
    pub(crate) fn dedupe_key(&self) -> (String, Vec<TypeRef>, bool) {
        (
            self.member.name.clone(),
            self.member.erased_signature(),
            self.is_static_extension,
        )
    }
}

/// Every extension method visible in one classpath scope.
///
/// Immutable once built; see [`super::CatalogBuilder`].
#[derive(Debug, Clone, PartialEq)]
pub struct ExtensionCatalog {
    pub(crate) methods: IndexMap<String, Vec<ExtensionMethod>>,
    pub(crate) classes: Vec<String>,
    pub(crate) static_classes: Vec<String>,
    pub(crate) load_failures: Vec<ExtensionLoadFailure>,
    pub(crate) level: GroovyLevel,
}

impl ExtensionCatalog {
    pub(crate) fn empty(level: GroovyLevel) -> Self {
        Self {
            methods: IndexMap::new(),
            classes: Vec::new(),
            static_classes: Vec::new(),
            load_failures: Vec::new(),
            level,
        }
    }

    /// Candidates named `name`, in registration order.
    pub fn candidates(&self, name: &str) -> &[ExtensionMethod] {
        self.methods.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of registered methods.
    pub fn len(&self) -> usize {
        self.methods.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }

    /// Instance extension classes in registration order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn static_classes(&self) -> &[String] {
        &self.static_classes
    }

    pub fn load_failures(&self) -> &[ExtensionLoadFailure] {
        &self.load_failures
    }

    pub fn level(&self) -> GroovyLevel {
        self.level
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExtensionMethod> {
        self.methods.values().flatten()
    }
}

/// Contents of an `org.codehaus.groovy.runtime.ExtensionModule` descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    pub name: String,
    pub version: String,
    pub extension_classes: Vec<String>,
    pub static_extension_classes: Vec<String>,
}

impl ModuleDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: "1.0".to_string(),
            ..Default::default()
        }
    }

    pub fn with_extension_class(mut self, class: impl Into<String>) -> Self {
        self.extension_classes.push(class.into());
        self
    }

    pub fn with_static_extension_class(mut self, class: impl Into<String>) -> Self {
        self.static_extension_classes.push(class.into());
        self
    }

    /// Every class of the module, instance classes first.
    pub fn all_classes(&self) -> impl Iterator<Item = &String> {
        self.extension_classes
            .iter()
            .chain(self.static_extension_classes.iter())
    }

    /// Parse the Java properties text of a descriptor file found at `path`.
    pub fn from_properties(text: &str, path: &Path) -> Result<Self> {
        let props = parse_properties(text);
        let get = |key: &str| props.get(key).map(String::as_str).unwrap_or("");
        let name = get("moduleName");
        if name.is_empty() {
            return Err(CatalogError::InvalidDescriptor {
                path: path.to_path_buf(),
                reason: "missing moduleName".to_string(),
            });
        }
        let list = |key: &str| -> Vec<String> {
            get(key)
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        };
        Ok(Self {
            name: name.to_string(),
            version: get("moduleVersion").to_string(),
            extension_classes: list("extensionClasses"),
            static_extension_classes: list("staticExtensionClasses"),
        })
    }
}

/// `key=value` / `key: value` lines, `#` and `!` comments, `\` continuations.
fn parse_properties(text: &str) -> IndexMap<String, String> {
    let mut props = IndexMap::new();
    let mut logical = String::new();
    for line in text.lines() {
        let line = line.trim_start();
        if logical.is_empty() && (line.is_empty() || line.starts_with('#') || line.starts_with('!'))
        {
            continue;
        }
        match line.strip_suffix('\\') {
            Some(head) => {
                logical.push_str(head);
                continue;
            }
            None => logical.push_str(line),
        }
        if let Some(idx) = logical.find(['=', ':']) {
            let key = logical[..idx].trim().to_string();
            let value = logical[idx + 1..].trim().to_string();
            props.insert(key, value);
        }
        logical.clear();
    }
    props
}

/// A JSON extension class descriptor.
///
/// ```json
/// { "name": "com.acme.ListExtensions",
///   "methods": [
///     "static <T> java.util.List<T> shout(java.util.List<T> self)",
///     { "signature": "static void eachShout(java.util.List self, groovy.lang.Closure c)",
///       "closure": "element" } ] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDescriptor {
    pub name: String,
    #[serde(default)]
    pub methods: Vec<MethodEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MethodEntry {
    Signature(String),
    Detailed {
        signature: String,
        #[serde(default)]
        closure: ClosureHint,
    },
}

impl MethodEntry {
    pub fn signature(&self) -> &str {
        match self {
            MethodEntry::Signature(s) | MethodEntry::Detailed { signature: s, .. } => s,
        }
    }

    pub fn closure(&self) -> ClosureHint {
        match self {
            MethodEntry::Signature(_) => ClosureHint::None,
            MethodEntry::Detailed { closure, .. } => closure.clone(),
        }
    }
}

impl ClassDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
        }
    }

    pub fn with_method(mut self, signature: impl Into<String>) -> Self {
        self.methods.push(MethodEntry::Signature(signature.into()));
        self
    }

    pub fn with_closure_method(mut self, signature: impl Into<String>, closure: ClosureHint) -> Self {
        self.methods.push(MethodEntry::Detailed {
            signature: signature.into(),
            closure,
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hint_strings() {
        assert_eq!("element".parse::<ClosureHint>(), Ok(ClosureHint::Element));
        assert_eq!("".parse::<ClosureHint>(), Ok(ClosureHint::None));
        assert_eq!(
            "simple:java.util.List<java.lang.String>,java.lang.Integer".parse::<ClosureHint>(),
            Ok(ClosureHint::Simple(vec![
                "java.util.List<java.lang.String>".to_string(),
                "java.lang.Integer".to_string()
            ]))
        );
        assert!("sideways".parse::<ClosureHint>().is_err());
    }

    #[test]
    fn test_simple_hint_resolves_types() {
        let hint = ClosureHint::Simple(vec!["java.util.List<String>".to_string()]);
        let ClosureShape::Simple(types) = hint.resolve().unwrap() else {
            panic!("expected a simple shape");
        };
        assert_eq!(types[0].to_string(), "java.util.List<java.lang.String>");
    }

    #[test]
    fn test_hint_json_forms() {
        let entries: Vec<MethodEntry> = serde_json::from_str(
            r#"["static void a(Object self)",
                {"signature": "static void b(Object self, Closure c)", "closure": "firstParam"},
                {"signature": "static void c(Object self, Closure c)", "closure": {"simple": ["java.io.File"]}}]"#,
        )
        .unwrap();
        assert_eq!(entries[0].closure(), ClosureHint::None);
        assert_eq!(entries[1].closure(), ClosureHint::FirstParam);
        assert_eq!(
            entries[2].closure().resolve().unwrap(),
            ClosureShape::Simple(vec![TypeRef::id("java.io.File")])
        );
    }

    #[test]
    fn test_module_properties() {
        let text = "# comment\nmoduleName = acme-ext\nmoduleVersion=1.2\n\
                    extensionClasses=com.acme.A, \\\n  com.acme.B\nstaticExtensionClasses=\n";
        let module = ModuleDescriptor::from_properties(text, Path::new("x")).unwrap();
        assert_eq!(module.name, "acme-ext");
        assert_eq!(module.version, "1.2");
        assert_eq!(module.extension_classes, vec!["com.acme.A", "com.acme.B"]);
        assert!(module.static_extension_classes.is_empty());

        let err = ModuleDescriptor::from_properties("moduleVersion=1", Path::new("x"));
        assert!(matches!(err, Err(CatalogError::InvalidDescriptor { .. })));
    }
}
