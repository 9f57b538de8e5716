//! Builtin JDK and Groovy runtime types.
//!
//! The table in [`table`] is written in the compact signature syntax of
//! [`crate::parser::signature`] and parsed once on first use. Lines that do
//! not parse are logged and skipped, so a typo never takes the table down.

mod table;

use crate::inference::core::type_system::{InheritanceProvider, MemberProvider, TypeProvider};
use crate::inference::core::types::{MemberInfo, TypeInfo, TypeResolutionContext};
use crate::parser::signature::{self, SignatureError};
use groovyscope_api::TypeRef;
use once_cell::sync::Lazy;
use std::collections::HashMap;

static JDK: Lazy<JdkTypeSystem> = Lazy::new(JdkTypeSystem::load);

/// The shared builtin type table.
pub fn jdk() -> &'static JdkTypeSystem {
    &JDK
}

/// A problem found while loading the builtin table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableError {
    pub owner: String,
    pub line: String,
    pub error: SignatureError,
}

/// Type system over the builtin table.
#[derive(Debug, Default)]
pub struct JdkTypeSystem {
    types: HashMap<String, TypeInfo>,
    members: HashMap<String, Vec<MemberInfo>>,
    /// Simple name (`Map$Entry` for nested types) to FQN, for every table type
    simple_names: HashMap<String, String>,
    errors: Vec<TableError>,
}

impl JdkTypeSystem {
    fn load() -> Self {
        let mut ts = JdkTypeSystem::default();

        // Pass 1: names, so headers can refer to types declared later.
        for (header, _) in table::TYPES {
            if let Some(fqn) = header_fqn(header) {
                ts.simple_names.insert(simple_name(fqn).to_string(), fqn.to_string());
            }
        }

        // Pass 2: headers.
        let mut owners = Vec::with_capacity(table::TYPES.len());
        for (header, members) in table::TYPES {
            let parsed = signature::parse_type_header(header, &|n| ts.resolve_simple(n));
            match parsed {
                Ok(info) => {
                    owners.push(Some((info.fqn.clone(), members)));
                    ts.types.insert(info.fqn.clone(), info);
                }
                Err(error) => {
                    owners.push(None);
                    ts.record(header, header, error);
                }
            }
        }

        // Pass 3: members, with the class type parameters in scope.
        for (fqn, members) in owners.into_iter().flatten() {
            let class_params: Vec<String> = ts
                .types
                .get(&fqn)
                .map(|info| info.type_parameters.iter().map(|p| p.name.clone()).collect())
                .unwrap_or_default();
            let mut parsed = Vec::with_capacity(members.len());
            for line in members.iter() {
                let member =
                    signature::parse_member(line, &fqn, &class_params, &|n| ts.resolve_simple(n));
                match member {
                    Ok(member) => parsed.push(member),
                    Err(error) => ts.record(&fqn, line, error),
                }
            }
            ts.members.insert(fqn, parsed);
        }

        tracing::debug!(
            "Loaded builtin table: {} types, {} members",
            ts.types.len(),
            ts.members.values().map(Vec::len).sum::<usize>()
        );
        ts
    }

    fn record(&mut self, owner: &str, line: &str, error: SignatureError) {
        tracing::warn!("Skipping builtin signature in {}: {}", owner, error);
        self.errors.push(TableError {
            owner: owner.to_string(),
            line: line.to_string(),
            error,
        });
    }

    /// Resolve a simple table name (`List`, `Map$Entry`, `FileType`) or a
    /// dotted FQN of a table type.
    pub fn resolve_simple(&self, name: &str) -> Option<String> {
        if self.types.contains_key(name) {
            return Some(name.to_string());
        }
        self.simple_names.get(name).cloned()
    }

    pub fn contains(&self, fqn: &str) -> bool {
        self.types.contains_key(fqn)
    }

    /// Every type FQN in the table, sorted.
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.types.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Lines that failed to parse when the table was loaded.
    pub fn load_errors(&self) -> &[TableError] {
        &self.errors
    }
}

impl TypeProvider for JdkTypeSystem {
    fn get_type_info(&self, fqn: &str) -> Option<TypeInfo> {
        self.types.get(fqn).cloned()
    }

    fn resolve_type_name(&self, name: &str, ctx: &TypeResolutionContext) -> Option<String> {
        if TypeRef::is_primitive_name(name) {
            return Some(name.to_string());
        }

        if let Some((_, fqn)) = ctx.imports.iter().find(|(visible, _)| visible == name) {
            return Some(fqn.clone());
        }

        if name.contains('.') {
            if self.contains(name) {
                return Some(name.to_string());
            }
            // `Map.Entry` style references to nested types
            let (outer, inner) = name.split_once('.')?;
            let outer_fqn = self.resolve_type_name(outer, ctx)?;
            let nested = format!("{}${}", outer_fqn, inner.replace('.', "$"));
            return self.contains(&nested).then_some(nested);
        }

        if let Some(fqn) = ctx.known_fqns.iter().find(|f| simple_name(f) == name) {
            return Some(fqn.clone());
        }

        let on_demand = ctx
            .star_imports
            .iter()
            .map(String::as_str)
            .chain(TypeResolutionContext::DEFAULT_PACKAGES.iter().copied());
        for prefix in on_demand {
            for candidate in [format!("{prefix}.{name}"), format!("{prefix}${name}")] {
                if self.contains(&candidate) {
                    return Some(candidate);
                }
            }
        }

        TypeResolutionContext::DEFAULT_CLASSES
            .iter()
            .find(|fqn| simple_name(fqn) == name)
            .map(|fqn| fqn.to_string())
    }
}

impl InheritanceProvider for JdkTypeSystem {
    fn supertypes(&self, fqn: &str) -> Vec<TypeRef> {
        self.types
            .get(fqn)
            .map(|info| info.supertypes().cloned().collect())
            .unwrap_or_default()
    }
}

impl MemberProvider for JdkTypeSystem {
    fn get_members(&self, type_fqn: &str, member_name: &str) -> Vec<MemberInfo> {
        self.members
            .get(type_fqn)
            .map(|members| {
                members
                    .iter()
                    .filter(|m| m.name == member_name)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    fn get_all_members(&self, type_fqn: &str) -> Vec<MemberInfo> {
        self.members.get(type_fqn).cloned().unwrap_or_default()
    }
}

fn header_fqn(header: &str) -> Option<&str> {
    let name = header
        .split_whitespace()
        .skip_while(|w| signature::TYPE_MODIFIERS.contains(w))
        .nth(1)?;
    Some(name.split('<').next().unwrap_or(name))
}

/// Last dotted segment: `java.util.Map$Entry` -> `Map$Entry`.
pub(crate) fn simple_name(fqn: &str) -> &str {
    fqn.rsplit('.').next().unwrap_or(fqn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::core::type_system::GroovyTypeSystem;
    use groovyscope_api::names;

    #[test]
    fn test_table_parses_cleanly() {
        let errors = jdk().load_errors();
        assert!(errors.is_empty(), "{errors:?}");
        assert!(jdk().contains(names::MAP_ENTRY));
        assert!(jdk().contains("groovy.io.FileType"));
    }

    #[test]
    fn test_abstract_types_load() {
        assert_eq!(
            header_fqn("abstract class java.io.Reader<T> implements java.io.Closeable"),
            Some("java.io.Reader")
        );
        let ts = jdk();
        for fqn in ["java.lang.Number", "java.io.Writer", names::CLOSURE, "groovy.lang.Script"] {
            assert!(ts.get_type_info(fqn).is_some(), "{fqn} missing");
        }
        assert!(ts.is_subtype(&TypeRef::id("java.lang.Integer"), &TypeRef::id("java.lang.Number")));
        assert!(!ts.find_member_in_hierarchy("java.lang.Integer", "intValue").is_empty());
    }

    #[test]
    fn test_default_imports() {
        let ctx = TypeResolutionContext::default();
        let ts = jdk();
        assert_eq!(ts.resolve_type_name("String", &ctx).as_deref(), Some(names::STRING));
        assert_eq!(ts.resolve_type_name("File", &ctx).as_deref(), Some("java.io.File"));
        assert_eq!(ts.resolve_type_name("Closure", &ctx).as_deref(), Some(names::CLOSURE));
        assert_eq!(
            ts.resolve_type_name("BigDecimal", &ctx).as_deref(),
            Some(names::BIG_DECIMAL)
        );
        assert_eq!(
            ts.resolve_type_name("Map.Entry", &ctx).as_deref(),
            Some(names::MAP_ENTRY)
        );
        // not imported by default
        assert_eq!(ts.resolve_type_name("Pattern", &ctx), None);
        assert_eq!(ts.resolve_type_name("FileType", &ctx), None);
    }

    #[test]
    fn test_star_and_single_imports() {
        let ctx = TypeResolutionContext {
            imports: vec![("FT".to_string(), "groovy.io.FileType".to_string())],
            star_imports: vec!["java.util.regex".to_string()],
            ..Default::default()
        };
        let ts = jdk();
        assert_eq!(ts.resolve_type_name("Matcher", &ctx).as_deref(), Some("java.util.regex.Matcher"));
        assert_eq!(ts.resolve_type_name("FT", &ctx).as_deref(), Some("groovy.io.FileType"));
    }

    #[test]
    fn test_generic_supertype_view() {
        let ts = jdk();
        let list = TypeRef::generic("java.util.ArrayList", vec![TypeRef::string()]);
        let iterable = ts.as_super(&list, names::ITERABLE).unwrap();
        assert_eq!(iterable.to_string(), "java.lang.Iterable<java.lang.String>");

        let map = TypeRef::generic(
            names::LINKED_HASH_MAP,
            vec![TypeRef::string(), TypeRef::id(names::INTEGER)],
        );
        let view = ts.as_super(&map, names::MAP).unwrap();
        assert_eq!(view.to_string(), "java.util.Map<java.lang.String,java.lang.Integer>");
    }

    #[test]
    fn test_members_are_inherited_through_hierarchy() {
        let ts = jdk();
        let found = ts.find_member_in_hierarchy("java.util.ArrayList", "size");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].declaring_type, "java.util.Collection");
        assert!(!ts.find_member_in_hierarchy("java.io.BufferedReader", "readLine").is_empty());
    }
}
