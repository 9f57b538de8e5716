//! Caller-owned cache of built catalogs, keyed by classpath scope.

use super::builder::CatalogBuilder;
use super::model::ExtensionCatalog;
use super::provider::ExtensionModuleProvider;
use dashmap::DashMap;
use groovyscope_core::GroovyLevel;
use once_cell::sync::OnceCell;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use xxhash_rust::xxh3::xxh3_64;

/// Identity of a classpath scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ScopeId(u64);

impl ScopeId {
    /// Hash of the ordered classpath entries.
    pub fn from_entries(entries: &[PathBuf]) -> Self {
        let joined = entries
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join("\0");
        ScopeId(xxh3_64(joined.as_bytes()))
    }

    pub fn of(label: &str) -> Self {
        ScopeId(xxh3_64(label.as_bytes()))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

type Slot = Arc<OnceCell<Arc<ExtensionCatalog>>>;

/// One classpath scope at one language level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey {
    scope: ScopeId,
    level: GroovyLevel,
}

/// Built catalogs shared across queries and threads.
///
/// Concurrent first requests for a scope and level serialise on that entry's
/// cell, so a catalog is built at most once until it is invalidated.
#[derive(Debug, Default)]
pub struct CatalogCache {
    entries: DashMap<CacheKey, Slot>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog for `scope` at `level`, running `build` on first use.
    pub fn get_or_build<F>(&self, scope: ScopeId, level: GroovyLevel, build: F) -> Arc<ExtensionCatalog>
    where
        F: FnOnce() -> ExtensionCatalog,
    {
        // Clone the slot out so the shard lock is released before building.
        let slot: Slot = self
            .entries
            .entry(CacheKey { scope, level })
            .or_default()
            .clone();
        slot.get_or_init(|| {
            let catalog = build();
            tracing::info!(
                "Built extension catalog for scope {} at Groovy {}: {} methods, {} load failures",
                scope,
                level,
                catalog.len(),
                catalog.load_failures().len()
            );
            Arc::new(catalog)
        })
        .clone()
    }

    /// Build (or reuse) the catalog of `provider` at `level`.
    pub fn catalog_for(
        &self,
        provider: &dyn ExtensionModuleProvider,
        level: GroovyLevel,
    ) -> Arc<ExtensionCatalog> {
        self.get_or_build(provider.scope_id(), level, || {
            CatalogBuilder::new(level).with_provider(provider).build()
        })
    }

    /// The catalog for `scope` at `level` if it has been built.
    pub fn get(&self, scope: ScopeId, level: GroovyLevel) -> Option<Arc<ExtensionCatalog>> {
        self.entries.get(&CacheKey { scope, level })?.get().cloned()
    }

    /// Drop the catalogs of `scope` at every level; the next request
    /// rebuilds them. Returns whether anything was cached.
    pub fn invalidate(&self, scope: ScopeId) -> bool {
        let mut removed = 0;
        self.entries.retain(|key, _| {
            let keep = key.scope != scope;
            if !keep {
                removed += 1;
            }
            keep
        });
        if removed > 0 {
            tracing::debug!(
                "Invalidated {} extension catalogs for scope {}",
                removed,
                scope
            );
        }
        removed > 0
    }

    /// Drop the catalog of `scope` at one `level` only.
    pub fn invalidate_level(&self, scope: ScopeId, level: GroovyLevel) -> bool {
        let removed = self.entries.remove(&CacheKey { scope, level }).is_some();
        if removed {
            tracing::debug!(
                "Invalidated extension catalog for scope {} at Groovy {}",
                scope,
                level
            );
        }
        removed
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_scope_id_depends_on_order() {
        let a = ScopeId::from_entries(&[PathBuf::from("a.jar"), PathBuf::from("b.jar")]);
        let b = ScopeId::from_entries(&[PathBuf::from("b.jar"), PathBuf::from("a.jar")]);
        assert_ne!(a, b);
        assert_eq!(
            a,
            ScopeId::from_entries(&[PathBuf::from("a.jar"), PathBuf::from("b.jar")])
        );
    }

    #[test]
    fn test_build_runs_once_until_invalidated() {
        let cache = CatalogCache::new();
        let scope = ScopeId::of("test");
        let builds = AtomicUsize::new(0);
        let build = || {
            builds.fetch_add(1, Ordering::SeqCst);
            ExtensionCatalog::empty(GroovyLevel::V2_5)
        };

        let level = GroovyLevel::V2_5;
        let first = cache.get_or_build(scope, level, build);
        let second = cache.get_or_build(scope, level, build);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(builds.load(Ordering::SeqCst), 1);

        assert!(cache.invalidate(scope));
        assert!(cache.get(scope, level).is_none());
        let third = cache.get_or_build(scope, level, build);
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(builds.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_invalidate_drops_every_level_of_a_scope() {
        let cache = CatalogCache::new();
        let scope = ScopeId::of("classpath");
        let other = ScopeId::of("other");
        for level in [GroovyLevel::V1_8, GroovyLevel::V2_5] {
            cache.get_or_build(scope, level, || ExtensionCatalog::empty(level));
        }
        cache.get_or_build(other, GroovyLevel::V2_5, || {
            ExtensionCatalog::empty(GroovyLevel::V2_5)
        });
        assert_eq!(cache.len(), 3);

        assert!(cache.invalidate(scope));
        assert_eq!(cache.len(), 1);
        assert!(cache.get(scope, GroovyLevel::V1_8).is_none());
        assert!(cache.get(scope, GroovyLevel::V2_5).is_none());
        assert!(cache.get(other, GroovyLevel::V2_5).is_some());
        assert!(!cache.invalidate(scope));
    }
}
