//! Catalog partitions and their cache
//!
//! A [`Catalog`] pairs a loader with an in-memory cache of already
//! loaded (namespace, group, locale) partitions. Two independent
//! catalogs exist at runtime, one for the default tier and one for the
//! brand tier, so their caches never mix.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::loader::CatalogLoader;

type PartitionKey = (String, String, String);

/// Memoized catalog partitions, keyed by (namespace, group, locale)
///
/// A partition, once loaded, is immutable and kept for the process
/// lifetime. Empty partitions are valid, cacheable results: a group
/// with no backing file is loaded exactly once and misses from memory
/// afterwards.
pub struct CatalogCache {
    loaded: RwLock<HashMap<PartitionKey, Arc<HashMap<String, String>>>>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self {
            loaded: RwLock::new(HashMap::new()),
        }
    }

    /// Fetch the partition, populating it from `loader` on first access
    ///
    /// Concurrent first accesses may both reach the loader; the
    /// partition is immutable, so either result is valid and the first
    /// stored one wins.
    pub fn load(
        &self,
        loader: &dyn CatalogLoader,
        namespace: &str,
        group: &str,
        locale: &str,
    ) -> Arc<HashMap<String, String>> {
        let key = (namespace.to_owned(), group.to_owned(), locale.to_owned());

        {
            let loaded = self.loaded.read().unwrap_or_else(|e| e.into_inner());
            if let Some(lines) = loaded.get(&key) {
                return Arc::clone(lines);
            }
        }

        let lines = Arc::new(loader.load(locale, group, namespace));
        let mut loaded = self.loaded.write().unwrap_or_else(|e| e.into_inner());
        Arc::clone(loaded.entry(key).or_insert(lines))
    }

    /// Whether the partition has been loaded already
    pub fn is_loaded(&self, namespace: &str, group: &str, locale: &str) -> bool {
        let key = (namespace.to_owned(), group.to_owned(), locale.to_owned());
        self.loaded
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(&key)
    }

    /// Drop every cached partition so the next access reloads
    pub fn invalidate(&self) {
        self.loaded
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}

impl Default for CatalogCache {
    fn default() -> Self {
        Self::new()
    }
}

/// One catalog tier: a loader and its cache
pub struct Catalog {
    loader: Box<dyn CatalogLoader>,
    cache: CatalogCache,
}

impl Catalog {
    pub fn new(loader: Box<dyn CatalogLoader>) -> Self {
        Self {
            loader,
            cache: CatalogCache::new(),
        }
    }

    /// Look up a single line; `None` when the partition or the item is
    /// absent
    pub fn line(&self, namespace: &str, group: &str, item: &str, locale: &str) -> Option<String> {
        let lines = self.cache.load(self.loader.as_ref(), namespace, group, locale);
        lines.get(item).cloned()
    }

    pub fn cache(&self) -> &CatalogCache {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::GLOBAL_NAMESPACE;
    use crate::loader::MemoryLoader;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingLoader {
        calls: Arc<AtomicUsize>,
        inner: MemoryLoader,
    }

    impl CatalogLoader for CountingLoader {
        fn load(&self, locale: &str, group: &str, namespace: &str) -> HashMap<String, String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.load(locale, group, namespace)
        }
    }

    fn counting_catalog() -> (Catalog, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let loader = CountingLoader {
            calls: Arc::clone(&calls),
            inner: MemoryLoader::new().with_line("en", "greeting", "hello", "Hello"),
        };
        (Catalog::new(Box::new(loader)), calls)
    }

    #[test]
    fn test_partition_loaded_once() {
        let (catalog, calls) = counting_catalog();

        assert_eq!(
            catalog.line(GLOBAL_NAMESPACE, "greeting", "hello", "en"),
            Some("Hello".to_string())
        );
        assert_eq!(
            catalog.line(GLOBAL_NAMESPACE, "greeting", "hello", "en"),
            Some("Hello".to_string())
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_empty_partition_is_cached() {
        let (catalog, calls) = counting_catalog();

        assert_eq!(catalog.line(GLOBAL_NAMESPACE, "absent", "x", "en"), None);
        assert_eq!(catalog.line(GLOBAL_NAMESPACE, "absent", "x", "en"), None);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(catalog.cache().is_loaded(GLOBAL_NAMESPACE, "absent", "en"));
    }

    #[test]
    fn test_distinct_partitions_loaded_separately() {
        let (catalog, calls) = counting_catalog();

        catalog.line(GLOBAL_NAMESPACE, "greeting", "hello", "en");
        catalog.line(GLOBAL_NAMESPACE, "greeting", "hello", "nl");
        catalog.line(GLOBAL_NAMESPACE, "messages", "hello", "en");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_invalidate_forces_reload() {
        let (catalog, calls) = counting_catalog();

        catalog.line(GLOBAL_NAMESPACE, "greeting", "hello", "en");
        catalog.cache().invalidate();
        assert!(!catalog.cache().is_loaded(GLOBAL_NAMESPACE, "greeting", "en"));

        catalog.line(GLOBAL_NAMESPACE, "greeting", "hello", "en");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_concurrent_population_converges() {
        let calls = Arc::new(AtomicUsize::new(0));
        let loader = CountingLoader {
            calls: Arc::clone(&calls),
            inner: MemoryLoader::new().with_line("en", "greeting", "hello", "Hello"),
        };
        let catalog = Arc::new(Catalog::new(Box::new(loader)));
        let results = Arc::new(Mutex::new(Vec::new()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let catalog = Arc::clone(&catalog);
                let results = Arc::clone(&results);
                std::thread::spawn(move || {
                    let line = catalog.line(GLOBAL_NAMESPACE, "greeting", "hello", "en");
                    results.lock().unwrap().push(line);
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let results = results.lock().unwrap();
        assert!(results.iter().all(|line| line == &Some("Hello".to_string())));
        // Racing threads may load redundantly, but the cache must have
        // settled on a single stored partition.
        assert!(calls.load(Ordering::SeqCst) >= 1);
        assert!(catalog.cache().is_loaded(GLOBAL_NAMESPACE, "greeting", "en"));
    }
}
