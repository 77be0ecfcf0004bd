//! Seeded generators kept around between queries.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use lru::LruCache;
use tracing::debug;

use seedmap_core::{GenError, McVersion};

use crate::generator::{Generator, GeneratorOptions};
use crate::registry::TreeRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey {
    version: McVersion,
    options: GeneratorOptions,
    seed: u64,
}

/// LRU of seeded generators keyed by version, options and seed.
///
/// Only the map is locked; generators are handed out as `Arc`s and queried
/// without holding the lock.
pub struct GeneratorCache {
    trees: Arc<TreeRegistry>,
    entries: Mutex<LruCache<CacheKey, Arc<Generator>>>,
}

impl GeneratorCache {
    /// Cache holding at most `capacity` generators (at least one).
    pub fn new(trees: Arc<TreeRegistry>, capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            trees,
            entries: Mutex::new(LruCache::new(cap)),
        }
    }

    /// Trees new generators are built from.
    pub fn trees(&self) -> &Arc<TreeRegistry> {
        &self.trees
    }

    /// Generator for `(version, options, seed)`, built on first use.
    pub fn get(
        &self,
        version: McVersion,
        options: GeneratorOptions,
        seed: u64,
    ) -> Result<Arc<Generator>, GenError> {
        let key = CacheKey {
            version,
            options,
            seed,
        };
        if let Some(hit) = self.lock().get(&key) {
            return Ok(Arc::clone(hit));
        }

        // Built outside the lock; a racing builder for the same key simply
        // replaces an identical entry.
        let generator = Arc::new(Generator::with_seed(version, options, &self.trees, seed)?);
        debug!(%version, seed, "cached new generator");
        self.lock().put(key, Arc::clone(&generator));
        Ok(generator)
    }

    /// Number of cached generators.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[allow(missing_docs)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LruCache<CacheKey, Arc<Generator>>> {
        // Entries are immutable once inserted, so a poisoned map is still
        // consistent.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache(capacity: usize) -> GeneratorCache {
        GeneratorCache::new(Arc::new(TreeRegistry::empty()), capacity)
    }

    #[test]
    fn repeated_keys_share_one_generator() {
        let cache = cache(4);
        let a = cache.get(McVersion::V1_12, GeneratorOptions::default(), 42).unwrap();
        let b = cache.get(McVersion::V1_12, GeneratorOptions::default(), 42).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn distinct_seeds_get_distinct_generators() {
        let cache = cache(4);
        let a = cache.get(McVersion::V1_12, GeneratorOptions::default(), 1).unwrap();
        let b = cache.get(McVersion::V1_12, GeneratorOptions::default(), 2).unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(a.world_seed(), 1);
        assert_eq!(b.world_seed(), 2);
    }

    #[test]
    fn least_recent_entry_is_evicted() {
        let cache = cache(2);
        let opts = GeneratorOptions::default();
        let first = cache.get(McVersion::B1_7, opts, 1).unwrap();
        cache.get(McVersion::B1_7, opts, 2).unwrap();
        cache.get(McVersion::B1_7, opts, 3).unwrap();
        assert_eq!(cache.len(), 2);
        let again = cache.get(McVersion::B1_7, opts, 1).unwrap();
        assert!(!Arc::ptr_eq(&first, &again));
    }

    #[test]
    fn failures_are_not_cached() {
        let cache = cache(2);
        assert!(cache.get(McVersion::V1_20, GeneratorOptions::default(), 0).is_err());
        assert!(cache.is_empty());
    }
}
