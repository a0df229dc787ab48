use std::num::NonZeroUsize;

use keyshape_path_core::Path;
use lru::LruCache;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::MorphMethod;

/// Entries are listed in [`CacheStats::cached_progress`] only below this size.
pub const LISTED_PROGRESS_LIMIT: usize = 20;

/// Cache key for a morph result.
///
/// `method` is the resolved strategy, never `Auto`. Progress is keyed by its
/// bit pattern with `-0.0` folded onto `0.0`, so equal finite values always
/// share an entry.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub(crate) struct MorphKey {
    method: MorphMethod,
    progress_bits: u64,
}

impl MorphKey {
    #[inline]
    pub(crate) fn new(method: MorphMethod, progress: f64) -> Self {
        let normalized = if progress == 0.0 { 0.0 } else { progress };
        Self {
            method,
            progress_bits: normalized.to_bits(),
        }
    }

    #[inline]
    pub(crate) fn progress(self) -> f64 {
        f64::from_bits(self.progress_bits)
    }
}

/// Snapshot of a morpher's cache performance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    pub size: usize,
    /// `None` when the cache is unbounded
    pub max_size: Option<usize>,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
    /// Sorted cached progress values, omitted for large caches
    pub cached_progress: Option<Vec<f64>>,
}

/// Least-recently-used map from (strategy, progress) to computed path.
pub(crate) struct ProgressCache {
    entries: LruCache<MorphKey, Path>,
    max_size: Option<usize>,
    hits: u64,
    misses: u64,
}

impl ProgressCache {
    pub(crate) fn new(max_size: Option<usize>) -> Self {
        match max_size {
            Some(n) => {
                let cap = NonZeroUsize::new(n).unwrap_or(NonZeroUsize::MIN);
                Self {
                    entries: LruCache::new(cap),
                    max_size: Some(cap.get()),
                    hits: 0,
                    misses: 0,
                }
            }
            None => Self {
                entries: LruCache::unbounded(),
                max_size: None,
                hits: 0,
                misses: 0,
            },
        }
    }

    /// Look up `key`, promoting it to most recently used on a hit.
    pub(crate) fn get(&mut self, key: MorphKey) -> Option<Path> {
        match self.entries.get(&key) {
            Some(path) => {
                self.hits += 1;
                Some(path.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub(crate) fn insert(&mut self, key: MorphKey, path: Path) {
        if let Some((evicted, _)) = self.entries.push(key, path) {
            if evicted != key {
                trace!(progress = evicted.progress(), "evicted least recently used morph");
            }
        }
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn stats(&self) -> CacheStats {
        let total = self.hits + self.misses;
        let hit_rate = if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        };
        let cached_progress = (self.entries.len() < LISTED_PROGRESS_LIMIT).then(|| {
            let mut values: Vec<f64> = self.entries.iter().map(|(k, _)| k.progress()).collect();
            values.sort_by(f64::total_cmp);
            values.dedup();
            values
        });
        CacheStats {
            size: self.entries.len(),
            max_size: self.max_size,
            hits: self.hits,
            misses: self.misses,
            hit_rate,
            cached_progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy() -> Path {
        Path::parse("M0 0 L1 1").unwrap()
    }

    fn key(progress: f64) -> MorphKey {
        MorphKey::new(MorphMethod::Shape, progress)
    }

    #[test]
    fn negative_zero_shares_entry() {
        assert_eq!(key(-0.0), key(0.0));
        assert_ne!(key(0.1), key(0.2));
    }

    #[test]
    fn strategies_do_not_share_entries() {
        let mut cache = ProgressCache::new(Some(4));
        cache.insert(MorphKey::new(MorphMethod::Shape, 0.5), dummy());
        assert!(cache.get(MorphKey::new(MorphMethod::Stroke, 0.5)).is_none());
        cache.insert(MorphKey::new(MorphMethod::Stroke, 0.5), dummy());

        let stats = cache.stats();
        assert_eq!(stats.size, 2);
        assert_eq!(stats.cached_progress, Some(vec![0.5]));
    }

    #[test]
    fn get_refreshes_recency() {
        let mut cache = ProgressCache::new(Some(2));
        cache.insert(key(0.1), dummy());
        cache.insert(key(0.2), dummy());
        assert!(cache.get(key(0.1)).is_some());
        cache.insert(key(0.3), dummy());

        let stats = cache.stats();
        assert_eq!(stats.cached_progress, Some(vec![0.1, 0.3]));
        assert_eq!(stats.hits, 1);
    }

    #[test]
    fn zero_bound_is_clamped() {
        let cache = ProgressCache::new(Some(0));
        assert_eq!(cache.stats().max_size, Some(1));
    }

    #[test]
    fn large_caches_omit_listing() {
        let mut cache = ProgressCache::new(None);
        for i in 0..LISTED_PROGRESS_LIMIT {
            cache.insert(key(i as f64 / 100.0), dummy());
        }
        let stats = cache.stats();
        assert_eq!(stats.size, LISTED_PROGRESS_LIMIT);
        assert_eq!(stats.max_size, None);
        assert!(stats.cached_progress.is_none());
    }
}
