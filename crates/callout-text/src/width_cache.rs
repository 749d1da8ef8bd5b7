#![forbid(unsafe_code)]

//! LRU width cache for text measurement.
//!
//! Bubbles are re-measured whenever they open, usually with the same few
//! strings, so display widths are memoized.
//!
//! # Example
//! ```
//! use callout_text::WidthCache;
//!
//! let mut cache = WidthCache::new(64);
//! assert_eq!(cache.get_or_compute("Hello, world!"), 13);
//! assert_eq!(cache.get_or_compute("Hello, world!"), 13);
//!
//! let stats = cache.stats();
//! assert_eq!(stats.hits, 1);
//! assert_eq!(stats.misses, 1);
//! ```

use lru::LruCache;
use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;

/// Default cache capacity.
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

/// Statistics about cache performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Current number of entries.
    pub size: usize,
    /// Maximum capacity.
    pub capacity: usize,
}

impl CacheStats {
    /// Hit rate (0.0 to 1.0).
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// LRU cache of display widths, keyed by a 64-bit FxHash of the text.
///
/// Not thread-safe; each [`TextMeasurer`](crate::TextMeasurer) owns one.
#[derive(Debug)]
pub struct WidthCache {
    cache: LruCache<u64, usize>,
    hits: u64,
    misses: u64,
}

impl WidthCache {
    /// Create a cache holding up to `capacity` entries (at least one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: LruCache::new(non_zero(capacity)),
            hits: 0,
            misses: 0,
        }
    }

    /// Width of `text`, computed with [`display_width`](crate::display_width)
    /// on a miss.
    #[inline]
    pub fn get_or_compute(&mut self, text: &str) -> usize {
        self.get_or_compute_with(text, crate::display_width)
    }

    /// Width of `text`, computed with `compute` on a miss.
    pub fn get_or_compute_with<F>(&mut self, text: &str, compute: F) -> usize
    where
        F: FnOnce(&str) -> usize,
    {
        let hash = hash_text(text);

        if let Some(&width) = self.cache.get(&hash) {
            self.hits += 1;
            return width;
        }

        self.misses += 1;
        let width = compute(text);
        self.cache.put(hash, width);
        width
    }

    /// Whether `text` is cached.
    #[must_use]
    pub fn contains(&self, text: &str) -> bool {
        self.cache.contains(&hash_text(text))
    }

    /// Drop every entry. Statistics are kept.
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Cache statistics.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            size: self.cache.len(),
            capacity: self.cache.cap().get(),
        }
    }

    /// Number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Change the capacity, evicting least recently used entries if needed.
    pub fn resize(&mut self, capacity: usize) {
        self.cache.resize(non_zero(capacity));
    }
}

impl Default for WidthCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

#[inline]
fn non_zero(capacity: usize) -> NonZeroUsize {
    NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN)
}

#[inline]
fn hash_text(text: &str) -> u64 {
    let mut hasher = FxHasher::default();
    text.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cache_is_empty() {
        let cache = WidthCache::new(100);
        assert!(cache.is_empty());
        assert_eq!(cache.stats().capacity, 100);
    }

    #[test]
    fn zero_capacity_holds_one_entry() {
        let mut cache = WidthCache::new(0);
        cache.get_or_compute("a");
        cache.get_or_compute("bb");
        assert_eq!(cache.len(), 1);
        assert!(cache.contains("bb"));
        assert!(!cache.contains("a"));
    }

    #[test]
    fn wide_characters() {
        let mut cache = WidthCache::default();
        assert_eq!(cache.get_or_compute("日本"), 4);
        assert_eq!(cache.get_or_compute(""), 0);
    }

    #[test]
    fn custom_compute_runs_once() {
        let mut cache = WidthCache::new(8);
        let mut calls = 0;
        for _ in 0..3 {
            let w = cache.get_or_compute_with("abc", |s| {
                calls += 1;
                s.len() * 2
            });
            assert_eq!(w, 6);
        }
        assert_eq!(calls, 1);
        assert!((cache.stats().hit_rate() - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn lru_eviction_and_resize() {
        let mut cache = WidthCache::new(2);
        cache.get_or_compute("a");
        cache.get_or_compute("b");
        cache.get_or_compute("a");
        cache.get_or_compute("c");
        assert!(cache.contains("a"));
        assert!(!cache.contains("b"));

        cache.resize(1);
        assert_eq!(cache.len(), 1);
        assert!(cache.contains("c"));
    }

    #[test]
    fn clear_keeps_stats() {
        let mut cache = WidthCache::new(4);
        cache.get_or_compute("x");
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats().misses, 1);
    }
}
