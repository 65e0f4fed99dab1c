//! Segmentation cache for repeated words.
//!
//! Word segmentation is deterministic over a frozen vocabulary, so
//! repeated words (the common case in running text) can be served from
//! a small LRU cache instead of re-running the greedy scan.

use std::collections::HashMap;
use subtok_core::Result;

/// LRU cache from raw word to its segmented form.
///
/// A HashMap plus an insertion-order list; when the cache exceeds
/// capacity the least recently used entry is evicted.
pub struct SegmentationCache {
    cache: HashMap<String, String>,
    capacity: usize,
    /// Oldest first; a hit moves its key to the back
    recency: Vec<String>,
    hits: u64,
    misses: u64,
}

impl SegmentationCache {
    /// Create a cache holding up to `capacity` words.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cache: HashMap::with_capacity(capacity),
            capacity,
            recency: Vec::with_capacity(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Create a cache with the default capacity (1000 words).
    pub fn new() -> Self {
        Self::with_capacity(1000)
    }

    /// Get the cached segmentation or compute it with `segment`.
    pub fn get_or_segment<F>(&mut self, word: &str, segment: F) -> Result<String>
    where
        F: FnOnce(&str) -> Result<String>,
    {
        if let Some(cached) = self.cache.get(word).cloned() {
            self.hits += 1;
            if let Some(pos) = self.recency.iter().position(|key| key == word) {
                self.recency.remove(pos);
            }
            self.recency.push(word.to_string());
            return Ok(cached);
        }

        self.misses += 1;
        let segmented = segment(word)?;
        self.insert(word.to_string(), segmented.clone());

        Ok(segmented)
    }

    fn insert(&mut self, key: String, value: String) {
        if self.recency.len() >= self.capacity && !self.cache.contains_key(&key) {
            if let Some(oldest) = self.recency.first().cloned() {
                self.cache.remove(&oldest);
                self.recency.remove(0);
            }
        }

        if self.cache.contains_key(&key) {
            if let Some(pos) = self.recency.iter().position(|existing| existing == &key) {
                self.recency.remove(pos);
            }
        }

        self.cache.insert(key.clone(), value);
        self.recency.push(key);
    }

    /// Drop every entry; hit/miss counters keep their values.
    pub fn clear(&mut self) {
        self.cache.clear();
        self.recency.clear();
    }

    /// Number of cached words.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Maximum number of cached words.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Shrink or grow the capacity, evicting the least recently used
    /// entries when shrinking.
    pub fn resize(&mut self, new_capacity: usize) {
        self.capacity = new_capacity;

        while self.recency.len() > new_capacity {
            if let Some(oldest) = self.recency.first().cloned() {
                self.cache.remove(&oldest);
                self.recency.remove(0);
            }
        }
    }

    /// Hit/miss statistics since creation.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.cache.len(),
            capacity: self.capacity,
            hits: self.hits,
            misses: self.misses,
        }
    }
}

impl Default for SegmentationCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics.
#[derive(Debug, Clone, Copy)]
pub struct CacheStats {
    /// Current number of entries
    pub entries: usize,
    /// Maximum capacity
    pub capacity: usize,
    /// Lookups served from the cache
    pub hits: u64,
    /// Lookups that ran the segmenter
    pub misses: u64,
}

impl CacheStats {
    /// Fraction of lookups served from the cache, if any were made.
    pub fn hit_rate(&self) -> Option<f64> {
        let total = self.hits + self.misses;
        (total > 0).then(|| self.hits as f64 / total as f64)
    }
}
