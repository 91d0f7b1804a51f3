//! Bounded memoization for normalized token strings.
//!
//! Keys are exact raw input texts. Entries are kept in recency order so the
//! least recently used one is evicted when the capacity is reached.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use linked_hash_map::LinkedHashMap;
use serde::Serialize;
use tracing::debug;

use crate::error::{Result, SimilarityError};

/// Snapshot of cache counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub len: usize,
    pub capacity: usize,
}

/// LRU cache of `raw text -> normalized token string`.
///
/// Safe to share between threads behind an `Arc`; every access takes the
/// internal lock because a lookup also refreshes recency.
pub struct NormalizationCache {
    entries: Mutex<LinkedHashMap<String, String>>,
    capacity: usize,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl NormalizationCache {
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(SimilarityError::InvalidConfig {
                message: "normalization cache capacity must be at least 1".to_string(),
            });
        }

        Ok(Self {
            entries: Mutex::new(LinkedHashMap::new()),
            capacity,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        })
    }

    /// Look up a cached normalization, marking it most recently used.
    pub fn get(&self, text: &str) -> Option<String> {
        // A poisoned lock only means another thread panicked mid-insert;
        // the map itself is still a valid map.
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());

        match entries.get_refresh(text) {
            Some(normalized) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(normalized.clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Insert a normalization, evicting the least recently used entry when full.
    pub fn put(&self, text: String, normalized: String) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());

        if entries.contains_key(&text) {
            entries.insert(text, normalized);
            return;
        }

        while entries.len() >= self.capacity {
            if entries.pop_front().is_none() {
                break;
            }
            debug!(capacity = self.capacity, "evicted least recently used normalization");
        }

        entries.insert(text, normalized);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&self) {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            len: self.len(),
            capacity: self.capacity,
        }
    }
}
