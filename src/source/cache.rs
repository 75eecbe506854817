//! Time-bounded record cache
//!
//! Entries are stored with their insertion instant and are treated as
//! missing once they are at least `ttl` old.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
}

/// In-memory cache with a fixed time-to-live
#[derive(Debug, Clone)]
pub struct TtlCache<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
    ttl: Duration,
}

impl<K: Eq + Hash + Clone, V> TtlCache<K, V> {
    /// Create an empty cache
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    /// Configured time-to-live
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Get a fresh value
    pub fn get(&self, key: &K) -> Option<&V> {
        self.get_at(key, Instant::now())
    }

    /// Get a value if it is still fresh at `now`
    pub fn get_at(&self, key: &K, now: Instant) -> Option<&V> {
        let entry = self.entries.get(key)?;
        if now.saturating_duration_since(entry.inserted_at) < self.ttl {
            Some(&entry.value)
        } else {
            None
        }
    }

    /// Insert or replace a value
    pub fn put(&mut self, key: K, value: V) {
        self.put_at(key, value, Instant::now());
    }

    /// Insert or replace a value as of `now`
    pub fn put_at(&mut self, key: K, value: V, now: Instant) {
        self.entries.insert(
            key,
            CacheEntry {
                value,
                inserted_at: now,
            },
        );
    }

    /// Remove a value regardless of age
    pub fn evict(&mut self, key: &K) -> Option<V> {
        self.entries.remove(key).map(|e| e.value)
    }

    /// Remove all entries that are stale at `now`; returns how many
    pub fn evict_expired_at(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl;
        self.entries
            .retain(|_, e| now.saturating_duration_since(e.inserted_at) < ttl);
        before - self.entries.len()
    }

    /// Remove all stale entries; returns how many
    pub fn evict_expired(&mut self) -> usize {
        self.evict_expired_at(Instant::now())
    }

    /// Remove everything
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of stored entries, fresh or stale
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries are stored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored entries with their age at `now`
    pub fn entries_at(&self, now: Instant) -> Vec<(K, Duration, &V)> {
        self.entries
            .iter()
            .map(|(k, e)| (k.clone(), now.saturating_duration_since(e.inserted_at), &e.value))
            .collect()
    }

    /// Stored entries with their current age
    pub fn entries(&self) -> Vec<(K, Duration, &V)> {
        self.entries_at(Instant::now())
    }
}
