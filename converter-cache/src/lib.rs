//! # Converter Cache
//!
//! In-memory implementation of the `ResponseCache` port.
//!
//! Entries carry an absolute deadline and expire lazily: nothing runs in the
//! background, a stale entry is dropped by the next lookup that touches it.
//! Concurrent lookups and stores are safe; a store simply overwrites the
//! previous entry for its key.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;

use converter_types::ResponseCache;

struct CacheEntry {
    value: String,
    expires_at: Instant,
}

/// Process-local response cache backed by a concurrent map.
#[derive(Default)]
pub struct MemoryCache {
    entries: DashMap<String, CacheEntry>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Number of live entries, expired ones included until a lookup drops them.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl ResponseCache for MemoryCache {
    async fn lookup(&self, key: &str) -> Option<String> {
        // The read guard must be dropped before remove_if, or the shard
        // lock is taken twice.
        let expired = match self.entries.get(key) {
            Some(entry) if Instant::now() <= entry.expires_at => {
                tracing::debug!(key, "cache hit");
                return Some(entry.value.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            // Re-checked under the entry lock so a concurrent overwrite
            // with a fresh deadline is not evicted.
            self.entries
                .remove_if(key, |_, entry| Instant::now() > entry.expires_at);
            tracing::debug!(key, "cache entry expired");
        } else {
            tracing::debug!(key, "cache miss");
        }

        None
    }

    async fn store(&self, key: String, value: String, ttl: Duration) {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now() + ttl,
        };
        tracing::debug!(key = %key, ttl_ms = ttl.as_millis() as u64, "cache store");
        self.entries.insert(key, entry);
    }
}
