//! Response cache port.
//!
//! Keyed by endpoint name plus the literal route parameter values; values
//! are serialized successful responses. The backing store (in-memory map,
//! external cache service) is swappable without touching the pipeline.

use std::time::Duration;

/// Port trait for the response cache.
///
/// Implementations must support concurrent `lookup` and `store` without
/// data races. No cross-entry locking or single-flight de-duplication is
/// required; last-writer-wins per key is acceptable.
#[async_trait::async_trait]
pub trait ResponseCache: Send + Sync + 'static {
    /// Returns the cached value for `key`, or `None` if absent or expired.
    async fn lookup(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key` for `ttl`, overwriting any previous entry.
    async fn store(&self, key: String, value: String, ttl: Duration);
}
