//! Exact-match memo of pipeline results.
//!
//! Keys come from [`crate::hashing::hash_request`], which folds the snapshot
//! epoch in, so a reload never serves results computed against older data.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;

use crate::constants::{DEFAULT_CACHE_TTL_SECS, DEFAULT_RESULT_CACHE_CAPACITY};
use crate::pipeline::PipelineResult;

/// In-memory result cache keyed by request hash.
pub struct ResultCache {
    entries: Cache<[u8; 32], Arc<PipelineResult>>,
}

impl ResultCache {
    /// Creates a cache with the default capacity and lifetime.
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(
            DEFAULT_RESULT_CACHE_CAPACITY,
            Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
        )
    }

    /// Creates a cache holding at most `capacity` results for `ttl` each.
    ///
    /// A zero capacity disables caching.
    pub fn with_capacity(capacity: u64, ttl: Duration) -> Self {
        let mut builder = Cache::builder().max_capacity(capacity);
        if !ttl.is_zero() {
            builder = builder.time_to_live(ttl);
        }
        Self {
            entries: builder.build(),
        }
    }

    #[inline]
    pub fn lookup(&self, hash: &[u8; 32]) -> Option<Arc<PipelineResult>> {
        self.entries.get(hash)
    }

    #[inline]
    pub fn insert(&self, hash: [u8; 32], result: Arc<PipelineResult>) {
        self.entries.insert(hash, result);
    }

    #[inline]
    pub fn remove(&self, hash: &[u8; 32]) -> Option<Arc<PipelineResult>> {
        self.entries.remove(hash)
    }

    #[inline]
    pub fn contains_hash(&self, hash: &[u8; 32]) -> bool {
        self.entries.contains_key(hash)
    }

    /// Entry count; only exact after [`Self::run_pending_tasks`].
    #[inline]
    pub fn len(&self) -> u64 {
        self.entries.entry_count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.entry_count() == 0
    }

    #[inline]
    pub fn clear(&self) {
        self.entries.invalidate_all();
    }

    #[inline]
    pub fn run_pending_tasks(&self) {
        self.entries.run_pending_tasks();
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ResultCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultCache")
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}
