//! Session-scoped justification cache.
//!
//! Keys are [`hash_pair`] fingerprints of (description, summarized text); values are the
//! summarizer's raw output. The cache is unbounded and never expires: its lifetime is whatever
//! the caller gives it (one run, or one long-lived session shared across runs).

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use moka::future::Cache;
use tracing::debug;

use crate::hashing::{Fingerprint, fingerprint_hex, hash_pair};

/// Hit/miss counters for a [`JustificationCache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered with a stored justification.
    pub hits: u64,
    /// Lookups that ran the compute future, or waited on one that failed.
    pub misses: u64,
}

#[derive(Debug, Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
}

/// Memoizes justifications by content fingerprint.
///
/// Cloning is cheap and clones share the same entries. Concurrent
/// [`get_or_compute`](Self::get_or_compute) calls for one key run the compute future at most
/// once; the other callers wait for its result. Failed computations are not stored.
#[derive(Clone)]
pub struct JustificationCache {
    entries: Cache<Fingerprint, String>,
    counters: Arc<Counters>,
}

impl JustificationCache {
    /// Creates an empty, unbounded cache.
    pub fn new() -> Self {
        Self {
            entries: Cache::builder().build(),
            counters: Arc::new(Counters::default()),
        }
    }

    /// Computes the cache key for a (description, candidate text) pair.
    #[inline]
    pub fn key_for(description: &str, candidate_text: &str) -> Fingerprint {
        hash_pair(description, candidate_text)
    }

    /// Returns the cached value for `key`, or runs `compute` and caches its `Ok` output.
    pub async fn get_or_compute<F, E>(&self, key: Fingerprint, compute: F) -> Result<String, Arc<E>>
    where
        F: Future<Output = Result<String, E>>,
        E: Send + Sync + 'static,
    {
        let ran = AtomicBool::new(false);
        let result = self
            .entries
            .try_get_with(key, async {
                ran.store(true, Ordering::Relaxed);
                compute.await
            })
            .await;

        if !ran.load(Ordering::Relaxed) && result.is_ok() {
            self.counters.hits.fetch_add(1, Ordering::Relaxed);
            debug!(key = %fingerprint_hex(&key), "Justification cache hit");
        } else {
            // Waiters handed another caller's failure got nothing from the cache.
            self.counters.misses.fetch_add(1, Ordering::Relaxed);
            debug!(
                key = %fingerprint_hex(&key),
                computed = ran.load(Ordering::Relaxed),
                ok = result.is_ok(),
                "Justification cache miss"
            );
        }

        result
    }

    /// Looks up a precomputed key without computing anything.
    #[cfg(test)]
    pub(crate) async fn lookup(&self, key: &Fingerprint) -> Option<String> {
        self.entries.get(key).await
    }

    /// Looks up a (description, candidate text) pair.
    #[cfg(test)]
    pub(crate) async fn lookup_pair(&self, description: &str, candidate_text: &str) -> Option<String> {
        self.lookup(&Self::key_for(description, candidate_text)).await
    }

    /// Stores a value directly.
    #[cfg(test)]
    pub(crate) async fn insert(&self, key: Fingerprint, justification: String) {
        self.entries.insert(key, justification).await;
    }

    /// Returns `true` if the cache holds `key`.
    #[inline]
    #[cfg(test)]
    pub(crate) fn contains_key(&self, key: &Fingerprint) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the number of entries (call [`run_pending_tasks`](Self::run_pending_tasks)
    /// first for an exact count).
    #[inline]
    pub fn len(&self) -> u64 {
        self.entries.entry_count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.entry_count() == 0
    }

    /// Drops every entry. Counters are kept.
    #[inline]
    #[cfg(test)]
    pub(crate) fn clear(&self) {
        self.entries.invalidate_all();
    }

    /// Runs any pending maintenance tasks in the underlying cache.
    pub async fn run_pending_tasks(&self) {
        self.entries.run_pending_tasks().await;
    }

    /// Returns hit/miss counters accumulated since creation.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
        }
    }

    /// Returns the number of handles sharing these entries.
    #[inline]
    #[cfg(test)]
    pub(crate) fn strong_count(&self) -> usize {
        Arc::strong_count(&self.counters)
    }
}

impl Default for JustificationCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for JustificationCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JustificationCache")
            .field("entries", &self.entries.entry_count())
            .field("stats", &self.stats())
            .finish()
    }
}
