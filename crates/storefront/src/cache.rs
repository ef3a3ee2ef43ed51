//! TTL-bounded cache for product list responses.
//!
//! Memoizes list-fetch results keyed by a canonical serialization of their
//! request parameters, for a fixed five-minute validity window. The mapping
//! is persisted through the [`StateStore`] and hydrated once at
//! construction; persistence is best-effort, so on storage failure the
//! cache degrades to in-memory-only behavior for the rest of the session.
//!
//! The cache is an explicit object injected into consumers, not a process
//! singleton, and takes its clock through [`TimeSource`] so expiry is
//! testable without real waiting.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use orchard_core::ListParams;

use crate::api::ProductPage;
use crate::store::{StateStore, keys};

/// Validity window for cached list responses.
pub const LIST_CACHE_TTL: Duration = Duration::from_millis(300_000);

/// Source of "now" in milliseconds since the Unix epoch.
pub trait TimeSource: Send + Sync {
    /// Current wall-clock time in milliseconds.
    fn now_ms(&self) -> u64;
}

/// System wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
    }
}

/// One cached list response with its insertion timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CacheEntry {
    inserted_at_ms: u64,
    payload: ProductPage,
}

/// Keyed cache of product list pages with expiration.
pub struct ListCache {
    entries: HashMap<String, CacheEntry>,
    store: StateStore,
    clock: Arc<dyn TimeSource>,
    ttl: Duration,
}

impl ListCache {
    /// Create a cache backed by `store`, hydrating any persisted mapping.
    ///
    /// Malformed or unreadable persisted data is discarded silently and the
    /// cache starts empty.
    #[must_use]
    pub fn new(store: StateStore) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    /// Create a cache with an injected clock.
    #[must_use]
    pub fn with_clock(store: StateStore, clock: Arc<dyn TimeSource>) -> Self {
        let entries: HashMap<String, CacheEntry> =
            store.get(keys::LIST_CACHE).unwrap_or_default();
        Self {
            entries,
            store,
            clock,
            ttl: LIST_CACHE_TTL,
        }
    }

    /// Build the cache key for a parameter set.
    ///
    /// Parameters serialize in their insertion order, so equal parameter
    /// sets built in the same order always yield equal keys.
    #[must_use]
    pub fn build_key(params: &ListParams) -> String {
        let mut key = String::new();
        for (k, v) in params.iter() {
            if !key.is_empty() {
                key.push('&');
            }
            key.push_str(k);
            key.push('=');
            key.push_str(v);
        }
        key
    }

    /// Look up a cached page.
    ///
    /// Returns the payload only while the entry is within its TTL; an
    /// expired entry is evicted on the spot and reported as absent. Misses
    /// are not errors.
    pub fn get(&mut self, key: &str) -> Option<ProductPage> {
        let now = self.clock.now_ms();
        match self.entries.get(key) {
            Some(entry) if now.saturating_sub(entry.inserted_at_ms) <= ttl_ms(self.ttl) => {
                debug!(key, "List cache hit");
                Some(entry.payload.clone())
            }
            Some(_) => {
                debug!(key, "Evicting expired list cache entry");
                self.entries.remove(key);
                self.persist();
                None
            }
            None => None,
        }
    }

    /// Insert or overwrite a cached page with the current timestamp.
    pub fn set(&mut self, key: impl Into<String>, payload: ProductPage) {
        self.entries.insert(
            key.into(),
            CacheEntry {
                inserted_at_ms: self.clock.now_ms(),
                payload,
            },
        );
        self.persist();
    }

    /// Empty the cache and persist the empty state.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.persist();
    }

    /// Number of entries currently held (expired or not).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn persist(&self) {
        self.store.set(keys::LIST_CACHE, &self.entries);
    }
}

fn ttl_ms(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX)
}
