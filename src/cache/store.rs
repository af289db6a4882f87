//! In-memory TTL store for content query results.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use metrics::{counter, gauge};
use tracing::{debug, trace};

use super::clock::{Clock, SystemClock};
use super::config::CacheConfig;
use super::entry::CacheEntry;
use super::lock::{rw_read, rw_write};

const SOURCE: &str = "cache::store";

pub(crate) const METRIC_CACHE_HIT: &str = "feedcache_cache_hit_total";
pub(crate) const METRIC_CACHE_MISS: &str = "feedcache_cache_miss_total";
pub(crate) const METRIC_CACHE_SWEPT: &str = "feedcache_cache_swept_total";
pub(crate) const METRIC_CACHE_ENTRIES: &str = "feedcache_cache_entries";

/// Keyed memoization layer in front of content fetches.
///
/// Every entry carries its own TTL. Expired entries are logically absent:
/// `get` treats them as a miss and drops them, and [`ContentCache::cleanup`]
/// removes the ones nobody reads again. There is no size bound and no
/// namespacing; callers own their key space (see [`super::keys`]).
///
/// Each method holds the lock for its whole body, so calls are atomic with
/// respect to one another.
pub struct ContentCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    default_ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl ContentCache {
    pub fn new(config: &CacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            default_ttl: config.default_ttl(),
            clock,
        }
    }

    pub fn with_system_clock(config: &CacheConfig) -> Self {
        Self::new(config, Arc::new(SystemClock))
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Insert or overwrite `key` using the default TTL.
    pub fn set<T>(&self, key: impl Into<String>, data: T)
    where
        T: Any + Send + Sync,
    {
        self.set_with_ttl(key, data, self.default_ttl);
    }

    /// Insert or overwrite `key`, live for `ttl` from now.
    pub fn set_with_ttl<T>(&self, key: impl Into<String>, data: T, ttl: Duration)
    where
        T: Any + Send + Sync,
    {
        let ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);
        let entry = CacheEntry::new(data, self.clock.now_ms(), ttl_ms);

        let mut entries = rw_write(&self.entries, SOURCE, "set");
        entries.insert(key.into(), entry);
        gauge!(METRIC_CACHE_ENTRIES).set(entries.len() as f64);
    }

    /// Return the live value for `key`.
    ///
    /// `None` covers never-set, expired, and stored-as-another-type alike.
    /// An expired entry is removed as part of the lookup.
    pub fn get<T>(&self, key: &str) -> Option<T>
    where
        T: Any + Clone,
    {
        let now = self.clock.now_ms();

        {
            let entries = rw_read(&self.entries, SOURCE, "get");
            match entries.get(key) {
                None => {
                    counter!(METRIC_CACHE_MISS).increment(1);
                    return None;
                }
                Some(entry) if entry.is_live(now) => {
                    let value = entry.data::<T>().cloned();
                    let metric = if value.is_some() {
                        METRIC_CACHE_HIT
                    } else {
                        METRIC_CACHE_MISS
                    };
                    counter!(metric).increment(1);
                    return value;
                }
                Some(_) => {}
            }
        }

        // A fresh `set` may have landed since the read guard was dropped.
        let mut entries = rw_write(&self.entries, SOURCE, "get.evict");
        if entries.get(key).is_some_and(|entry| entry.is_expired(now)) {
            entries.remove(key);
            trace!(key, "evicted expired entry on read");
            gauge!(METRIC_CACHE_ENTRIES).set(entries.len() as f64);
        }
        counter!(METRIC_CACHE_MISS).increment(1);
        None
    }

    /// Drop every entry.
    pub fn clear(&self) {
        let mut entries = rw_write(&self.entries, SOURCE, "clear");
        let dropped = entries.len();
        entries.clear();
        gauge!(METRIC_CACHE_ENTRIES).set(0.0);
        debug!(dropped, "content cache cleared");
    }

    /// Remove every expired entry, returning how many were dropped.
    pub fn cleanup(&self) -> usize {
        let now = self.clock.now_ms();
        let mut entries = rw_write(&self.entries, SOURCE, "cleanup");
        let before = entries.len();
        entries.retain(|_, entry| entry.is_live(now));
        let removed = before - entries.len();

        if removed > 0 {
            counter!(METRIC_CACHE_SWEPT).increment(removed as u64);
        }
        gauge!(METRIC_CACHE_ENTRIES).set(entries.len() as f64);
        removed
    }

    /// Entries physically present, including stale ones not yet swept.
    pub fn len(&self) -> usize {
        rw_read(&self.entries, SOURCE, "len").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for ContentCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentCache")
            .field("entries", &self.len())
            .field("default_ttl", &self.default_ttl)
            .finish()
    }
}
