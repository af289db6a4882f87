//! Time-stamped cache entries.

use std::any::Any;
use std::sync::Arc;

/// A cached value with its insertion time and lifetime.
///
/// The payload is type-erased; the cache never inspects it.
#[derive(Clone)]
pub struct CacheEntry {
    data: Arc<dyn Any + Send + Sync>,
    /// Milliseconds since the Unix epoch at insertion.
    pub timestamp: i64,
    /// Milliseconds the entry stays live after `timestamp`.
    pub ttl: u64,
}

impl CacheEntry {
    pub fn new<T: Any + Send + Sync>(data: T, timestamp: i64, ttl: u64) -> Self {
        Self {
            data: Arc::new(data),
            timestamp,
            ttl,
        }
    }

    /// Live while `now - timestamp <= ttl`, inclusive at the boundary.
    pub fn is_live(&self, now: i64) -> bool {
        let elapsed = i128::from(now) - i128::from(self.timestamp);
        elapsed <= i128::from(self.ttl)
    }

    pub fn is_expired(&self, now: i64) -> bool {
        !self.is_live(now)
    }

    /// Borrow the payload as `T`, or `None` if it was stored as another type.
    pub fn data<T: Any>(&self) -> Option<&T> {
        self.data.downcast_ref::<T>()
    }
}

impl std::fmt::Debug for CacheEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheEntry")
            .field("timestamp", &self.timestamp)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
