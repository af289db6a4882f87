//! Content query cache.
//!
//! A short-horizon, in-process memoization layer for content list fetches:
//!
//! - [`ContentCache`]: string-keyed entries with per-entry TTL and lazy
//!   eviction on read
//! - [`Sweeper`]: periodic removal of expired entries, started and stopped
//!   explicitly by the owner
//!
//! ## Configuration
//!
//! ```toml
//! [cache]
//! default_ttl_ms = 5000
//! sweep_interval_ms = 60000
//! sweep_enabled = true
//! ```

mod clock;
mod config;
mod entry;
mod keys;
mod lock;
mod store;
mod sweeper;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{CacheConfig, DEFAULT_SWEEP_INTERVAL_MS, DEFAULT_TTL_MS};
pub use entry::CacheEntry;
pub use keys::{KEY_SEPARATOR, query_key};
pub use store::ContentCache;
pub use sweeper::{Sweeper, SweeperHandle};

pub(crate) use store::{
    METRIC_CACHE_ENTRIES, METRIC_CACHE_HIT, METRIC_CACHE_MISS, METRIC_CACHE_SWEPT,
};
