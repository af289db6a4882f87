//! Cache configuration.
//!
//! Controls entry lifetime and the background sweep via `[cache]` in
//! `feedcache.toml`.

use std::time::Duration;

use serde::Deserialize;

/// Default entry lifetime: keeps live feeds fresh while absorbing duplicate
/// requests fired within one render pass.
pub const DEFAULT_TTL_MS: u64 = 5_000;
/// Default cadence of the expired-entry sweep.
pub const DEFAULT_SWEEP_INTERVAL_MS: u64 = 60_000;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CacheConfig {
    /// Lifetime (ms) applied by `set` when no explicit TTL is given.
    pub default_ttl_ms: u64,
    /// Interval (ms) between sweeps of expired entries.
    pub sweep_interval_ms: u64,
    /// Run the periodic sweep at all.
    pub sweep_enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl_ms: DEFAULT_TTL_MS,
            sweep_interval_ms: DEFAULT_SWEEP_INTERVAL_MS,
            sweep_enabled: true,
        }
    }
}

impl CacheConfig {
    pub fn default_ttl(&self) -> Duration {
        Duration::from_millis(self.default_ttl_ms)
    }

    /// Sweep interval, clamped to at least one millisecond.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_millis(self.sweep_interval_ms.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = CacheConfig::default();
        assert_eq!(config.default_ttl_ms, 5_000);
        assert_eq!(config.sweep_interval_ms, 60_000);
        assert!(config.sweep_enabled);
        assert_eq!(config.default_ttl(), Duration::from_secs(5));
    }

    #[test]
    fn zero_sweep_interval_clamps_to_min() {
        let config = CacheConfig {
            sweep_interval_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.sweep_interval(), Duration::from_millis(1));
    }
}
