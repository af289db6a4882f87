//! Periodic eviction of expired entries.
//!
//! Entries that are written once and never read again are only reclaimed
//! here. The sweep runs as a tokio task whose lifetime belongs to whoever
//! holds the [`SweeperHandle`].

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use super::config::CacheConfig;
use super::store::ContentCache;

/// Shortest cadence a sweep will run at.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

pub struct Sweeper;

impl Sweeper {
    /// Spawn a sweep that calls [`ContentCache::cleanup`] every `interval`.
    ///
    /// The first sweep happens one full interval after start. `interval` is
    /// clamped to at least one millisecond. Must be called from within a
    /// tokio runtime.
    pub fn start(cache: Arc<ContentCache>, interval: Duration) -> SweeperHandle {
        let interval = interval.max(MIN_INTERVAL);
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker.tick().await; // Skip the first immediate tick

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    _ = ticker.tick() => {
                        let removed = cache.cleanup();
                        if removed > 0 {
                            debug!(removed, remaining = cache.len(), "Swept expired cache entries");
                        }
                    }
                }
            }

            debug!("Content cache sweeper stopped");
        });

        info!(
            interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX),
            "Content cache sweeper started"
        );

        SweeperHandle {
            shutdown: Some(shutdown_tx),
            task: Some(task),
        }
    }

    /// Start a sweep per `config`, or `None` when sweeping is disabled.
    pub fn from_config(cache: Arc<ContentCache>, config: &CacheConfig) -> Option<SweeperHandle> {
        if !config.sweep_enabled {
            debug!("Content cache sweeper disabled by configuration");
            return None;
        }
        Some(Self::start(cache, config.sweep_interval()))
    }
}

/// Owner of a running sweep. Dropping it without [`SweeperHandle::stop`]
/// aborts the task.
pub struct SweeperHandle {
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl SweeperHandle {
    /// Signal the sweep to finish and wait for it.
    pub async fn stop(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(task) = self.task.take() {
            match task.await {
                Err(err) if !err.is_cancelled() => {
                    warn!(error = %err, "Content cache sweeper terminated abnormally");
                }
                _ => {}
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for SweeperHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::clock::ManualClock;
    use super::*;

    const INTERVAL: Duration = Duration::from_secs(60);

    fn seeded_cache() -> (Arc<ContentCache>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(0));
        let cache = Arc::new(ContentCache::new(&CacheConfig::default(), clock.clone()));
        cache.set_with_ttl("abandoned", 1_u32, Duration::from_millis(100));
        cache.set_with_ttl("live", 2_u32, Duration::from_secs(3_600));
        (cache, clock)
    }

    #[tokio::test(start_paused = true)]
    async fn sweeps_expired_entries_each_interval() {
        let (cache, clock) = seeded_cache();
        let handle = Sweeper::start(cache.clone(), INTERVAL);

        clock.advance(1_000);
        tokio::time::sleep(INTERVAL + Duration::from_secs(1)).await;

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get::<u32>("live"), Some(2));

        handle.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn first_sweep_waits_a_full_interval() {
        let (cache, clock) = seeded_cache();
        let handle = Sweeper::start(cache.clone(), INTERVAL);

        clock.advance(1_000);
        tokio::time::sleep(INTERVAL / 2).await;
        assert_eq!(cache.len(), 2);

        handle.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn stopped_sweeper_no_longer_evicts() {
        let (cache, clock) = seeded_cache();
        let handle = Sweeper::start(cache.clone(), INTERVAL);
        handle.stop().await;

        clock.advance(1_000);
        tokio::time::sleep(INTERVAL * 3).await;
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn handle_reports_running_until_stopped() {
        let (cache, _) = seeded_cache();
        let handle = Sweeper::start(cache, INTERVAL);
        tokio::task::yield_now().await;
        assert!(handle.is_running());
        handle.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn zero_interval_is_clamped_and_still_sweeps() {
        let (cache, clock) = seeded_cache();
        let handle = Sweeper::start(cache.clone(), Duration::ZERO);
        tokio::task::yield_now().await;
        assert!(handle.is_running());

        clock.advance(1_000);
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(cache.len(), 1);
        assert!(handle.is_running());

        handle.stop().await;
    }

    #[tokio::test]
    async fn disabled_config_starts_nothing() {
        let (cache, _) = seeded_cache();
        let config = CacheConfig {
            sweep_enabled: false,
            ..Default::default()
        };
        assert!(Sweeper::from_config(cache, &config).is_none());
    }
}
