use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use feedcache::cache::{CacheConfig, ContentCache, ManualClock};
use metrics_util::debugging::{DebugValue, DebuggingRecorder};

fn recorded_values(recorder: &DebuggingRecorder) -> HashMap<String, DebugValue> {
    recorder
        .snapshotter()
        .snapshot()
        .into_vec()
        .into_iter()
        .map(|(composite_key, _, _, value)| (composite_key.key().name().to_string(), value))
        .collect()
}

#[test]
fn cache_paths_emit_expected_metrics() {
    let recorder = DebuggingRecorder::new();
    let clock = Arc::new(ManualClock::new(0));
    let cache = ContentCache::new(&CacheConfig::default(), clock.clone());

    metrics::with_local_recorder(&recorder, || {
        cache.set_with_ttl("latestContent:10", vec![1_u32], Duration::from_millis(100));
        cache.set_with_ttl("contentByNiche:tech:10", vec![2_u32], Duration::from_millis(100));
        cache.set_with_ttl("contentByNiche:gaming:10", vec![3_u32], Duration::from_secs(60));

        assert!(cache.get::<Vec<u32>>("latestContent:10").is_some());
        assert!(cache.get::<Vec<u32>>("never-set").is_none());

        clock.advance(101);
        // Expired reads are reported as plain misses.
        assert!(cache.get::<Vec<u32>>("latestContent:10").is_none());
        assert_eq!(cache.cleanup(), 1);
    });

    let values = recorded_values(&recorder);

    assert_eq!(
        values.get("feedcache_cache_hit_total"),
        Some(&DebugValue::Counter(1))
    );
    assert_eq!(
        values.get("feedcache_cache_miss_total"),
        Some(&DebugValue::Counter(2))
    );
    assert_eq!(
        values.get("feedcache_cache_swept_total"),
        Some(&DebugValue::Counter(1))
    );
    assert!(
        matches!(
            values.get("feedcache_cache_entries"),
            Some(DebugValue::Gauge(value)) if value.into_inner() == 1.0
        ),
        "entries gauge should track the surviving entry"
    );
}

#[test]
fn clear_resets_entries_gauge() {
    let recorder = DebuggingRecorder::new();
    let cache = ContentCache::new(&CacheConfig::default(), Arc::new(ManualClock::new(0)));

    metrics::with_local_recorder(&recorder, || {
        cache.set("a", 1_u8);
        cache.set("b", 2_u8);
        cache.clear();
    });

    let values = recorded_values(&recorder);
    assert!(matches!(
        values.get("feedcache_cache_entries"),
        Some(DebugValue::Gauge(value)) if value.into_inner() == 0.0
    ));
}
