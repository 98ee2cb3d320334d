//! Prediction cache
//!
//! Memoizes scoring results keyed by the canonical serialization of a
//! feature vector. The only shared mutable state in the engine: a single
//! mutex guards the read-check-write cycle and eviction, which also
//! guarantees the compute closure runs at most once per key per TTL window
//! even under concurrent callers. Entries expire by TTL on read; inserts
//! past capacity evict the single oldest entry — a cheap approximation of
//! LRU that is intentional, not an oversight.
//!
//! The clock is injectable so tests can drive TTL expiry without sleeping.

use crate::config::CacheConfig;
use crate::features::FeatureVector;
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    created_at: DateTime<Utc>,
}

pub struct PredictionCache<V> {
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
    ttl: Duration,
    capacity: usize,
    clock: Clock,
    hits: AtomicU64,
    misses: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

impl<V: Clone> PredictionCache<V> {
    pub fn new(config: &CacheConfig) -> Self {
        Self::with_clock(config, Arc::new(Utc::now))
    }

    pub fn with_clock(config: &CacheConfig, clock: Clock) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl: Duration::seconds(config.ttl_secs as i64),
            capacity: config.capacity,
            clock,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Return the cached value for this feature vector when fresh, otherwise
    /// recompute, store, and return. An expired or absent entry is
    /// indistinguishable from a miss.
    pub fn get_or_compute<F>(&self, features: &FeatureVector, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        let key = features.canonical_key();
        let now = (self.clock)();
        let mut entries = self.entries.lock();

        if let Some(entry) = entries.get(&key) {
            if now - entry.created_at < self.ttl {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return entry.value.clone();
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let value = compute();
        entries.insert(
            key,
            CacheEntry {
                value: value.clone(),
                created_at: now,
            },
        );

        if entries.len() > self.capacity {
            if let Some(oldest) = entries
                .iter()
                .min_by_key(|(_, entry)| entry.created_at)
                .map(|(key, _)| key.clone())
            {
                entries.remove(&oldest);
            }
        }

        value
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::cell::Cell;

    fn features(value: f64) -> FeatureVector {
        let mut fv = FeatureVector::new();
        fv.set("score", value);
        fv
    }

    fn fixed_clock(seconds: Arc<std::sync::atomic::AtomicI64>) -> Clock {
        Arc::new(move || {
            Utc.timestamp_opt(seconds.load(Ordering::SeqCst), 0)
                .unwrap()
        })
    }

    #[test]
    fn test_compute_runs_once_within_ttl() {
        let cache = PredictionCache::new(&CacheConfig::default());
        let fv = features(0.42);
        let calls = Cell::new(0u32);

        let first: f64 = cache.get_or_compute(&fv, || {
            calls.set(calls.get() + 1);
            77.0
        });
        let second: f64 = cache.get_or_compute(&fv, || {
            calls.set(calls.get() + 1);
            0.0
        });

        assert_eq!(first, 77.0);
        assert_eq!(second, 77.0);
        assert_eq!(calls.get(), 1);
        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn test_entries_expire_after_ttl() {
        let seconds = Arc::new(std::sync::atomic::AtomicI64::new(0));
        let config = CacheConfig {
            ttl_secs: 60,
            capacity: 10,
        };
        let cache = PredictionCache::with_clock(&config, fixed_clock(seconds.clone()));
        let fv = features(0.1);

        let _: f64 = cache.get_or_compute(&fv, || 1.0);
        seconds.store(59, Ordering::SeqCst);
        let fresh: f64 = cache.get_or_compute(&fv, || 2.0);
        assert_eq!(fresh, 1.0);

        seconds.store(61, Ordering::SeqCst);
        let expired: f64 = cache.get_or_compute(&fv, || 3.0);
        assert_eq!(expired, 3.0);
    }

    #[test]
    fn test_capacity_evicts_single_oldest_entry() {
        let seconds = Arc::new(std::sync::atomic::AtomicI64::new(0));
        let config = CacheConfig {
            ttl_secs: 3600,
            capacity: 3,
        };
        let cache = PredictionCache::with_clock(&config, fixed_clock(seconds.clone()));

        for i in 0..3 {
            seconds.store(i as i64, Ordering::SeqCst);
            let _: f64 = cache.get_or_compute(&features(i as f64), || i as f64);
        }
        assert_eq!(cache.len(), 3);

        // A fourth distinct key pushes out exactly the oldest entry.
        seconds.store(10, Ordering::SeqCst);
        let _: f64 = cache.get_or_compute(&features(99.0), || 99.0);
        assert_eq!(cache.len(), 3);

        // Oldest key (created at t=0) recomputes; a newer one is still a hit.
        let recomputed: f64 = cache.get_or_compute(&features(0.0), || -1.0);
        assert_eq!(recomputed, -1.0);
        let still_cached: f64 = cache.get_or_compute(&features(2.0), || -1.0);
        assert_eq!(still_cached, 2.0);
    }

    #[test]
    fn test_distinct_vectors_use_distinct_keys() {
        let cache = PredictionCache::new(&CacheConfig::default());
        let a: f64 = cache.get_or_compute(&features(0.10), || 1.0);
        let b: f64 = cache.get_or_compute(&features(0.11), || 2.0);
        assert_eq!(a, 1.0);
        assert_eq!(b, 2.0);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_clear() {
        let cache = PredictionCache::new(&CacheConfig::default());
        let _: f64 = cache.get_or_compute(&features(0.5), || 5.0);
        assert!(!cache.is_empty());
        cache.clear();
        assert!(cache.is_empty());
    }
}
