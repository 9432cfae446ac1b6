//! Rate Limiting Infrastructure
//!
//! Fixed-window rate limiting with pluggable storage backends.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use dashmap::DashMap;

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests allowed in the window
    pub max_requests: u32,
    /// Time window duration
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 5,
            window: Duration::from_secs(60),
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }

    pub fn window_ms(&self) -> i64 {
        self.window.as_millis() as i64
    }
}

/// Rate limit check result
#[derive(Debug, Clone)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub remaining: u32,
    pub reset_at_ms: i64,
}

/// Trait for rate limit storage backends
///
/// The in-process backend below satisfies this; a distributed counter
/// (shared across instances) can be swapped in without touching callers.
#[trait_variant::make(RateLimitStore: Send)]
pub trait LocalRateLimitStore {
    /// Check and increment rate limit counter for a partition key
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<RateLimitResult, Box<dyn std::error::Error + Send + Sync>>;
}

/// Per-partition fixed-window counter state
#[derive(Debug, Clone, Copy)]
struct RateWindow {
    window_start_ms: i64,
    count: u32,
}

/// In-process fixed-window rate limiter
///
/// One `RateWindow` per partition key, stored in a `DashMap`. The entry
/// guard holds an exclusive lock on the key's shard for the duration of
/// the read-reset-increment sequence, so admission is linearizable per
/// partition: two concurrent requests can never both observe the same
/// stale count. Excess requests are rejected, never queued.
///
/// Stale windows are overwritten in place on the next request from the
/// same partition, so no background sweeping is needed.
#[derive(Debug, Default)]
pub struct MemoryRateLimitStore {
    windows: DashMap<String, RateWindow>,
}

impl MemoryRateLimitStore {
    pub fn new() -> Self {
        Self {
            windows: DashMap::new(),
        }
    }

    fn admit_at(&self, key: &str, config: &RateLimitConfig, now_ms: i64) -> RateLimitResult {
        let window_ms = config.window_ms().max(1);
        let window_start_ms = (now_ms / window_ms) * window_ms;

        let mut entry = self.windows.entry(key.to_string()).or_insert(RateWindow {
            window_start_ms,
            count: 0,
        });

        if entry.window_start_ms != window_start_ms {
            entry.window_start_ms = window_start_ms;
            entry.count = 0;
        }

        let allowed = entry.count < config.max_requests;
        if allowed {
            entry.count += 1;
        }

        RateLimitResult {
            allowed,
            remaining: config.max_requests.saturating_sub(entry.count),
            reset_at_ms: window_start_ms + window_ms,
        }
    }
}

impl RateLimitStore for MemoryRateLimitStore {
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<RateLimitResult, Box<dyn std::error::Error + Send + Sync>> {
        let now_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0);

        Ok(self.admit_at(key, config, now_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_exactly_limit_admitted_per_window() {
        let store = MemoryRateLimitStore::new();
        let config = RateLimitConfig::new(5, 60);
        let now_ms = 1_000_000_000_000;

        for i in 0..5 {
            let result = store.admit_at("203.0.113.7", &config, now_ms + i);
            assert!(result.allowed, "request {} should be admitted", i + 1);
        }

        let denied = store.admit_at("203.0.113.7", &config, now_ms + 10);
        assert!(!denied.allowed);
        assert_eq!(denied.remaining, 0);
    }

    #[test]
    fn test_denied_requests_do_not_consume_next_window() {
        let store = MemoryRateLimitStore::new();
        let config = RateLimitConfig::new(2, 60);
        let now_ms = 1_000_000_000_000;

        store.admit_at("k", &config, now_ms);
        store.admit_at("k", &config, now_ms);
        // Hammer past the limit; counter must not grow past max
        for _ in 0..10 {
            assert!(!store.admit_at("k", &config, now_ms).allowed);
        }

        // A fresh window admits again
        let next_window = now_ms + config.window_ms();
        assert!(store.admit_at("k", &config, next_window).allowed);
    }

    #[test]
    fn test_window_elapse_resets_counter() {
        let store = MemoryRateLimitStore::new();
        let config = RateLimitConfig::new(1, 60);
        let now_ms = 1_000_000_000_000;

        assert!(store.admit_at("k", &config, now_ms).allowed);
        assert!(!store.admit_at("k", &config, now_ms + 1).allowed);
        assert!(store.admit_at("k", &config, now_ms + 60_000).allowed);
    }

    #[test]
    fn test_partitions_are_independent() {
        let store = MemoryRateLimitStore::new();
        let config = RateLimitConfig::new(1, 60);
        let now_ms = 1_000_000_000_000;

        assert!(store.admit_at("a", &config, now_ms).allowed);
        assert!(store.admit_at("b", &config, now_ms).allowed);
        assert!(!store.admit_at("a", &config, now_ms).allowed);
    }

    #[test]
    fn test_reset_at_is_window_end() {
        let store = MemoryRateLimitStore::new();
        let config = RateLimitConfig::new(5, 60);
        let now_ms = 1_000_000_123_456;

        let result = store.admit_at("k", &config, now_ms);
        let window_start = (now_ms / 60_000) * 60_000;
        assert_eq!(result.reset_at_ms, window_start + 60_000);
    }

    #[test]
    fn test_concurrent_admission_never_over_admits() {
        let store = Arc::new(MemoryRateLimitStore::new());
        let config = RateLimitConfig::new(5, 60);
        let now_ms = 1_000_000_000_000;

        let mut handles = Vec::new();
        for _ in 0..20 {
            let store = Arc::clone(&store);
            let config = config.clone();
            handles.push(std::thread::spawn(move || {
                store.admit_at("shared", &config, now_ms).allowed
            }));
        }

        let admitted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|&allowed| allowed)
            .count();

        assert_eq!(admitted, 5);
    }
}
