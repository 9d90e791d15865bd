//! Sliding-window rate limiting, one limiter per agent.
//!
//! The algorithm is deliberately simple: a `Vec` of monotonic timestamps,
//! purged from the front on every read, capped at `rpm` entries per rolling
//! 60-second window. `rpm == 0` means unlimited.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

const WINDOW: Duration = Duration::from_secs(60);

/// A single agent's sliding-window throttle.
///
/// The mutex guards only the timestamp vector and is never held across an
/// `.await` — `acquire_async` releases it before sleeping and re-acquires it
/// to record the attempt, exactly like `acquire`'s synchronous sibling.
pub struct RateLimiter {
    rpm: u32,
    timestamps: Mutex<Vec<Instant>>,
}

impl RateLimiter {
    pub fn new(rpm: u32) -> Self {
        Self {
            rpm,
            timestamps: Mutex::new(Vec::new()),
        }
    }

    pub fn rpm(&self) -> u32 {
        self.rpm
    }

    fn purge(timestamps: &mut Vec<Instant>, now: Instant) {
        timestamps.retain(|&t| now.duration_since(t) < WINDOW);
    }

    /// How long a caller would have to wait right now. Never negative by
    /// construction (`Duration` cannot represent a negative value).
    pub fn wait_time(&self) -> Duration {
        if self.rpm == 0 {
            return Duration::ZERO;
        }
        let now = Instant::now();
        let mut timestamps = self.timestamps.lock().expect("rate limiter mutex poisoned");
        Self::purge(&mut timestamps, now);
        if timestamps.len() < self.rpm as usize {
            return Duration::ZERO;
        }
        let release_at = timestamps[0] + WINDOW;
        release_at.saturating_duration_since(now)
    }

    /// Blocks the current thread for the computed wait, then records the
    /// attempt. Returns the wait actually observed.
    pub fn acquire(&self) -> Duration {
        let wait = self.wait_time();
        if !wait.is_zero() {
            std::thread::sleep(wait);
        }
        self.record_attempt();
        wait
    }

    /// Async sibling of [`RateLimiter::acquire`]; suspends the task instead
    /// of blocking the thread.
    pub async fn acquire_async(&self) -> Duration {
        let wait = self.wait_time();
        if !wait.is_zero() {
            tracing::debug!(wait_ms = wait.as_millis(), "rate limiter waiting");
            tokio::time::sleep(wait).await;
        }
        self.record_attempt();
        wait
    }

    fn record_attempt(&self) {
        let now = Instant::now();
        let mut timestamps = self.timestamps.lock().expect("rate limiter mutex poisoned");
        Self::purge(&mut timestamps, now);
        timestamps.push(now);
    }

    pub fn reset(&self) {
        self.timestamps
            .lock()
            .expect("rate limiter mutex poisoned")
            .clear();
    }

    /// Current number of timestamps inside the live window.
    pub fn current_count(&self) -> usize {
        let now = Instant::now();
        let mut timestamps = self.timestamps.lock().expect("rate limiter mutex poisoned");
        Self::purge(&mut timestamps, now);
        timestamps.len()
    }
}

/// Process-wide `agent_id → RateLimiter` map.
///
/// `get_or_create` replaces the stored limiter (dropping its window state)
/// whenever the caller's requested `rpm` differs from what's on file — an
/// agent whose configured rate changes gets a clean window, not a
/// grandfathered one.
#[derive(Default)]
pub struct RateLimiterRegistry {
    limiters: Mutex<HashMap<i64, Arc<RateLimiter>>>,
}

impl RateLimiterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_create(&self, agent_id: i64, rpm: u32) -> Arc<RateLimiter> {
        let mut limiters = self.limiters.lock().expect("rate limiter registry mutex poisoned");
        if let Some(existing) = limiters.get(&agent_id) {
            if existing.rpm() == rpm {
                return Arc::clone(existing);
            }
        }
        let limiter = Arc::new(RateLimiter::new(rpm));
        limiters.insert(agent_id, Arc::clone(&limiter));
        limiter
    }

    pub fn remove(&self, agent_id: i64) {
        self.limiters
            .lock()
            .expect("rate limiter registry mutex poisoned")
            .remove(&agent_id);
    }

    pub fn clear(&self) {
        self.limiters
            .lock()
            .expect("rate limiter registry mutex poisoned")
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlimited_never_waits() {
        let limiter = RateLimiter::new(0);
        for _ in 0..5 {
            assert_eq!(limiter.acquire(), Duration::ZERO);
        }
    }

    #[test]
    fn current_count_never_exceeds_rpm() {
        let limiter = RateLimiter::new(3);
        for _ in 0..3 {
            limiter.acquire();
        }
        assert_eq!(limiter.current_count(), 3);
        assert!(limiter.wait_time() > Duration::ZERO);
    }

    #[test]
    fn reset_clears_window() {
        let limiter = RateLimiter::new(1);
        limiter.acquire();
        assert_eq!(limiter.current_count(), 1);
        limiter.reset();
        assert_eq!(limiter.current_count(), 0);
        assert_eq!(limiter.wait_time(), Duration::ZERO);
    }

    #[test]
    fn reconfiguring_rpm_drops_old_window_state() {
        let registry = RateLimiterRegistry::new();
        let first = registry.get_or_create(1, 2);
        first.acquire();
        first.acquire();
        assert_eq!(first.current_count(), 2);

        let second = registry.get_or_create(1, 5);
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.current_count(), 0);
    }

    #[test]
    fn same_rpm_reuses_limiter() {
        let registry = RateLimiterRegistry::new();
        let first = registry.get_or_create(7, 10);
        let second = registry.get_or_create(7, 10);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn acquire_async_matches_sync_algorithm() {
        let limiter = RateLimiter::new(2);
        assert_eq!(limiter.acquire_async().await, Duration::ZERO);
        assert_eq!(limiter.acquire_async().await, Duration::ZERO);
        assert!(limiter.wait_time() > Duration::ZERO);
    }
}
