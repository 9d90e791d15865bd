//! Property-based test: P4, the sliding-window count invariant.
//!
//! Keeps `rpm` at least as large as the number of acquisitions so every call
//! resolves with a zero wait — exercising the window bookkeeping without
//! paying for real sleeps inside a proptest shrink loop.

use agentflow_ratelimit::RateLimiter;
use proptest::prelude::*;

proptest! {
    #[test]
    fn current_count_never_exceeds_rpm(calls in 0u32..20) {
        let limiter = RateLimiter::new(calls.max(1));
        for _ in 0..calls {
            let wait = limiter.acquire();
            prop_assert!(wait.is_zero());
        }
        prop_assert!(limiter.current_count() <= limiter.rpm() as usize);
    }

    #[test]
    fn unlimited_rpm_never_waits(calls in 0u32..50) {
        let limiter = RateLimiter::new(0);
        for _ in 0..calls {
            prop_assert!(limiter.acquire().is_zero());
        }
    }
}
