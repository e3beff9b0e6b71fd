//! Bounded exponential backoff for API calls.

use std::time::Duration;

/// How many times a failed call is re-attempted and how long to wait in
/// between. Delay for retry `n` (1-based) is `min(initial * 2^(n-1), max)`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Reads are idempotent and can afford more attempts.
    pub const READ: RetryPolicy = RetryPolicy {
        max_retries: 3,
        initial_delay: Duration::from_secs(1),
        max_delay: Duration::from_secs(4),
    };

    pub const WRITE: RetryPolicy = RetryPolicy {
        max_retries: 2,
        initial_delay: Duration::from_secs(1),
        max_delay: Duration::from_secs(2),
    };

    pub const NONE: RetryPolicy = RetryPolicy {
        max_retries: 0,
        initial_delay: Duration::ZERO,
        max_delay: Duration::ZERO,
    };

    pub fn delay_for(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1).min(16);
        std::cmp::min(self.initial_delay * (1u32 << exponent), self.max_delay)
    }

    /// Client errors are final, except timeouts and rate limiting. Status `0`
    /// (no response) and server errors are worth another attempt.
    pub fn is_retryable(status: u16) -> bool {
        status == 408 || status == 429 || !(400..500).contains(&status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn read_schedule_doubles_up_to_cap() {
        let delays: Vec<_> = (1..=4).map(|n| RetryPolicy::READ.delay_for(n)).collect();
        assert_eq!(delays, [secs(1), secs(2), secs(4), secs(4)]);
    }

    #[test]
    fn write_schedule_caps_at_two_seconds() {
        let delays: Vec<_> = (1..=3).map(|n| RetryPolicy::WRITE.delay_for(n)).collect();
        assert_eq!(delays, [secs(1), secs(2), secs(2)]);
    }

    #[test]
    fn large_retry_counts_do_not_overflow() {
        assert_eq!(RetryPolicy::READ.delay_for(u32::MAX), secs(4));
    }

    #[test]
    fn retryable_statuses() {
        for status in [0, 408, 429, 500, 502, 503, 504] {
            assert!(RetryPolicy::is_retryable(status), "{status}");
        }
        for status in [400, 401, 403, 404, 409, 422] {
            assert!(!RetryPolicy::is_retryable(status), "{status}");
        }
    }
}
