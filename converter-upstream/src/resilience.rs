//! Resilience policy for outbound calls.
//!
//! Bounded retries with exponential backoff, a per-attempt request timeout,
//! and a circuit breaker.
//!
//! Breaker states:
//! - Closed: normal operation, requests pass through
//! - Open: upstream assumed down, requests fail fast
//! - Half-Open: a single probe tests whether the upstream recovered
//!
//! Transitions: Closed moves to Open once `failure_threshold` consecutive
//! failures accumulate; Open moves to Half-Open after `recovery_timeout`;
//! the probe result decides between Closed and Open.

use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Tunable thresholds for the outbound policy.
///
/// These are operational defaults, not part of the functional contract.
#[derive(Debug, Clone)]
pub struct ResilienceConfig {
    /// Per-attempt timeout applied to the whole request/response exchange.
    pub request_timeout: Duration,
    /// Retries after the initial attempt.
    pub max_retries: u32,
    /// Backoff before the first retry; doubles on each subsequent one.
    pub initial_backoff: Duration,
    /// Consecutive failures before the breaker opens.
    pub failure_threshold: u32,
    /// How long the breaker stays open before admitting a probe.
    pub recovery_timeout: Duration,
}

impl Default for ResilienceConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
            max_retries: 3,
            initial_backoff: Duration::from_millis(200),
            failure_threshold: 5,
            recovery_timeout: Duration::from_secs(30),
        }
    }
}

impl ResilienceConfig {
    /// Delay before retry `attempt` (1-based): `initial_backoff * 2^(attempt-1)`.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        self.initial_backoff * 2u32.saturating_pow(attempt.saturating_sub(1))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Closed,
    Open { until: Instant },
    HalfOpen,
}

struct Inner {
    state: State,
    consecutive_failures: u32,
}

/// Circuit breaker shared by all calls going through one client.
pub struct CircuitBreaker {
    failure_threshold: u32,
    recovery_timeout: Duration,
    inner: Mutex<Inner>,
}

impl CircuitBreaker {
    pub fn new(failure_threshold: u32, recovery_timeout: Duration) -> Self {
        Self {
            failure_threshold,
            recovery_timeout,
            inner: Mutex::new(Inner {
                state: State::Closed,
                consecutive_failures: 0,
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether a call may go out right now. In the Open state this fails
    /// fast until the recovery timeout elapses, then admits exactly one
    /// probe (Half-Open).
    pub fn allow(&self) -> bool {
        let mut inner = self.lock();
        match inner.state {
            State::Closed => true,
            State::HalfOpen => false,
            State::Open { until } => {
                if Instant::now() >= until {
                    inner.state = State::HalfOpen;
                    true
                } else {
                    false
                }
            }
        }
    }

    pub fn record_success(&self) {
        let mut inner = self.lock();
        if inner.state != State::Closed {
            tracing::info!("circuit closed");
        }
        inner.state = State::Closed;
        inner.consecutive_failures = 0;
    }

    pub fn record_failure(&self) {
        let mut inner = self.lock();
        let reopen = State::Open {
            until: Instant::now() + self.recovery_timeout,
        };
        match inner.state {
            // The probe failed: straight back to Open.
            State::HalfOpen => {
                inner.state = reopen;
                tracing::warn!("circuit probe failed, reopening");
            }
            State::Closed => {
                inner.consecutive_failures += 1;
                if inner.consecutive_failures >= self.failure_threshold {
                    inner.state = reopen;
                    tracing::warn!(
                        failures = inner.consecutive_failures,
                        "failure threshold reached, circuit opened"
                    );
                }
            }
            State::Open { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breaker(threshold: u32, recovery: Duration) -> CircuitBreaker {
        CircuitBreaker::new(threshold, recovery)
    }

    #[test]
    fn test_backoff_doubles_per_attempt() {
        let config = ResilienceConfig {
            initial_backoff: Duration::from_millis(100),
            ..ResilienceConfig::default()
        };
        assert_eq!(config.backoff_delay(1), Duration::from_millis(100));
        assert_eq!(config.backoff_delay(2), Duration::from_millis(200));
        assert_eq!(config.backoff_delay(3), Duration::from_millis(400));
    }

    #[test]
    fn test_breaker_stays_closed_below_threshold() {
        let breaker = breaker(3, Duration::from_secs(60));
        breaker.record_failure();
        breaker.record_failure();
        assert!(breaker.allow());
    }

    #[test]
    fn test_breaker_opens_at_threshold() {
        let breaker = breaker(3, Duration::from_secs(60));
        for _ in 0..3 {
            assert!(breaker.allow());
            breaker.record_failure();
        }
        assert!(!breaker.allow());
    }

    #[test]
    fn test_success_resets_the_failure_count() {
        let breaker = breaker(2, Duration::from_secs(60));
        breaker.record_failure();
        breaker.record_success();
        breaker.record_failure();
        assert!(breaker.allow());
    }

    #[test]
    fn test_open_breaker_admits_a_single_probe_after_recovery() {
        let breaker = breaker(1, Duration::from_millis(10));
        breaker.record_failure();
        assert!(!breaker.allow());

        std::thread::sleep(Duration::from_millis(20));

        // One probe goes through, concurrent calls are still denied.
        assert!(breaker.allow());
        assert!(!breaker.allow());
    }

    #[test]
    fn test_probe_success_closes_the_breaker() {
        let breaker = breaker(1, Duration::from_millis(10));
        breaker.record_failure();
        std::thread::sleep(Duration::from_millis(20));

        assert!(breaker.allow());
        breaker.record_success();
        assert!(breaker.allow());
        assert!(breaker.allow());
    }

    #[test]
    fn test_probe_failure_reopens_the_breaker() {
        let breaker = breaker(1, Duration::from_millis(10));
        breaker.record_failure();
        std::thread::sleep(Duration::from_millis(20));

        assert!(breaker.allow());
        breaker.record_failure();
        assert!(!breaker.allow());
    }
}
