use std::time::Duration;

/// Attempts per round before the operator is asked.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Decision returned by the retry policy after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Re-authenticate and try again after the given delay.
    RetryAfter(Duration),
    /// No attempts left in this round.
    Exhausted,
}

/// Bounded retry with optional capped exponential backoff.
///
/// A zero `base_delay` retries immediately, which is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first).
    pub max_attempts: u32,
    /// Base delay for backoff.
    pub base_delay: Duration,
    /// Upper bound on backoff delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: Duration::ZERO,
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Policy without delays, `max_attempts` clamped to at least 1.
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            ..Self::default()
        }
    }

    /// Decides what follows failed attempt number `attempt` (1-based).
    pub fn decide(&self, attempt: u32) -> RetryDecision {
        if attempt >= self.max_attempts {
            return RetryDecision::Exhausted;
        }
        // base * 2^(attempt-1), capped.
        let exp = 1u32 << attempt.saturating_sub(1).min(8);
        let delay = self.base_delay.saturating_mul(exp).min(self.max_delay);
        RetryDecision::RetryAfter(delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_retries_immediately_up_to_ten_attempts() {
        let p = RetryPolicy::default();
        assert_eq!(p.decide(1), RetryDecision::RetryAfter(Duration::ZERO));
        assert_eq!(p.decide(9), RetryDecision::RetryAfter(Duration::ZERO));
        assert_eq!(p.decide(10), RetryDecision::Exhausted);
    }

    #[test]
    fn exponential_backoff_grows_and_is_capped() {
        let p = RetryPolicy {
            max_attempts: 20,
            base_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(5),
        };
        let delay = |n| match p.decide(n) {
            RetryDecision::RetryAfter(d) => d,
            RetryDecision::Exhausted => panic!("expected retry"),
        };
        assert_eq!(delay(1), Duration::from_millis(250));
        assert_eq!(delay(2), Duration::from_millis(500));
        assert_eq!(delay(3), Duration::from_secs(1));
        assert_eq!(delay(15), Duration::from_secs(5));
    }

    #[test]
    fn immediate_clamps_attempts() {
        let p = RetryPolicy::immediate(0);
        assert_eq!(p.max_attempts, 1);
        assert_eq!(p.decide(1), RetryDecision::Exhausted);
    }
}
