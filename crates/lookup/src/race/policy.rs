//! Retry policy for a single provider.
//!
//! The default policy retries forever with no delay: a failing provider is
//! only stopped by the race deadline.

use std::num::NonZeroU32;
use std::time::Duration;

use crate::errors::RetryClass;

/// Minimum wait after a provider rate limited us (HTTP 429).
pub const RATE_LIMIT_FLOOR: Duration = Duration::from_millis(250);

/// Delay schedule between attempts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Backoff {
    /// Retry immediately.
    #[default]
    None,
    /// Same delay after every failure.
    Fixed(Duration),
    /// `initial * 2^(n-1)` after the n-th failure, capped at `max`.
    Exponential { initial: Duration, max: Duration },
}

impl Backoff {
    /// Delay after the `failures`-th consecutive failure (1-based).
    pub fn delay(&self, failures: u32) -> Duration {
        match self {
            Self::None => Duration::ZERO,
            Self::Fixed(delay) => *delay,
            Self::Exponential { initial, max } => {
                let factor = 2u32.saturating_pow(failures.saturating_sub(1));
                initial.checked_mul(factor).unwrap_or(*max).min(*max)
            }
        }
    }
}

/// How hard one provider is pushed before it gives up.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts allowed, `None` for unbounded.
    pub max_attempts: Option<NonZeroU32>,

    /// Delay schedule between attempts.
    pub backoff: Backoff,

    /// Upper bound for one attempt, `None` to rely on the HTTP client timeout.
    pub per_attempt_timeout: Option<Duration>,
}

impl RetryPolicy {
    /// Retry forever, immediately, with no per-attempt timeout.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Cap the number of attempts. `0` means unbounded.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = NonZeroU32::new(max_attempts);
        self
    }

    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn with_per_attempt_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.per_attempt_timeout = timeout;
        self
    }

    /// Whether attempt number `attempt` (1-based) may run.
    pub fn allows_attempt(&self, attempt: u32) -> bool {
        match self.max_attempts {
            Some(max) => attempt <= max.get(),
            None => true,
        }
    }

    /// Wait before the next attempt, after `failures` consecutive failures.
    pub fn delay_for(&self, failures: u32, class: RetryClass) -> Duration {
        let delay = self.backoff.delay(failures);
        match class {
            RetryClass::WithBackoff => delay.max(RATE_LIMIT_FLOOR),
            RetryClass::Retry | RetryClass::Never => delay,
        }
    }
}
