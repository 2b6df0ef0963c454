//! Retry runner: drives one provider until it answers, gives up, or is cancelled.

use std::time::Duration;

use log::{debug, info, warn};
use tokio_util::sync::CancellationToken;

use super::policy::RetryPolicy;
use crate::errors::{LookupError, RetryClass};
use crate::models::Address;
use crate::provider::AddressProvider;

/// Look up `postal_code` with `provider`, retrying per `policy`.
///
/// Every failed attempt is logged at `warn`. The in-flight attempt and any
/// backoff sleep race against `token`; once it fires the attempt is dropped
/// and [`LookupError::Cancelled`] is returned.
///
/// Returns the last error when the policy runs out of attempts. With the
/// default policy that never happens: only cancellation ends the loop.
pub async fn lookup_with_retry(
    provider: &dyn AddressProvider,
    postal_code: &str,
    policy: &RetryPolicy,
    token: &CancellationToken,
) -> Result<Address, LookupError> {
    let mut attempt: u32 = 0;

    loop {
        attempt = attempt.saturating_add(1);
        debug!("Provider '{}': attempt {}", provider.id(), attempt);

        let result = tokio::select! {
            biased;
            _ = token.cancelled() => return Err(cancelled(provider)),
            result = attempt_once(provider, postal_code, policy.per_attempt_timeout) => result,
        };

        let error = match result {
            Ok(address) => {
                if attempt > 1 {
                    info!(
                        "Provider '{}' answered after {} attempts",
                        provider.id(),
                        attempt
                    );
                }
                return Ok(address);
            }
            Err(error) => error,
        };

        warn!(
            "Provider '{}' attempt {} failed: {}",
            provider.id(),
            attempt,
            error
        );

        let class = error.retry_class();
        if class == RetryClass::Never {
            return Err(error);
        }

        if !policy.allows_attempt(attempt.saturating_add(1)) {
            warn!(
                "Provider '{}' giving up after {} attempts",
                provider.id(),
                attempt
            );
            return Err(error);
        }

        let delay = policy.delay_for(attempt, class);
        if delay.is_zero() {
            // Immediate retry, but let the cancelling side get scheduled.
            tokio::task::yield_now().await;
        } else {
            tokio::select! {
                biased;
                _ = token.cancelled() => return Err(cancelled(provider)),
                _ = tokio::time::sleep(delay) => {}
            }
        }
    }
}

async fn attempt_once(
    provider: &dyn AddressProvider,
    postal_code: &str,
    timeout: Option<Duration>,
) -> Result<Address, LookupError> {
    match timeout {
        Some(limit) => tokio::time::timeout(limit, provider.lookup(postal_code))
            .await
            .unwrap_or_else(|_| {
                Err(LookupError::Timeout {
                    provider: provider.id().to_string(),
                })
            }),
        None => provider.lookup(postal_code).await,
    }
}

fn cancelled(provider: &dyn AddressProvider) -> LookupError {
    LookupError::Cancelled {
        provider: provider.id().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::race::policy::{Backoff, RATE_LIMIT_FLOOR};
    use crate::race::testing::{ScriptedProvider, Step};
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_retries_through_malformed_bodies() {
        let provider = ScriptedProvider::answering("A", "ProviderA", Duration::from_millis(10))
            .with_script(vec![Step::Malformed, Step::Malformed, Step::Malformed]);
        let token = CancellationToken::new();

        let address = lookup_with_retry(&provider, "60541646", &RetryPolicy::unbounded(), &token)
            .await
            .unwrap();

        assert_eq!(address.origin(), "ProviderA");
        assert_eq!(provider.attempts(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_not_found_is_retried() {
        let provider = ScriptedProvider::answering("A", "ProviderA", Duration::from_millis(10))
            .with_script(vec![Step::NotFound, Step::NotFound]);
        let token = CancellationToken::new();

        let address = lookup_with_retry(&provider, "60541646", &RetryPolicy::unbounded(), &token)
            .await
            .unwrap();

        assert_eq!(address.origin(), "ProviderA");
        assert_eq!(provider.attempts(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_not_found_gives_up_only_at_the_attempt_cap() {
        let provider = ScriptedProvider::missing("A", "ProviderA", Duration::from_millis(10));
        let token = CancellationToken::new();
        let policy = RetryPolicy::unbounded().with_max_attempts(2);

        let error = lookup_with_retry(&provider, "00000000", &policy, &token)
            .await
            .unwrap_err();

        assert!(matches!(error, LookupError::NotFound { .. }));
        assert_eq!(provider.attempts(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_max_attempts() {
        let provider = ScriptedProvider::failing("A", "ProviderA", Duration::from_millis(10));
        let token = CancellationToken::new();
        let policy = RetryPolicy::unbounded().with_max_attempts(3);

        let error = lookup_with_retry(&provider, "60541646", &policy, &token)
            .await
            .unwrap_err();

        assert!(matches!(error, LookupError::Parse { .. }));
        assert_eq!(provider.attempts(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fixed_backoff_spaces_attempts() {
        let provider = ScriptedProvider::answering("A", "ProviderA", Duration::ZERO)
            .with_script(vec![Step::Malformed, Step::Malformed]);
        let token = CancellationToken::new();
        let policy =
            RetryPolicy::unbounded().with_backoff(Backoff::Fixed(Duration::from_millis(100)));

        let started = Instant::now();
        lookup_with_retry(&provider, "60541646", &policy, &token)
            .await
            .unwrap();

        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(200));
        assert!(elapsed < Duration::from_millis(210));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limit_waits_for_floor() {
        let provider = ScriptedProvider::answering("A", "ProviderA", Duration::ZERO)
            .with_script(vec![Step::RateLimited]);
        let token = CancellationToken::new();

        let started = Instant::now();
        lookup_with_retry(&provider, "60541646", &RetryPolicy::unbounded(), &token)
            .await
            .unwrap();

        let elapsed = started.elapsed();
        assert!(elapsed >= RATE_LIMIT_FLOOR);
        assert!(elapsed < RATE_LIMIT_FLOOR + Duration::from_millis(10));
        assert_eq!(provider.attempts(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_per_attempt_timeout_interrupts_hung_attempt() {
        let provider = ScriptedProvider::answering("A", "ProviderA", Duration::from_millis(10))
            .with_script(vec![Step::Hang]);
        let token = CancellationToken::new();
        let policy = RetryPolicy::unbounded().with_per_attempt_timeout(Some(Duration::from_millis(100)));

        let address = lookup_with_retry(&provider, "60541646", &policy, &token)
            .await
            .unwrap();

        assert_eq!(address.postal_code(), "60541646");
        assert_eq!(provider.attempts(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_interrupts_hung_attempt() {
        let provider = ScriptedProvider::hanging("A", "ProviderA");
        let token = CancellationToken::new();

        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            canceller.cancel();
        });

        let error = lookup_with_retry(&provider, "60541646", &RetryPolicy::unbounded(), &token)
            .await
            .unwrap_err();

        assert!(matches!(error, LookupError::Cancelled { .. }));
        assert_eq!(provider.attempts(), 1);
    }

    #[tokio::test]
    async fn test_already_cancelled_token_skips_the_attempt() {
        let provider = ScriptedProvider::answering("A", "ProviderA", Duration::ZERO);
        let token = CancellationToken::new();
        token.cancel();

        let error = lookup_with_retry(&provider, "60541646", &RetryPolicy::unbounded(), &token)
            .await
            .unwrap_err();

        assert!(matches!(error, LookupError::Cancelled { .. }));
        assert_eq!(provider.attempts(), 0);
    }
}
