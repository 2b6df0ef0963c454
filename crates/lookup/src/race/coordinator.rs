//! Race coordinator: run every provider at once, keep the first address.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use super::policy::RetryPolicy;
use super::retry::lookup_with_retry;
use crate::errors::LookupError;
use crate::models::Address;
use crate::provider::AddressProvider;

/// Overall deadline for one race.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(1);

/// The single result of a race.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RaceOutcome {
    /// First provider to answer.
    Resolved(Address),
    /// The deadline elapsed before any provider answered.
    TimedOut,
    /// Every provider hit its attempt cap before the deadline, or none was registered.
    ///
    /// Unreachable with an unbounded policy, where only the deadline ends a lookup.
    Exhausted,
}

impl RaceOutcome {
    pub fn address(&self) -> Option<&Address> {
        match self {
            Self::Resolved(address) => Some(address),
            Self::TimedOut | Self::Exhausted => None,
        }
    }
}

impl fmt::Display for RaceOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolved(address) => write!(
                f,
                "Address received from {}: {}",
                address.origin(),
                address.summary()
            ),
            Self::TimedOut => write!(f, "timeout error"),
            Self::Exhausted => write!(f, "lookup failed: no provider returned an address"),
        }
    }
}

/// Races a set of providers for one postal code under a single deadline.
///
/// Each provider runs in its own task with its own retry loop. The first
/// address wins; on every exit path the remaining tasks are cancelled and
/// awaited, so nothing outlives [`race`](Self::race).
pub struct RaceCoordinator {
    providers: Vec<Arc<dyn AddressProvider>>,
    policy: RetryPolicy,
    deadline: Duration,
}

impl RaceCoordinator {
    /// Create a coordinator with the default policy and deadline.
    pub fn new(providers: Vec<Arc<dyn AddressProvider>>) -> Self {
        Self::with_config(providers, RetryPolicy::default(), DEFAULT_DEADLINE)
    }

    /// Create a coordinator with custom configuration.
    pub fn with_config(
        providers: Vec<Arc<dyn AddressProvider>>,
        policy: RetryPolicy,
        deadline: Duration,
    ) -> Self {
        Self {
            providers,
            policy,
            deadline,
        }
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Look up `postal_code` with every provider and return the first outcome.
    pub async fn race(&self, postal_code: &str) -> RaceOutcome {
        if self.providers.is_empty() {
            warn!("No providers registered, nothing to race");
            return RaceOutcome::Exhausted;
        }

        info!(
            "Racing {} providers for '{}' (deadline {:?})",
            self.providers.len(),
            postal_code,
            self.deadline
        );

        let token = CancellationToken::new();
        let mut tasks = JoinSet::new();

        for provider in &self.providers {
            let provider = Arc::clone(provider);
            let postal_code = postal_code.to_string();
            let policy = self.policy.clone();
            let token = token.child_token();

            tasks.spawn(async move {
                lookup_with_retry(provider.as_ref(), &postal_code, &policy, &token).await
            });
        }

        let outcome = match tokio::time::timeout(self.deadline, first_address(&mut tasks)).await {
            Ok(Some(address)) => {
                info!("Provider '{}' won the race", address.origin());
                RaceOutcome::Resolved(address)
            }
            Ok(None) => {
                warn!("Every provider gave up for '{}'", postal_code);
                RaceOutcome::Exhausted
            }
            Err(_) => {
                warn!(
                    "No provider answered for '{}' within {:?}",
                    postal_code, self.deadline
                );
                RaceOutcome::TimedOut
            }
        };

        token.cancel();
        tasks.shutdown().await;
        debug!("Race for '{}' settled, losing lookups stopped", postal_code);

        outcome
    }
}

/// Wait for the first task that produced an address.
///
/// Returns `None` once every task has finished without one.
async fn first_address(tasks: &mut JoinSet<Result<Address, LookupError>>) -> Option<Address> {
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Ok(address)) => return Some(address),
            Ok(Err(error)) => {
                warn!("Provider '{}' gave up: {}", error.provider(), error);
            }
            Err(join_error) => {
                warn!("Provider task ended abnormally: {}", join_error);
            }
        }
    }
    None
}
