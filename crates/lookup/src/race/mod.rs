//! Racing providers against each other.
//!
//! This module provides:
//! - Retry policy per provider (attempt cap, backoff, per-attempt timeout)
//! - The retry runner that drives one provider under a cancellation token
//! - The race coordinator that keeps the first address under one deadline

mod coordinator;
mod policy;
mod retry;

#[cfg(test)]
pub(crate) mod testing;

pub use coordinator::{RaceCoordinator, RaceOutcome, DEFAULT_DEADLINE};
pub use policy::{Backoff, RetryPolicy, RATE_LIMIT_FLOOR};
pub use retry::lookup_with_retry;
