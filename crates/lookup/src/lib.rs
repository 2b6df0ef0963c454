//! cepfinder Lookup Crate
//!
//! This crate resolves Brazilian postal codes (CEP) by racing several
//! address providers against each other and keeping the first answer.
//!
//! # Overview
//!
//! The lookup crate supports:
//! - Multiple providers: BrasilAPI, ViaCEP
//! - A provider-agnostic normalized [`Address`]
//! - Explicit retry policies per provider
//! - A first-answer race under one deadline, with losers cancelled
//!
//! # Architecture
//!
//! ```text
//!                          +------------------+
//!                          |  RaceCoordinator |  (one deadline, first answer wins)
//!                          +------------------+
//!                             |            |
//!                             v            v
//!                  +----------------+  +----------------+
//!                  | retry runner   |  | retry runner   |  (RetryPolicy + CancellationToken)
//!                  +----------------+  +----------------+
//!                             |            |
//!                             v            v
//!                  +----------------+  +----------------+
//!                  |   BrasilAPI    |  |     ViaCEP     |  (AddressProvider)
//!                  +----------------+  +----------------+
//!                             |            |
//!                             v            v
//!                          +------------------+
//!                          |     Address      |  (normalized record)
//!                          +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`Address`] - Normalized postal address
//! - [`AddressProvider`] - One lookup attempt against one service
//! - [`RetryPolicy`] - Attempt cap, backoff and per-attempt timeout
//! - [`RaceCoordinator`] / [`RaceOutcome`] - The race and its single result
//! - [`LookupError`] - Failure of one attempt, classified by [`RetryClass`]

pub mod errors;
pub mod models;
pub mod provider;
pub mod race;

// Re-export all public types from models
pub use models::{Address, PostalCode, ProviderName};

// Re-export error types
pub use errors::{LookupError, RetryClass};

// Re-export provider types
pub use provider::brasil_api::BrasilApiProvider;
pub use provider::via_cep::ViaCepProvider;
pub use provider::AddressProvider;

// Re-export race types
pub use race::{
    lookup_with_retry, Backoff, RaceCoordinator, RaceOutcome, RetryPolicy, DEFAULT_DEADLINE,
};
