//! Error types and retry classification for postal-code lookups.
//!
//! This module provides:
//! - [`LookupError`]: The error enum for a single lookup attempt
//! - [`RetryClass`]: Classification for determining retry behavior

mod retry;

pub use retry::RetryClass;

use thiserror::Error;

/// Errors that can occur during a single postal-code lookup attempt.
///
/// Each variant is classified into a [`RetryClass`] via the [`retry_class`](Self::retry_class)
/// method, which the retry runner uses to decide whether to try again.
#[derive(Error, Debug)]
pub enum LookupError {
    /// The request never produced a response (DNS, connect, TLS, ...).
    #[error("Transport error: {provider} - {message}")]
    Transport {
        /// The provider the request was sent to
        provider: String,
        /// The underlying client error
        message: String,
    },

    /// The response arrived but its body could not be read.
    #[error("Read error: {provider} - {message}")]
    Read {
        /// The provider that sent the response
        provider: String,
        /// The underlying client error
        message: String,
    },

    /// The body was not the JSON shape the provider documents.
    #[error("Parse error: {provider} - {message}")]
    Parse {
        /// The provider that sent the body
        provider: String,
        /// The decoder error
        message: String,
    },

    /// The provider answered with a status we do not handle explicitly.
    #[error("Unexpected status {status}: {provider}")]
    UnexpectedStatus {
        /// The provider that answered
        provider: String,
        /// The HTTP status code
        status: u16,
    },

    /// The attempt exceeded the per-attempt timeout.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The provider reports that the postal code does not exist.
    /// Retried like any other failure; only the deadline or an attempt cap ends it.
    #[error("Postal code not found: {postal_code} ({provider})")]
    NotFound {
        /// The provider that reported the miss
        provider: String,
        /// The postal code that was looked up
        postal_code: String,
    },

    /// The lookup was abandoned because the race was decided elsewhere.
    #[error("Cancelled: {provider}")]
    Cancelled {
        /// The provider whose lookup was cancelled
        provider: String,
    },
}

impl LookupError {
    /// Returns the retry classification for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use cepfinder_lookup::errors::{LookupError, RetryClass};
    ///
    /// let error = LookupError::RateLimited { provider: "VIA_CEP".to_string() };
    /// assert_eq!(error.retry_class(), RetryClass::WithBackoff);
    ///
    /// let error = LookupError::Cancelled { provider: "VIA_CEP".to_string() };
    /// assert_eq!(error.retry_class(), RetryClass::Never);
    /// ```
    pub fn retry_class(&self) -> RetryClass {
        match self {
            Self::Cancelled { .. } => RetryClass::Never,

            Self::RateLimited { .. } => RetryClass::WithBackoff,

            Self::Transport { .. }
            | Self::Read { .. }
            | Self::Parse { .. }
            | Self::UnexpectedStatus { .. }
            | Self::Timeout { .. }
            | Self::NotFound { .. } => RetryClass::Retry,
        }
    }

    /// The provider this error originated from.
    pub fn provider(&self) -> &str {
        match self {
            Self::Transport { provider, .. }
            | Self::Read { provider, .. }
            | Self::Parse { provider, .. }
            | Self::UnexpectedStatus { provider, .. }
            | Self::Timeout { provider }
            | Self::RateLimited { provider }
            | Self::NotFound { provider, .. }
            | Self::Cancelled { provider } => provider,
        }
    }
}
