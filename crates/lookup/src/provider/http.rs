//! Shared HTTP plumbing for the JSON providers.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::LookupError;

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the client a provider keeps for its whole life.
pub(crate) fn build_client() -> Client {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Join a base URL and a path without doubling the slash.
pub(crate) fn join_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// GET `url` and decode the body as `T`.
///
/// Maps every failure onto the [`LookupError`] taxonomy: transport, status,
/// body read, and JSON decode are kept apart so callers can log them distinctly.
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    provider: &'static str,
    postal_code: &str,
) -> Result<T, LookupError> {
    debug!("GET {} ({})", url, provider);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| LookupError::Transport {
            provider: provider.to_string(),
            message: e.to_string(),
        })?;

    match response.status() {
        StatusCode::NOT_FOUND => {
            return Err(LookupError::NotFound {
                provider: provider.to_string(),
                postal_code: postal_code.to_string(),
            })
        }
        StatusCode::TOO_MANY_REQUESTS => {
            return Err(LookupError::RateLimited {
                provider: provider.to_string(),
            })
        }
        status if !status.is_success() => {
            return Err(LookupError::UnexpectedStatus {
                provider: provider.to_string(),
                status: status.as_u16(),
            })
        }
        _ => {}
    }

    let body = response.bytes().await.map_err(|e| LookupError::Read {
        provider: provider.to_string(),
        message: e.to_string(),
    })?;

    serde_json::from_slice(&body).map_err(|e| LookupError::Parse {
        provider: provider.to_string(),
        message: e.to_string(),
    })
}
