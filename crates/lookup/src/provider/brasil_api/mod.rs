//! BrasilAPI provider.
//!
//! Fetches addresses from `https://brasilapi.com.br/api/cep/v1/{cep}`.
//! BrasilAPI answers 404 for unknown codes, which maps to
//! [`LookupError::NotFound`] (retried like any other failure).

mod models;

pub use models::BrasilApiAddress;

use async_trait::async_trait;
use reqwest::Client;

use super::http::{build_client, fetch_json, join_url};
use crate::errors::LookupError;
use crate::models::Address;
use crate::provider::AddressProvider;

/// Provider ID constant
const PROVIDER_ID: &str = "BRASIL_API";

/// Display name stamped on addresses
const PROVIDER_NAME: &str = "BrasilAPI";

/// Production endpoint
pub const DEFAULT_BASE_URL: &str = "https://brasilapi.com.br";

/// BrasilAPI address provider.
///
/// # Example
///
/// ```ignore
/// use cepfinder_lookup::BrasilApiProvider;
///
/// let provider = BrasilApiProvider::new();
/// ```
pub struct BrasilApiProvider {
    client: Client,
    base_url: String,
}

impl BrasilApiProvider {
    /// Create a provider talking to the production endpoint.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a provider talking to another host (mirrors, test servers).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: build_client(),
            base_url: base_url.into(),
        }
    }

    fn lookup_url(&self, postal_code: &str) -> String {
        join_url(&self.base_url, &format!("api/cep/v1/{}", postal_code))
    }
}

impl Default for BrasilApiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AddressProvider for BrasilApiProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn lookup(&self, postal_code: &str) -> Result<Address, LookupError> {
        let url = self.lookup_url(postal_code);
        let raw: BrasilApiAddress = fetch_json(&self.client, &url, PROVIDER_ID, postal_code).await?;
        Ok(raw.into_address(PROVIDER_NAME))
    }
}
