//! ViaCEP provider.
//!
//! Fetches addresses from `http://viacep.com.br/ws/{cep}/json/`.

mod models;

pub use models::{ViaCepAddress, STREET_SEPARATOR};

use async_trait::async_trait;
use reqwest::Client;

use super::http::{build_client, fetch_json, join_url};
use crate::errors::LookupError;
use crate::models::Address;
use crate::provider::AddressProvider;

/// Provider ID constant
const PROVIDER_ID: &str = "VIA_CEP";

/// Display name stamped on addresses
const PROVIDER_NAME: &str = "ViaCEP";

/// Production endpoint
pub const DEFAULT_BASE_URL: &str = "http://viacep.com.br";

/// ViaCEP address provider.
pub struct ViaCepProvider {
    client: Client,
    base_url: String,
}

impl ViaCepProvider {
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
        join_url(&self.base_url, &format!("ws/{}/json/", postal_code))
    }
}

impl Default for ViaCepProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AddressProvider for ViaCepProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn lookup(&self, postal_code: &str) -> Result<Address, LookupError> {
        let url = self.lookup_url(postal_code);
        let raw: ViaCepAddress = fetch_json(&self.client, &url, PROVIDER_ID, postal_code).await?;

        if raw.is_not_found() {
            return Err(LookupError::NotFound {
                provider: PROVIDER_ID.to_string(),
                postal_code: postal_code.to_string(),
            });
        }

        Ok(raw.into_address(PROVIDER_NAME))
    }
}
