//! BrasilAPI response models.
//!
//! Shape of `GET /api/cep/v1/{cep}`. Missing or `null` fields decode as empty strings.

use serde::Deserialize;

use crate::models::Address;
use crate::provider::nullable::string_or_empty;

/// Raw address as returned by BrasilAPI
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BrasilApiAddress {
    #[serde(deserialize_with = "string_or_empty")]
    pub cep: String,
    #[serde(deserialize_with = "string_or_empty")]
    pub state: String,
    #[serde(deserialize_with = "string_or_empty")]
    pub city: String,
    #[serde(deserialize_with = "string_or_empty")]
    pub neighborhood: String,
    #[serde(deserialize_with = "string_or_empty")]
    pub street: String,
    /// Upstream service BrasilAPI answered from (correios, viacep, ...)
    #[serde(deserialize_with = "string_or_empty")]
    pub service: String,
}

impl BrasilApiAddress {
    /// Map into the normalized record. Fields carry over one to one.
    pub fn into_address(self, origin: &'static str) -> Address {
        Address::new(
            origin,
            self.cep,
            self.state,
            self.city,
            self.neighborhood,
            self.street,
        )
    }
}
