//! ViaCEP response models.
//!
//! Shape of `GET /ws/{cep}/json/`. ViaCEP answers unknown codes with
//! `200 {"erro": true}` (newer deployments send `"true"` as a string).

use serde::Deserialize;
use serde_json::Value;

use crate::models::Address;
use crate::provider::nullable::string_or_empty;

/// Separator placed between `logradouro` and `complemento`
pub const STREET_SEPARATOR: &str = " - ";

/// Raw address as returned by ViaCEP
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ViaCepAddress {
    #[serde(deserialize_with = "string_or_empty")]
    pub cep: String,
    #[serde(deserialize_with = "string_or_empty")]
    pub logradouro: String,
    #[serde(deserialize_with = "string_or_empty")]
    pub complemento: String,
    #[serde(deserialize_with = "string_or_empty")]
    pub bairro: String,
    #[serde(deserialize_with = "string_or_empty")]
    pub localidade: String,
    #[serde(deserialize_with = "string_or_empty")]
    pub uf: String,
    #[serde(deserialize_with = "string_or_empty")]
    pub ibge: String,
    #[serde(deserialize_with = "string_or_empty")]
    pub gia: String,
    #[serde(deserialize_with = "string_or_empty")]
    pub ddd: String,
    #[serde(deserialize_with = "string_or_empty")]
    pub siafi: String,
    /// Present only on the "unknown code" body
    pub erro: Option<Value>,
}

impl ViaCepAddress {
    /// Whether this body is ViaCEP's "not found" marker.
    pub fn is_not_found(&self) -> bool {
        match &self.erro {
            Some(Value::Bool(flag)) => *flag,
            Some(Value::String(flag)) => flag.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }

    /// Map into the normalized record.
    ///
    /// The street is `logradouro + " - " + complemento`, verbatim, even when
    /// the complement is empty.
    pub fn into_address(self, origin: &'static str) -> Address {
        let street = format!("{}{}{}", self.logradouro, STREET_SEPARATOR, self.complemento);
        Address::new(origin, self.cep, self.uf, self.localidade, self.bairro, street)
    }
}
