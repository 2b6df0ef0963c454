use serde::{Deserialize, Serialize};

use super::types::ProviderName;

/// Normalized postal address.
///
/// Every provider response is mapped into this shape. Fields are private and
/// only readable through accessors, so a record cannot change after the
/// provider built it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    postal_code: String,
    state: String,
    city: String,
    neighborhood: String,
    street: String,

    /// Display name of the provider that produced the record
    origin: ProviderName,

    /// Provider-reported problem attached to an otherwise usable record.
    ///
    /// Reserved: neither bundled provider fills it (failures surface as
    /// [`LookupError`](crate::LookupError) instead), so it is `None` unless a
    /// caller attaches one with [`Address::with_error`].
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl Address {
    pub fn new(
        origin: impl Into<ProviderName>,
        postal_code: impl Into<String>,
        state: impl Into<String>,
        city: impl Into<String>,
        neighborhood: impl Into<String>,
        street: impl Into<String>,
    ) -> Self {
        Self {
            postal_code: postal_code.into(),
            state: state.into(),
            city: city.into(),
            neighborhood: neighborhood.into(),
            street: street.into(),
            origin: origin.into(),
            error: None,
        }
    }

    /// Attach a provider-reported error message. Bundled providers never call this.
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn neighborhood(&self) -> &str {
        &self.neighborhood
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// One-line rendering: `<street>, <postalCode>, <neighborhood>, <city> - <state>`.
    pub fn summary(&self) -> String {
        format!(
            "{}, {}, {}, {} - {}",
            self.street, self.postal_code, self.neighborhood, self.city, self.state
        )
    }
}
