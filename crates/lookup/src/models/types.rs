use std::borrow::Cow;

/// Human-facing provider name (e.g., "BrasilAPI", "ViaCEP")
pub type ProviderName = Cow<'static, str>;

/// Postal code as sent to providers; the format is not validated
pub type PostalCode = String;
