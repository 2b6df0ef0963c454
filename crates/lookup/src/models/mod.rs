//! Postal lookup models
//!
//! - `types` - Type aliases (ProviderName, PostalCode)
//! - `address` - The normalized address record every provider maps into

mod address;
mod types;

pub use address::Address;
pub use types::{PostalCode, ProviderName};
