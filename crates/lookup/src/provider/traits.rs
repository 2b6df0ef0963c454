//! Address provider trait definitions.
//!
//! This module defines the core `AddressProvider` trait that all
//! postal-code providers must implement.

use async_trait::async_trait;

use crate::errors::LookupError;
use crate::models::Address;

/// Trait for postal-code lookup providers.
///
/// Implement this trait to add support for a new address source.
/// The race coordinator runs every registered provider concurrently and
/// keeps the first address returned.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use cepfinder_lookup::{Address, AddressProvider, LookupError};
///
/// struct MyProvider;
///
/// #[async_trait]
/// impl AddressProvider for MyProvider {
///     fn id(&self) -> &'static str {
///         "MY_PROVIDER"
///     }
///
///     fn name(&self) -> &'static str {
///         "MyProvider"
///     }
///
///     async fn lookup(&self, postal_code: &str) -> Result<Address, LookupError> {
///         // ... one HTTP round trip, mapped into an Address
///     }
/// }
/// ```
#[async_trait]
pub trait AddressProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "BRASIL_API", "VIA_CEP", etc.
    /// Used for logging and in error values.
    fn id(&self) -> &'static str;

    /// Display name, stamped on every [`Address`] this provider produces.
    fn name(&self) -> &'static str;

    /// Perform exactly one lookup attempt.
    ///
    /// Retrying is the caller's business; implementations must not loop.
    ///
    /// # Arguments
    ///
    /// * `postal_code` - The code to look up, sent as-is (not validated)
    async fn lookup(&self, postal_code: &str) -> Result<Address, LookupError>;
}
