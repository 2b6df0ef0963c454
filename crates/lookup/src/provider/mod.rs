//! Postal-code provider abstractions and implementations.
//!
//! This module contains:
//! - The `AddressProvider` trait that all providers implement
//! - Concrete provider implementations (BrasilAPI, ViaCEP)
//!
//! A provider performs one attempt per call. Retrying, racing and
//! cancellation live in the [`race`](crate::race) module.

mod http;
mod nullable;
mod traits;

pub mod brasil_api;
pub mod via_cep;

// Re-exports
pub use traits::AddressProvider;
