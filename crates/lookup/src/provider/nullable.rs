//! Serde helpers for loosely typed provider bodies.

use serde::{Deserialize, Deserializer};

/// Decode a string field, treating `null` as an empty string.
///
/// Pair with `#[serde(default)]` so a missing key decodes the same way.
pub(crate) fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}
