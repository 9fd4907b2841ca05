//! Field-level serde helpers for provider wire types.

use serde::{Deserialize, Deserializer};

/// Deserialize an explicit JSON `null` as the type's default value.
///
/// Combine with `#[serde(default)]` so an absent field also yields the
/// default. A value of the wrong type is still an error.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
