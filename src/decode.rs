//! Decoding helpers shared by the response types.

use serde::{Deserialize, Deserializer};

/// Deserializes a field, mapping JSON `null` to the type's default value.
///
/// Response structs also carry `#[serde(default)]`, so a field is zero-valued
/// whether TapPay omits it or sends it as `null`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
