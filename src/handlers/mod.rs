pub mod activity;
pub mod auth;
pub mod history;
pub mod metrics;
pub mod profile;

use serde::{Deserialize, Deserializer};

/// Distinguishes an absent PATCH field (outer `None`) from an explicit JSON
/// `null` (`Some(None)`), so null can clear a nullable column.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
