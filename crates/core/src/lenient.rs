//! Forgiving field deserializers for CRM input
//!
//! A malformed optional field degrades to its default instead of rejecting
//! the whole lead record.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum OrInvalid<T> {
    Valid(T),
    Invalid(IgnoredAny),
}

/// Deserialize `T`, falling back to `T::default()` when the value has the wrong shape
pub(crate) fn default_on_error<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(match OrInvalid::<T>::deserialize(deserializer)? {
        OrInvalid::Valid(value) => value,
        OrInvalid::Invalid(_) => T::default(),
    })
}

/// Deserialize a list, dropping elements that have the wrong shape
pub(crate) fn skip_invalid<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match OrInvalid::<Vec<OrInvalid<T>>>::deserialize(deserializer)? {
        OrInvalid::Valid(items) => items
            .into_iter()
            .filter_map(|item| match item {
                OrInvalid::Valid(value) => Some(value),
                OrInvalid::Invalid(_) => None,
            })
            .collect(),
        OrInvalid::Invalid(_) => Vec::new(),
    })
}
