//! Lenient serde helpers for upstream JSON

use serde::{Deserialize, Deserializer};

/// Accept a string, an integer or null for identifier fields.
///
/// Upstream systems emit sequence identifiers both as `"3334430"` and as
/// `3334430`.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Integer(i64),
        Unsigned(u64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Integer(value) => value.to_string(),
        Raw::Unsigned(value) => value.to_string(),
    }))
}
