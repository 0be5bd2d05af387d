use serde::{de, Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
}

/// Accept `12.5`, `"12.5"`, `""` and `null`; blank strings read as absent.
pub(super) fn lenient<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawAmount>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawAmount::Number(n)) => Ok(Some(n)),
        Some(RawAmount::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(RawAmount::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid amount: {s:?}"))),
    }
}
