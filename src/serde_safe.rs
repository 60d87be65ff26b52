use serde::{Deserialize, Deserializer};

#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum TryParse<T> {
    Valid(T),
    Invalid(serde_json::Value),
}

impl<T: Default> TryParse<T> {
    fn or_default(self) -> T {
        match self {
            Self::Valid(v) => v,
            Self::Invalid(json) => {
                tracing::debug!(?json, "unreadable value, using default");
                T::default()
            }
        }
    }
}

/// Field that resets to `Default` if it fails to parse.
pub fn deserialize<'de, T: Default + Deserialize<'de>, D: Deserializer<'de>>(deserializer: D) -> Result<T, D::Error> {
    Ok(TryParse::deserialize(deserializer)?.or_default())
}

/// List whose unreadable elements are kept as `Default` values, so the element count is preserved.
pub fn deserialize_each<'de, T: Default + Deserialize<'de>, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<T>, D::Error> {
    let items: Vec<TryParse<T>> = Deserialize::deserialize(deserializer)?;
    Ok(items.into_iter().map(TryParse::or_default).collect())
}
