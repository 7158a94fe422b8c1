use serde::Deserialize;

/// Stripe's envelope for list endpoints.
#[derive(Debug, Deserialize)]
pub struct List<T> {
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub has_more: bool,
    pub data: Vec<T>,
}
