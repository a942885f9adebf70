use serde::{Deserialize, Serialize};
use serde_json::Number;

#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    #[serde(default)]
    pub url: Option<String>,
}

/// Price as reported by the extraction collaborator: a plain number when the
/// listing carried one, or a string marker (e.g. "N/A") when it did not. The
/// value is passed back to the client exactly as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Number(Number),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeResult {
    pub title: String,
    pub price: Price,
    pub url: String,
    pub source: String,
}
