use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A persisted payload never holds more than this many articles.
pub const MAX_ARTICLES: usize = 15;

/// Article as delivered by CollectAPI. The dashboard only reads `name`,
/// `url` and `source`; everything else is kept verbatim in `extra` so the
/// cached JSON round-trips without losing provider fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub source: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The single cached entity. Field names stay camelCase on the wire to
/// match payloads already sitting in the blob store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsPayload {
    pub articles: Vec<Article>,
    /// Milliseconds since epoch at the time the payload was produced.
    pub last_fetched: i64,
}

/// CollectAPI response envelope. `success` is validated by the refresher,
/// not here.
#[derive(Debug, Deserialize)]
pub struct NewsEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub result: Option<Vec<Article>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NewsSource {
    #[serde(rename = "blob-cache")]
    BlobCache,
    #[serde(rename = "collectapi")]
    CollectApi,
}

/// Payload as returned to callers: the cached/fresh payload plus a tag
/// saying where it came from. The tag is never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct NewsResponse {
    #[serde(flatten)]
    pub payload: NewsPayload,
    pub source: NewsSource,
}
