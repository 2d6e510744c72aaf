use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NewsError {
    /// A required secret is missing from the environment. Raised before any
    /// network call is attempted.
    #[error("{0}")]
    Configuration(String),
    /// CollectAPI was unreachable, answered with a non-success status or
    /// returned a malformed envelope.
    #[error("{0}")]
    Upstream(String),
    /// Blob store failure. Read failures are swallowed by the refresher;
    /// only write failures surface through this variant.
    #[error("{0}")]
    Store(String),
}

impl IntoResponse for NewsError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "Haberler alınamadı.",
                "details": self.to_string(),
            })),
        )
            .into_response()
    }
}
