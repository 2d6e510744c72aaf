use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use http::{header, HeaderMap, StatusCode};
use serde_json::json;

use crate::models::error::NewsError;
use crate::utils::state::AppState;

/// GET /news — cached payload if fresh enough, otherwise a refresh through
/// the upstream provider. Errors render as 500 `{ error, details }` via
/// `NewsError::into_response`.
pub async fn get_news(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, NewsError> {
    let payload = state.refresher.get_or_refresh(false).await?;
    Ok((StatusCode::OK, Json(payload)))
}

/// GET /cron/update-news — always forces a refresh. When CRON_SECRET is
/// configured the caller must present it as a bearer token; the check runs
/// before any network call.
pub async fn update_news(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if let Some(secret) = &state.config.cron_secret {
        let authorized = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(|value| value == format!("Bearer {secret}"))
            .unwrap_or(false);

        if !authorized {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Unauthorized" })),
            )
                .into_response();
        }
    }

    match state.refresher.get_or_refresh(true).await {
        Ok(fresh) => (
            StatusCode::OK,
            Json(json!({
                "ok": true,
                "updatedAt": fresh.payload.last_fetched,
                "articleCount": fresh.payload.articles.len(),
            })),
        )
            .into_response(),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "ok": false, "error": err.to_string() })),
        )
            .into_response(),
    }
}
