// POST /posts/retry: re-moderate every post whose verdict is unknown.
//
// Runs the sweep inside the request and answers when it is done, with the
// number of posts checked, resolved and still unknown.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;

use crate::pipeline::retry::retry_unchecked;
use crate::web::{api_error, AppState};

pub async fn trigger_retry(State(state): State<AppState>) -> Response {
    let started_at = Utc::now().to_rfc3339();

    match retry_unchecked(
        state.store.as_ref(),
        state.classifier.as_ref(),
        state.retry_concurrency,
    )
    .await
    {
        Ok(summary) => Json(serde_json::json!({
            "checked": summary.checked,
            "updated": summary.updated,
            "still_unknown": summary.still_unknown,
            "started_at": started_at,
            "finished_at": Utc::now().to_rfc3339(),
        }))
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Retry sweep failed");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Retry sweep failed")
        }
    }
}
