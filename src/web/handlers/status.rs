// GET /status: post counts per verdict.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::web::{api_error, AppState};

pub async fn get_status(State(state): State<AppState>) -> Response {
    match state.store.verdict_counts().await {
        Ok(counts) => Json(serde_json::json!({
            "posts": counts.total(),
            "clean": counts.clean,
            "foul": counts.foul,
            "unknown": counts.unknown,
        }))
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "DB error counting verdicts");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
        }
    }
}
