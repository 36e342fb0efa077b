// Web server: Axum-based blog post API.
//
// Routes:
//   POST /posts, /posts/  create a post and moderate it synchronously
//   GET  /posts/{id}      fetch a stored post
//   POST /posts/retry     run the retry sweep and report the summary
//   GET  /status          verdict counts
//   GET  /health          liveness

use std::sync::Arc;

use anyhow::Result;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::db::PostStore;
use crate::moderation::traits::FoulLanguageClassifier;

pub mod handlers;

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PostStore>,
    pub classifier: Arc<dyn FoulLanguageClassifier>,
    /// Posts evaluated in parallel by POST /posts/retry
    pub retry_concurrency: usize,
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(state: AppState, port: u16, bind: &str) -> Result<()> {
    let app = build_router(state);

    let addr = format!("{bind}:{port}");
    info!("Postguard API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/posts", post(handlers::posts::create_post))
        .route("/posts/", post(handlers::posts::create_post))
        .route("/posts/retry", post(handlers::retry::trigger_retry))
        .route("/posts/{id}", get(handlers::posts::get_post))
        .route("/status", get(handlers::status::get_status))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check: always returns 200 OK.
pub async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "status": "ok" })),
    )
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
}
