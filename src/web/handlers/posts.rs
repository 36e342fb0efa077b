// Post handlers.
//
// POST /posts       store the post, moderate it, return it with its verdict
// GET  /posts/{id}  single post
//
// Moderation trouble never fails a request: the post comes back with
// verdict "unknown". Storage errors are reported as 500.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::pipeline::submit;
use crate::web::{api_error, AppState};

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub paragraphs: Vec<String>,
}

/// POST /posts: create and moderate a post.
pub async fn create_post(
    State(state): State<AppState>,
    Json(body): Json<CreatePostRequest>,
) -> Response {
    match submit::create_post(
        state.store.as_ref(),
        state.classifier.as_ref(),
        &body.title,
        &body.paragraphs,
    )
    .await
    {
        Ok(post) => Json(post).into_response(),
        Err(e) => {
            tracing::error!(error = %e, title = %body.title, "DB error creating post");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
        }
    }
}

/// GET /posts/{id}: single post by id.
pub async fn get_post(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.store.get_post(id).await {
        Ok(Some(post)) => Json(post).into_response(),
        Ok(None) => api_error(StatusCode::NOT_FOUND, "Post not found"),
        Err(e) => {
            tracing::error!(error = %e, post_id = id, "DB error fetching post");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
        }
    }
}
