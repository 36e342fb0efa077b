// Classification service router.
//
// POST /sentences/ {"fragment": "..."} -> {"hasFoulLanguage": bool}
// GET  /health

use std::sync::Arc;

use anyhow::Result;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use super::model::WordListModel;
use crate::moderation::client::{SentenceRequest, SentenceResponse};
use crate::web::health;

/// Start the classification service and block until it exits.
pub async fn run_server(model: WordListModel, port: u16, bind: &str) -> Result<()> {
    let app = build_router(Arc::new(model));

    let addr = format!("{bind}:{port}");
    info!("Classification service listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(model: Arc<WordListModel>) -> Router {
    Router::new()
        .route("/sentences", post(classify_sentence))
        .route("/sentences/", post(classify_sentence))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(model)
}

async fn classify_sentence(
    State(model): State<Arc<WordListModel>>,
    Json(body): Json<SentenceRequest>,
) -> Json<SentenceResponse> {
    let has_foul_language = model.has_foul_language(&body.fragment);
    debug!(has_foul_language, "Classified fragment");
    Json(SentenceResponse { has_foul_language })
}
