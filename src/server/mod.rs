//! HTTP transport for the scoring service.
//!
//! Routes:
//! - `GET /` status line
//! - `POST /api/ml/predict` score one request (see `contract`)
//!
//! CORS is fully permissive.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

use crate::domain::ServeConfig;
use crate::error::AppError;
use crate::scoring::{HeuristicScorer, ScoringStrategy};

pub mod contract;

pub use contract::*;

pub const STATUS_MESSAGE: &str = "AI Creditworthiness Predictor ML API is running.";

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    scorer: Arc<dyn ScoringStrategy>,
}

/// Build the service router around a scoring strategy.
pub fn router(scorer: Arc<dyn ScoringStrategy>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(status))
        .route("/api/ml/predict", post(predict))
        .layer(cors)
        .with_state(AppState { scorer })
}

async fn status() -> &'static str {
    STATUS_MESSAGE
}

async fn predict(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    let reply = evaluate_request(state.scorer.as_ref(), &body);
    (reply.status, Json(reply.body))
}

/// Bind and serve until Ctrl-C.
pub async fn serve(config: ServeConfig) -> Result<(), AppError> {
    let scorer: Arc<dyn ScoringStrategy> = Arc::new(HeuristicScorer::new(config.jitter));
    let app = router(scorer);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::io(format!("Failed to bind {addr}: {e}")))?;
    tracing::info!(jitter = ?config.jitter, "scoring service listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::io(format!("Server error: {e}")))?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl+c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
