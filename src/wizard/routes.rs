//! REST endpoints for driving the wizard over HTTP.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::cors::CorsLayer;

use crate::error::TransitionError;

use super::manager::{WizardManager, WizardView};

/// Shared state for wizard routes.
#[derive(Clone)]
pub struct WizardRouteState {
    pub manager: Arc<WizardManager>,
}

#[derive(Debug, Deserialize)]
struct AnswerBody {
    value: String,
}

/// Map a navigator result to a response. Rejected actions are 409 with the
/// unchanged view so the client can re-render.
async fn respond(
    state: &WizardRouteState,
    result: Result<WizardView, TransitionError>,
) -> Response {
    match result {
        Ok(view) => Json(view).into_response(),
        Err(e) => {
            tracing::debug!(error = %e, "Rejected wizard action");
            let view = state.manager.view().await;
            (
                StatusCode::CONFLICT,
                Json(serde_json::json!({ "error": e.to_string(), "view": view })),
            )
                .into_response()
        }
    }
}

/// GET /api/wizard
async fn get_view(State(state): State<WizardRouteState>) -> impl IntoResponse {
    Json(state.manager.view().await)
}

/// POST /api/wizard/answer
async fn post_answer(
    State(state): State<WizardRouteState>,
    Json(body): Json<AnswerBody>,
) -> Response {
    let result = state.manager.answer(&body.value).await;
    respond(&state, result).await
}

/// POST /api/wizard/next
async fn post_next(State(state): State<WizardRouteState>) -> Response {
    let result = state.manager.next().await;
    respond(&state, result).await
}

/// POST /api/wizard/back
async fn post_back(State(state): State<WizardRouteState>) -> Response {
    let result = state.manager.back().await;
    respond(&state, result).await
}

/// POST /api/wizard/analyze
///
/// Blocks until both analysis calls finish (or fail).
async fn post_analyze(State(state): State<WizardRouteState>) -> Response {
    let result = state.manager.begin_analysis().await;
    respond(&state, result).await
}

/// POST /api/wizard/reset
async fn post_reset(State(state): State<WizardRouteState>) -> impl IntoResponse {
    Json(state.manager.reset().await)
}

async fn health() -> &'static str {
    "ok"
}

/// Build the wizard REST routes.
pub fn wizard_routes(state: WizardRouteState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/wizard", get(get_view))
        .route("/api/wizard/answer", post(post_answer))
        .route("/api/wizard/next", post(post_next))
        .route("/api/wizard/back", post(post_back))
        .route("/api/wizard/analyze", post(post_analyze))
        .route("/api/wizard/reset", post(post_reset))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
