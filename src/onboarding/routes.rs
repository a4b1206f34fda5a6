//! REST endpoints for onboarding progress.

use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;

use super::store::ProgressStore;

/// Shared state for onboarding routes.
#[derive(Clone)]
pub struct OnboardingRouteState {
    pub store: Arc<ProgressStore>,
}

/// GET /api/onboarding/progress
///
/// Returns the checklist: steps, current step, and percentage.
async fn get_progress(State(state): State<OnboardingRouteState>) -> impl IntoResponse {
    Json(state.store.checklist().await)
}

/// POST /api/onboarding/reset
async fn reset_progress(State(state): State<OnboardingRouteState>) -> impl IntoResponse {
    state.store.reset_progress().await;
    Json(state.store.checklist().await)
}

/// Build the onboarding REST routes.
pub fn onboarding_routes(state: OnboardingRouteState) -> Router {
    Router::new()
        .route("/api/onboarding/progress", get(get_progress))
        .route("/api/onboarding/reset", post(reset_progress))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
