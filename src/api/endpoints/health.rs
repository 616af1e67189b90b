//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::types::AppContext;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub classes: usize,
    pub diseases: usize,
}

/// `GET /api/health` — liveness plus loaded artifact sizes.
pub async fn check(State(ctx): State<AppContext>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: crate::config::APP_VERSION,
        classes: ctx.predictor.class_count(),
        diseases: ctx.predictor.disease_count(),
    })
}
