//! Health check endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use super::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub participants: Vec<&'static str>,
}

/// GET /health — returns service status and the stores enrolled in
/// transactions.
pub async fn check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        participants: state.booking_service.transactions().participant_names(),
    })
}
