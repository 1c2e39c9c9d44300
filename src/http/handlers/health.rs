//! `GET /api/v1/health`: liveness probe. This build has no external
//! dependency to ping, so it reports uptime and build identity only.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::http::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub uptime_seconds: u64,
    pub git_hash: &'static str,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        uptime_seconds: state.started_at.elapsed().as_secs(),
        git_hash: env!("GIT_HASH"),
    })
}
