//! `POST /api/ticket-system-control/{start,stop,reset}`

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::state::AppState;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

fn message(text: impl Into<String>) -> Json<MessageResponse> {
    Json(MessageResponse { message: text.into() })
}

pub async fn start(State(state): State<AppState>) -> Result<Json<MessageResponse>, ApiError> {
    state.controller.start().await?;
    Ok(message("Ticket system started"))
}

pub async fn stop(State(state): State<AppState>) -> Result<Json<MessageResponse>, ApiError> {
    if state.controller.stop().await? {
        Ok(message("Ticket system stopped"))
    } else {
        Err(ApiError::IllegalTransition("not running".to_string()))
    }
}

pub async fn reset(State(state): State<AppState>) -> Json<MessageResponse> {
    state.controller.reset().await;
    message("Ticket system reset")
}
