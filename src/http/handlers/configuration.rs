//! `POST /api/system-configuration/configure`

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::domain::EventSpec;
use crate::error::ApiError;
use crate::http::state::AppState;
use crate::lifecycle::LifecycleState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigureRequest {
    pub max_capacity: u32,
    pub total_tickets: u32,
    pub release_rate: u32,
    pub retrieval_rate: u32,
    pub events: Vec<EventSpec>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigureResponse {
    pub message: String,
    pub max_capacity: u32,
    pub total_tickets: u32,
    pub release_rate: u32,
    pub retrieval_rate: u32,
    pub events: Vec<String>,
}

pub async fn configure(
    State(state): State<AppState>,
    Json(request): Json<ConfigureRequest>,
) -> Result<Json<ConfigureResponse>, ApiError> {
    let current_state = state.controller.status().await.state;
    if current_state != LifecycleState::Idle {
        return Err(ApiError::IllegalTransition(
            "configuration is immutable once accepted; reset before reconfiguring".to_string(),
        ));
    }

    let spec = crate::domain::ConfigurationSpec {
        max_capacity: request.max_capacity,
        total_tickets: request.total_tickets,
        release_rate: request.release_rate,
        retrieval_rate: request.retrieval_rate,
        events: request.events,
    };

    let configuration = state
        .config_store
        .set(spec)
        .await
        .map_err(ApiError::Validation)?;

    tracing::info!(
        max_capacity = configuration.max_capacity,
        total_tickets = configuration.total_tickets,
        "configuration accepted"
    );

    Ok(Json(ConfigureResponse {
        message: "Configuration accepted".to_string(),
        max_capacity: configuration.max_capacity,
        total_tickets: configuration.total_tickets,
        release_rate: configuration.release_rate,
        retrieval_rate: configuration.retrieval_rate,
        events: configuration.events.iter().map(|e| e.name.clone()).collect(),
    }))
}
