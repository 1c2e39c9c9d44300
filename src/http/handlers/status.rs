//! `GET /api/system-status` and `GET /api/ticket-availability`

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

use crate::events::EventKind;
use crate::http::state::AppState;

#[derive(Debug, Serialize)]
pub struct EventSummary {
    pub name: String,
    pub price: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatusResponse {
    pub total_tickets: u32,
    pub release_rate: u32,
    pub retrieval_rate: u32,
    pub max_capacity: u32,
    pub events: Vec<EventSummary>,
}

pub async fn system_status(State(state): State<AppState>) -> Response {
    let Some(configuration) = state.config_store.get().await else {
        return (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "no configuration has been accepted" })),
        )
            .into_response();
    };

    let snapshot = state.pool.snapshot().await;
    state.broadcaster.publish_system(
        EventKind::SystemStatus,
        "System status polled",
        serde_json::json!({
            "ticketsAdded": snapshot.tickets_added,
            "currentTickets": snapshot.current_count,
            "ticketsSold": snapshot.tickets_sold,
        }),
    );

    Json(SystemStatusResponse {
        total_tickets: configuration.total_tickets,
        release_rate: configuration.release_rate,
        retrieval_rate: configuration.retrieval_rate,
        max_capacity: configuration.max_capacity,
        events: configuration
            .events
            .into_iter()
            .map(|e| EventSummary { name: e.name, price: e.price })
            .collect(),
    })
    .into_response()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketAvailabilityResponse {
    pub availability: HashMap<String, u32>,
    pub tickets_added: u32,
    pub current_tickets: u32,
    pub tickets_sold: u32,
}

/// Takes a single, internally-consistent `pool.snapshot()` so the three
/// counts in the response always agree with each other, even under
/// concurrent deposits and withdrawals.
pub async fn ticket_availability(State(state): State<AppState>) -> Json<TicketAvailabilityResponse> {
    let snapshot = state.pool.snapshot().await;
    Json(TicketAvailabilityResponse {
        availability: snapshot.per_event_counts,
        tickets_added: snapshot.tickets_added,
        current_tickets: snapshot.current_count,
        tickets_sold: snapshot.tickets_sold,
    })
}
