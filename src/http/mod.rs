//! HTTP router assembly: `Router::new().route(...).with_state(state)` plus
//! a CORS layer and request-id propagation.

pub mod handlers;
pub mod state;

use axum::Router;
use axum::http::HeaderName;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use state::AppState;

pub fn router(state: AppState) -> Router {
    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .route(
            "/api/system-configuration/configure",
            post(handlers::configuration::configure),
        )
        .route(
            "/api/ticket-system-control/start",
            post(handlers::control::start),
        )
        .route(
            "/api/ticket-system-control/stop",
            post(handlers::control::stop),
        )
        .route(
            "/api/ticket-system-control/reset",
            post(handlers::control::reset),
        )
        .route("/api/system-status", get(handlers::status::system_status))
        .route(
            "/api/ticket-availability",
            get(handlers::status::ticket_availability),
        )
        .route("/ws-ticket-system", get(crate::ws::upgrade))
        .route("/api/v1/health", get(handlers::health::health_check))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
