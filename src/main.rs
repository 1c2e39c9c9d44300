//! Ticket marketplace entry point.
//!
//! ```text
//! ┌────────────┐    ┌──────────────┐    ┌────────────┐    ┌────────────┐
//! │ Config     │───▶│ Lifecycle    │───▶│ TicketPool │───▶│ Transaction│
//! │ Store      │    │ Controller   │    │ (vendors/  │    │ Log        │
//! │            │    │              │    │ customers) │    │            │
//! └────────────┘    └──────────────┘    └────────────┘    └────────────┘
//!                           │
//!                           ▼
//!                   Event Broadcaster ──▶ WebSocket subscribers
//! ```

use std::sync::Arc;

use ticket_market::app_config::AppConfig;
use ticket_market::http;
use ticket_market::logging;
use ticket_market::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_config = Arc::new(AppConfig::from_env());
    let _log_guard = logging::init_logging(&app_config);

    tracing::info!(
        bind = %app_config.bind_addr(),
        customer_pool_size = app_config.customer_pool_size,
        git_hash = env!("GIT_HASH"),
        "starting ticket marketplace"
    );

    let state = AppState::new(app_config.clone());
    let router = http::router(state);

    let listener = tokio::net::TcpListener::bind(app_config.bind_addr()).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, router).await?;

    Ok(())
}
