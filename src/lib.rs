//! A bounded-capacity ticket marketplace: producer "vendors" deposit
//! tickets into a shared pool, consumer "customers" withdraw them, and a
//! lifecycle controller governs start/stop/reset over the whole run.
//!
//! # Modules
//!
//! - [`domain`] - core value types: `Event`, `Configuration`, `Ticket`, `Transaction`
//! - [`pool`] - the `TicketPool` monitor: the producer/consumer coordination core
//! - [`lifecycle`] - the `IDLE|RUNNING|STOPPED|EXHAUSTED` state machine
//! - [`workers`] - Vendor and Customer worker tasks
//! - [`events`] - the Event Broadcaster (`system-updates` / `ticket-updates`)
//! - [`config_store`] - the Configuration Store
//! - [`transactions`] - the append-only Transaction Log
//! - [`cancellation`] - the cooperative cancellation token shared by workers
//! - [`error`] - `ApiError` and its `IntoResponse` mapping
//! - [`app_config`] - process-level configuration loaded from the environment
//! - [`logging`] - tracing bootstrap
//! - [`http`] - the axum HTTP router and handlers
//! - [`ws`] - the WebSocket event-stream transport

pub mod app_config;
pub mod cancellation;
pub mod config_store;
pub mod domain;
pub mod error;
pub mod events;
pub mod http;
pub mod lifecycle;
pub mod logging;
pub mod pool;
pub mod transactions;
pub mod workers;
pub mod ws;

pub use app_config::AppConfig;
pub use error::ApiError;
pub use http::state::AppState;
pub use lifecycle::{LifecycleController, LifecycleState};
pub use pool::TicketPool;
