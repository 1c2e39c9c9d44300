//! The `/ws-ticket-system` event-stream transport.

mod handler;

pub use handler::upgrade;
