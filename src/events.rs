//! Event Broadcaster: fan-out of domain events to WebSocket subscribers.
//!
//! Two topics (`system-updates`, `ticket-updates`) backed by
//! `tokio::sync::broadcast`, one channel per topic since every subscriber
//! on a topic gets the same message.

use serde::Serialize;
use serde_json::Value;
use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    SystemStart,
    SystemStop,
    SystemReset,
    SystemStatus,
    VendorTicketAdd,
    TicketPurchase,
    VendorThreadInterrupt,
    CustomerPurchaseInterrupt,
}

/// Wire envelope for every broadcast message: `{ type, message, details, timestamp }`.
#[derive(Debug, Clone, Serialize)]
pub struct EventMessage {
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub message: String,
    pub details: Value,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Which topic a subscriber wants to receive. `Both` is used by a client
/// that never sends a `{"subscribe": ...}` frame and gets the default feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    System,
    Ticket,
    Both,
}

pub struct Broadcaster {
    system: broadcast::Sender<EventMessage>,
    ticket: broadcast::Sender<EventMessage>,
}

impl Broadcaster {
    pub fn new() -> Self {
        let (system, _) = broadcast::channel(CHANNEL_CAPACITY);
        let (ticket, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { system, ticket }
    }

    /// Best-effort publish to `system-updates`. Never blocks or errors the
    /// caller: with no subscribers, `send` returning `Err` is ignored, and a
    /// lagging subscriber simply misses messages (`RecvError::Lagged`) on
    /// its next `recv`.
    pub fn publish_system(&self, kind: EventKind, message: impl Into<String>, details: Value) {
        let _ = self.system.send(EventMessage {
            kind,
            message: message.into(),
            details,
            timestamp: chrono::Utc::now(),
        });
    }

    /// Same as [`Self::publish_system`] but on the `ticket-updates` topic.
    pub fn publish_ticket(&self, kind: EventKind, message: impl Into<String>, details: Value) {
        let _ = self.ticket.send(EventMessage {
            kind,
            message: message.into(),
            details,
            timestamp: chrono::Utc::now(),
        });
    }

    pub fn subscribe_system(&self) -> broadcast::Receiver<EventMessage> {
        self.system.subscribe()
    }

    pub fn subscribe_ticket(&self) -> broadcast::Receiver<EventMessage> {
        self.ticket.subscribe()
    }
}

impl Default for Broadcaster {
    fn default() -> Self {
        Self::new()
    }
}
