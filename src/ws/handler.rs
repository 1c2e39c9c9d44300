//! WebSocket upgrade handler for `/ws-ticket-system`: split sink/stream,
//! one `tokio::select!` loop subscribing directly against the two
//! [`crate::events::Broadcaster`] topics and exiting on whichever side
//! finishes first.

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use futures::stream::SplitSink;
use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::events::EventMessage;
use crate::http::state::AppState;

pub async fn upgrade(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Topic {
    System,
    Ticket,
    Both,
}

#[derive(Debug, Deserialize)]
struct SubscribeFrame {
    subscribe: String,
}

#[derive(Debug, Serialize)]
struct SubscribedAck {
    subscribed: String,
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();
    let mut topic = Topic::Both;
    let mut system_rx = state.broadcaster.subscribe_system();
    let mut ticket_rx = state.broadcaster.subscribe_ticket();

    loop {
        tokio::select! {
            incoming = receiver.next() => {
                match incoming {
                    Some(Ok(Message::Text(text))) => {
                        if let Ok(frame) = serde_json::from_str::<SubscribeFrame>(&text) {
                            topic = match frame.subscribe.as_str() {
                                "system-updates" => Topic::System,
                                "ticket-updates" => Topic::Ticket,
                                _ => Topic::Both,
                            };
                            let ack = SubscribedAck { subscribed: frame.subscribe };
                            if let Ok(json) = serde_json::to_string(&ack)
                                && sender.send(Message::Text(json.into())).await.is_err()
                            {
                                break;
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(_)) => break,
                    _ => {}
                }
            }
            event = system_rx.recv(), if matches!(topic, Topic::System | Topic::Both) => {
                if !forward(&mut sender, event).await { break; }
            }
            event = ticket_rx.recv(), if matches!(topic, Topic::Ticket | Topic::Both) => {
                if !forward(&mut sender, event).await { break; }
            }
        }
    }
}

/// Forwards a broadcast result to the socket. Returns `false` when the
/// connection should close. Best-effort delivery: a lagged receiver just
/// skips ahead, so a slow subscriber misses messages rather than stalling
/// the connection.
async fn forward(
    sender: &mut SplitSink<WebSocket, Message>,
    event: Result<EventMessage, broadcast::error::RecvError>,
) -> bool {
    match event {
        Ok(message) => match serde_json::to_string(&message) {
            Ok(json) => sender.send(Message::Text(json.into())).await.is_ok(),
            Err(_) => true,
        },
        Err(broadcast::error::RecvError::Lagged(_)) => true,
        Err(broadcast::error::RecvError::Closed) => false,
    }
}
