//! Vendor Worker: one async task per configured event, producing ticket
//! batches at a configured cadence.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use rust_decimal::Decimal;

use crate::cancellation::CancellationToken;
use crate::events::{Broadcaster, EventKind};
use crate::pool::TicketPool;

use super::cadence_millis;

/// Runs until `token` is cancelled, the pool stops accepting deposits, or
/// `ticketsAdded` reaches `totalTickets`.
pub async fn run(
    vendor_id: u32,
    event_name: String,
    event_price: Decimal,
    release_rate: u32,
    pool: Arc<TicketPool>,
    broadcaster: Arc<Broadcaster>,
    token: CancellationToken,
) {
    loop {
        if token.is_cancelled() {
            break;
        }

        let batch = {
            let mut rng = rand::thread_rng();
            rng.gen_range(1..=release_rate.max(1))
        };

        let outcome = pool
            .deposit(vendor_id, &event_name, event_price, batch)
            .await;

        if outcome.deposited < batch || outcome.supply_exhausted {
            break;
        }

        let sleep = tokio::time::sleep(Duration::from_millis(cadence_millis(release_rate)));
        tokio::select! {
            _ = token.cancelled() => break,
            _ = sleep => {}
        }
    }

    if token.is_cancelled() {
        broadcaster.publish_system(
            EventKind::VendorThreadInterrupt,
            format!("Vendor {vendor_id} for {event_name} interrupted"),
            serde_json::json!({ "vendorId": vendor_id, "eventName": event_name }),
        );
    }
}
