//! Customer Worker: one of a fixed pool of async tasks consuming ticket
//! batches and driving transaction recording via [`TicketPool::withdraw`].

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;

use crate::cancellation::CancellationToken;
use crate::events::{Broadcaster, EventKind};
use crate::pool::TicketPool;

use super::cadence_millis;

/// Runs until `token` is cancelled or a withdrawal comes back empty while
/// the pool is no longer running.
pub async fn run(
    customer_id: u32,
    retrieval_rate: u32,
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
            rng.gen_range(1..=retrieval_rate.max(1))
        };

        let withdrawal = tokio::select! {
            _ = token.cancelled() => {
                broadcaster.publish_system(
                    EventKind::CustomerPurchaseInterrupt,
                    format!("Customer {customer_id} interrupted"),
                    serde_json::json!({ "customerId": customer_id }),
                );
                break;
            }
            withdrawal = pool.withdraw(customer_id, batch) => withdrawal,
        };

        if withdrawal.purchased == 0 && !pool.is_running() {
            break;
        }

        let sleep = tokio::time::sleep(Duration::from_millis(cadence_millis(retrieval_rate)));
        tokio::select! {
            _ = token.cancelled() => break,
            _ = sleep => {}
        }
    }
}
