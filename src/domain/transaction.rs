//! `Transaction`: an append-only record of one completed ticket purchase.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Transaction {
    pub id: u64,
    pub event_name: String,
    pub price: Decimal,
    pub vendor_id: u32,
    pub customer_id: u32,
    pub ticket_count: u32,
    pub timestamp: DateTime<Utc>,
}
