//! `Ticket`: an immutable value produced by a vendor and consumed by exactly
//! one customer.

use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub event_name: String,
    pub price: Decimal,
    pub vendor_id: u32,
}

impl Ticket {
    pub fn new(event_name: impl Into<String>, price: Decimal, vendor_id: u32) -> Self {
        Self {
            event_name: event_name.into(),
            price,
            vendor_id,
        }
    }
}
