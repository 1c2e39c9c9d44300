//! Domain `Event`: the thing tickets are sold for (a concert, a match, ...).
//!
//! Not to be confused with the broadcaster's `EventMessage` in [`crate::events`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A sellable event, created during configuration and immutable for the run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
}

/// Wire shape accepted in a configuration request body, validated before
/// being promoted to a domain [`Event`].
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EventSpec {
    #[validate(length(min = 1, message = "Event name must not be empty"))]
    pub name: String,
    pub price: Decimal,
}

impl EventSpec {
    /// Business rule beyond what `validator` derives can express directly:
    /// price must be strictly positive.
    pub fn validate_price(&self) -> Result<(), &'static str> {
        if self.price <= Decimal::ZERO {
            Err("Event price must be greater than zero")
        } else {
            Ok(())
        }
    }

    pub fn into_event(self) -> Event {
        Event {
            id: Uuid::new_v4(),
            name: self.name,
            price: self.price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_price() {
        let spec = EventSpec {
            name: "A".into(),
            price: Decimal::ZERO,
        };
        assert!(spec.validate_price().is_err());
    }

    #[test]
    fn accepts_positive_price() {
        let spec = EventSpec {
            name: "A".into(),
            price: Decimal::new(500, 2),
        };
        assert!(spec.validate_price().is_ok());
    }
}
