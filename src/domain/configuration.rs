//! Configuration: the tunables for a run. Immutable once accepted; changing
//! it requires a reset (see [`crate::lifecycle`]).

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::event::{Event, EventSpec};

/// One field-level validation failure, shaped for the HTTP 400 body
/// `{ error, details: [{field, message}] }`.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationDetail {
    pub field: String,
    pub message: String,
}

impl ValidationDetail {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Wire shape for `POST /api/system-configuration/configure`.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigurationSpec {
    pub max_capacity: u32,
    pub total_tickets: u32,
    pub release_rate: u32,
    pub retrieval_rate: u32,
    pub events: Vec<EventSpec>,
}

/// Accepted, validated configuration. Immutable for the lifetime of a run.
#[derive(Debug, Clone, Serialize)]
pub struct Configuration {
    pub max_capacity: u32,
    pub total_tickets: u32,
    pub release_rate: u32,
    pub retrieval_rate: u32,
    pub events: Vec<Event>,
}

impl ConfigurationSpec {
    /// Validates every field and cross-field rule, returning every
    /// violation found rather than just the first, so a client can fix a
    /// request in one round trip.
    pub fn validate(&self) -> Result<(), Vec<ValidationDetail>> {
        let mut errors = Vec::new();

        if self.max_capacity == 0 {
            errors.push(ValidationDetail::new(
                "maxCapacity",
                "maxCapacity must be greater than zero",
            ));
        }

        if self.total_tickets == 0 {
            errors.push(ValidationDetail::new(
                "totalTickets",
                "totalTickets must be greater than zero",
            ));
        } else if self.max_capacity > 0 && self.total_tickets > self.max_capacity {
            errors.push(ValidationDetail::new(
                "tickets",
                "totalTickets must not exceed maxCapacity",
            ));
        }

        if self.release_rate == 0 {
            errors.push(ValidationDetail::new(
                "releaseRate",
                "releaseRate must be at least 1",
            ));
        }

        if self.retrieval_rate == 0 {
            errors.push(ValidationDetail::new(
                "retrievalRate",
                "retrievalRate must be at least 1",
            ));
        }

        if self.events.is_empty() {
            errors.push(ValidationDetail::new(
                "events",
                "At least one event is required",
            ));
        }

        let mut seen = HashSet::new();
        for (i, ev) in self.events.iter().enumerate() {
            if let Err(field_errors) = ev.validate() {
                for message in field_errors
                    .field_errors()
                    .values()
                    .flatten()
                    .filter_map(|e| e.message.as_ref())
                {
                    errors.push(ValidationDetail::new(format!("events[{i}].name"), message.to_string()));
                }
            }
            if let Err(message) = ev.validate_price() {
                errors.push(ValidationDetail::new(format!("events[{i}].price"), message));
            }
            if !seen.insert(ev.name.clone()) {
                errors.push(ValidationDetail::new(
                    format!("events[{i}].name"),
                    "Duplicate event names",
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn into_configuration(self) -> Configuration {
        Configuration {
            max_capacity: self.max_capacity,
            total_tickets: self.total_tickets,
            release_rate: self.release_rate,
            retrieval_rate: self.retrieval_rate,
            events: self.events.into_iter().map(EventSpec::into_event).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn spec(events: Vec<(&str, &str)>) -> ConfigurationSpec {
        ConfigurationSpec {
            max_capacity: 10,
            total_tickets: 10,
            release_rate: 2,
            retrieval_rate: 2,
            events: events
                .into_iter()
                .map(|(name, price)| EventSpec {
                    name: name.to_string(),
                    price: price.parse().unwrap(),
                })
                .collect(),
        }
    }

    #[test]
    fn accepts_minimal_valid_configuration() {
        assert!(spec(vec![("A", "5.0")]).validate().is_ok());
    }

    #[test]
    fn rejects_duplicate_event_names() {
        let errors = spec(vec![("A", "5.0"), ("A", "7.5")])
            .validate()
            .unwrap_err();
        assert!(
            errors
                .iter()
                .any(|e| e.field == "events[1].name" && e.message == "Duplicate event names")
        );
    }

    #[test]
    fn rejects_total_tickets_over_capacity() {
        let mut cfg = spec(vec![("A", "5.0")]);
        cfg.total_tickets = 20;
        let errors = cfg.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.field == "tickets"));
    }

    #[test]
    fn rejects_zero_price_event() {
        let cfg = spec(vec![("A", "0")]);
        let errors = cfg.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.field == "events[0].price"));
    }

    #[test]
    fn into_configuration_preserves_event_order() {
        let cfg = spec(vec![("A", "5.0"), ("B", "7.5")])
            .into_configuration();
        assert_eq!(cfg.events[0].name, "A");
        assert_eq!(cfg.events[1].name, "B");
        let _ = Decimal::new(0, 0);
    }
}
