//! Domain types: the nouns of the ticket marketplace, independent of how
//! they are transported (HTTP) or stored (transaction log).

pub mod configuration;
pub mod event;
pub mod ticket;
pub mod transaction;

pub use configuration::{Configuration, ConfigurationSpec, ValidationDetail};
pub use event::{Event, EventSpec};
pub use ticket::Ticket;
pub use transaction::Transaction;
