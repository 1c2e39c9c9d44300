//! Append-only in-memory transaction log.
//!
//! A narrow, fast synchronous critical section guarded by a plain
//! `std::sync::Mutex`, keeping the append path off the async executor's
//! cooperative scheduling entirely. There is no `.await` anywhere between
//! taking the lock and releasing it.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::Transaction;

/// Decouples the in-memory log from persistence, so a durable append-only
/// store could be substituted without touching [`crate::pool::TicketPool`].
/// Only the in-memory side is implemented here; a durable store is
/// explicitly out of scope.
pub trait TransactionSink: Send + Sync {
    fn record(&self, transaction: Transaction);
}

pub struct TransactionLog {
    next_id: AtomicU64,
    records: Mutex<Vec<Transaction>>,
}

impl TransactionLog {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            records: Mutex::new(Vec::new()),
        }
    }

    /// Appends one record per completed ticket in a withdrawal, assigning
    /// each a fresh id from the shared counter.
    pub fn append_all(&self, mut transactions: Vec<Transaction>) {
        if transactions.is_empty() {
            return;
        }
        let mut records = self.records.lock().expect("transaction log poisoned");
        for tx in &mut transactions {
            tx.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        }
        records.extend(transactions);
    }

    pub fn len(&self) -> usize {
        self.records.lock().expect("transaction log poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn all(&self) -> Vec<Transaction> {
        self.records.lock().expect("transaction log poisoned").clone()
    }

    /// Resets the log and its identity counter together, so the pool's
    /// `currentCount == ticketsAdded - ticketsSold` invariant holds across
    /// a reset.
    pub fn clear(&self) {
        let mut records = self.records.lock().expect("transaction log poisoned");
        records.clear();
        self.next_id.store(1, Ordering::SeqCst);
    }
}

impl Default for TransactionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionSink for TransactionLog {
    fn record(&self, transaction: Transaction) {
        self.append_all(vec![transaction]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn tx() -> Transaction {
        Transaction {
            id: 0,
            event_name: "A".into(),
            price: Decimal::new(500, 2),
            vendor_id: 1,
            customer_id: 1,
            ticket_count: 1,
            timestamp: chrono::Utc::now(),
        }
    }

    #[test]
    fn append_all_assigns_increasing_ids() {
        let log = TransactionLog::new();
        log.append_all(vec![tx(), tx(), tx()]);
        let all = log.all();
        assert_eq!(all.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn clear_resets_log_and_counter() {
        let log = TransactionLog::new();
        log.append_all(vec![tx()]);
        log.clear();
        assert!(log.is_empty());
        log.append_all(vec![tx()]);
        assert_eq!(log.all()[0].id, 1);
    }
}
