//! The `TicketPool`: a thread-safe (task-safe) bounded buffer between
//! vendors and customers.
//!
//! Modeled as a single monitor: one `tokio::sync::Mutex<PoolState>` guards
//! the ticket deque and every counter, and a `tokio::sync::Semaphore` acts
//! as the availability signal for blocking withdrawals, supporting many
//! producers and many consumers with partial-batch semantics.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use rust_decimal::Decimal;
use tokio::sync::{Mutex, Notify, Semaphore};

use crate::domain::{Configuration, Ticket, Transaction};
use crate::events::{Broadcaster, EventKind};
use crate::transactions::TransactionLog;

/// Consistent, point-in-time view returned by [`TicketPool::snapshot`].
#[derive(Debug, Clone)]
pub struct PoolSnapshot {
    pub per_event_counts: HashMap<String, u32>,
    pub tickets_added: u32,
    pub current_count: u32,
    pub tickets_sold: u32,
}

struct PoolState {
    tickets: VecDeque<Ticket>,
    tickets_added: u32,
    tickets_sold: u32,
    total_tickets: u32,
    max_capacity: u32,
    running: bool,
    stopped: bool,
    all_tickets_sold: bool,
}

impl PoolState {
    fn empty() -> Self {
        Self {
            tickets: VecDeque::new(),
            tickets_added: 0,
            tickets_sold: 0,
            total_tickets: 0,
            max_capacity: 0,
            running: false,
            stopped: false,
            all_tickets_sold: false,
        }
    }

    fn current_count(&self) -> u32 {
        self.tickets.len() as u32
    }
}

pub struct TicketPool {
    state: Mutex<PoolState>,
    available: Semaphore,
    waiters: AtomicUsize,
    running_flag: AtomicBool,
    exhausted_notify: Notify,
    transactions: Arc<TransactionLog>,
    broadcaster: Arc<Broadcaster>,
}

/// Keeps `waiters` accurate even if the future awaiting a permit is dropped
/// mid-wait (e.g. a `tokio::select!` cancellation branch winning the race),
/// not just on the normal fall-through path.
struct WaiterGuard<'a> {
    waiters: &'a AtomicUsize,
}

impl<'a> WaiterGuard<'a> {
    fn new(waiters: &'a AtomicUsize) -> Self {
        waiters.fetch_add(1, Ordering::SeqCst);
        Self { waiters }
    }
}

impl Drop for WaiterGuard<'_> {
    fn drop(&mut self) {
        self.waiters.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Result of a deposit: how many tickets were actually added, and whether
/// that deposit used up the last remaining room under `totalTickets`.
#[derive(Debug, Clone, Copy)]
pub struct DepositOutcome {
    pub deposited: u32,
    pub supply_exhausted: bool,
}

/// Result of a successful or partial withdrawal.
#[derive(Debug, Clone)]
pub struct Withdrawal {
    pub purchased: u32,
    pub event_names: HashSet<String>,
    pub total_price: Decimal,
}

impl Withdrawal {
    fn empty() -> Self {
        Self {
            purchased: 0,
            event_names: HashSet::new(),
            total_price: Decimal::ZERO,
        }
    }
}

impl TicketPool {
    pub fn new(transactions: Arc<TransactionLog>, broadcaster: Arc<Broadcaster>) -> Self {
        Self {
            state: Mutex::new(PoolState::empty()),
            available: Semaphore::new(0),
            waiters: AtomicUsize::new(0),
            running_flag: AtomicBool::new(false),
            exhausted_notify: Notify::new(),
            transactions,
            broadcaster,
        }
    }

    /// Prepares the pool for a fresh run under `configuration`. Must only be
    /// called from an already-clear state (see [`Self::clear`]).
    pub async fn activate(&self, configuration: &Configuration) {
        let mut state = self.state.lock().await;
        state.total_tickets = configuration.total_tickets;
        state.max_capacity = configuration.max_capacity;
        state.running = true;
        state.stopped = false;
        state.all_tickets_sold = false;
        self.running_flag.store(true, Ordering::SeqCst);
    }

    /// Deposits up to `requested_batch` tickets, clamped to remaining room
    /// under `totalTickets`.
    pub async fn deposit(
        &self,
        vendor_id: u32,
        event_name: &str,
        unit_price: Decimal,
        requested_batch: u32,
    ) -> DepositOutcome {
        let mut state = self.state.lock().await;
        let room = state.total_tickets.saturating_sub(state.tickets_added);
        let take = requested_batch.min(room);
        if take == 0 {
            return DepositOutcome {
                deposited: 0,
                supply_exhausted: room == 0,
            };
        }

        for _ in 0..take {
            state.tickets.push_back(Ticket::new(event_name, unit_price, vendor_id));
        }
        state.tickets_added += take;
        let current_count = state.current_count();
        let supply_exhausted = state.tickets_added >= state.total_tickets;

        self.available.add_permits(take as usize);

        self.broadcaster.publish_ticket(
            EventKind::VendorTicketAdd,
            format!("Vendor {vendor_id} deposited {take} ticket(s) for {event_name}"),
            serde_json::json!({
                "vendorId": vendor_id,
                "eventName": event_name,
                "deposited": take,
                "currentCount": current_count,
            }),
        );

        DepositOutcome {
            deposited: take,
            supply_exhausted,
        }
    }

    /// Blocks until at least one ticket is available or the pool leaves the
    /// running state, then removes up to `requested_batch` tickets in FIFO
    /// order and records one [`Transaction`] per ticket.
    pub async fn withdraw(&self, customer_id: u32, requested_batch: u32) -> Withdrawal {
        if requested_batch == 0 {
            return Withdrawal::empty();
        }
        if !self.running_flag.load(Ordering::SeqCst) {
            return Withdrawal::empty();
        }

        let waiter_guard = WaiterGuard::new(&self.waiters);
        let permit = self.available.acquire().await;
        drop(waiter_guard);
        let Ok(permit) = permit else {
            // Semaphore closed: treated like a stop signal.
            return Withdrawal::empty();
        };
        permit.forget();

        let mut state = self.state.lock().await;
        if state.stopped || state.tickets.is_empty() {
            return Withdrawal::empty();
        }

        let take = requested_batch.min(state.current_count());
        if take > 1 {
            // The other `take - 1` tickets already have permits reserved
            // for them from their original deposit; claim those too so the
            // semaphore's permit count keeps tracking `currentCount`.
            if let Ok(extra) = self.available.try_acquire_many(take - 1) {
                extra.forget();
            }
        }

        let mut event_names = HashSet::new();
        let mut total_price = Decimal::ZERO;
        let mut records = Vec::with_capacity(take as usize);
        let now = chrono::Utc::now();

        for _ in 0..take {
            let ticket = state
                .tickets
                .pop_front()
                .expect("take was clamped to current_count");
            total_price += ticket.price;
            event_names.insert(ticket.event_name.clone());
            records.push(Transaction {
                id: 0, // assigned by the transaction log on append
                event_name: ticket.event_name,
                price: ticket.price,
                vendor_id: ticket.vendor_id,
                customer_id,
                ticket_count: 1,
                timestamp: now,
            });
        }

        state.tickets_sold += take;
        let current_count = state.current_count();

        let just_exhausted =
            state.tickets_sold == state.total_tickets && state.tickets.is_empty();
        if just_exhausted {
            state.all_tickets_sold = true;
            state.running = false;
            state.stopped = true;
            self.running_flag.store(false, Ordering::SeqCst);
            self.exhausted_notify.notify_waiters();
        }

        self.broadcaster.publish_ticket(
            EventKind::TicketPurchase,
            format!("Customer {customer_id} purchased {take} ticket(s)"),
            serde_json::json!({
                "customerId": customer_id,
                "purchased": take,
                "currentCount": current_count,
                "ticketsSold": state.tickets_sold,
            }),
        );

        drop(state);
        self.transactions.append_all(records);

        Withdrawal {
            purchased: take,
            event_names,
            total_price,
        }
    }

    /// Whether the most recent withdrawal exhausted the configured supply.
    pub async fn is_exhausted(&self) -> bool {
        self.state.lock().await.all_tickets_sold
    }

    /// Cheap, lock-free check of whether the pool is currently running,
    /// the same gate `withdraw` uses to decide whether to keep a customer
    /// worker's loop alive.
    pub fn is_running(&self) -> bool {
        self.running_flag.load(Ordering::SeqCst)
    }

    /// Resolves once [`Self::is_exhausted`] becomes true. Race-safe against
    /// a `notify_waiters()` that fires between the check and the await,
    /// mirroring [`crate::cancellation::CancellationToken::cancelled`].
    pub async fn wait_exhausted(&self) {
        loop {
            if self.is_exhausted().await {
                return;
            }
            let notified = self.exhausted_notify.notified();
            if self.is_exhausted().await {
                return;
            }
            notified.await;
        }
    }

    /// Stops the pool: marks it not-running, wakes every blocked consumer so
    /// it observes the stop and returns, without handing out any more real
    /// tickets.
    pub async fn stop(&self) {
        let mut state = self.state.lock().await;
        state.running = false;
        state.stopped = true;
        self.running_flag.store(false, Ordering::SeqCst);
        let blocked = self.waiters.load(Ordering::SeqCst);
        if blocked > 0 {
            self.available.add_permits(blocked);
        }
    }

    /// Consistent point-in-time view of the pool.
    pub async fn snapshot(&self) -> PoolSnapshot {
        let state = self.state.lock().await;
        let mut per_event_counts = HashMap::new();
        for ticket in &state.tickets {
            *per_event_counts.entry(ticket.event_name.clone()).or_insert(0) += 1;
        }
        PoolSnapshot {
            per_event_counts,
            tickets_added: state.tickets_added,
            current_count: state.current_count(),
            tickets_sold: state.tickets_sold,
        }
    }

    /// Drops all tickets, zeroes counters, resets flags. Valid only from the
    /// lifecycle controller's `reset()`.
    pub async fn clear(&self) {
        let mut state = self.state.lock().await;
        *state = PoolState::empty();
        self.running_flag.store(false, Ordering::SeqCst);
        // Drain any permits left over from a run that never got consumed.
        self.available.forget_permits(usize::MAX);
        self.waiters.store(0, Ordering::SeqCst);
    }
}
