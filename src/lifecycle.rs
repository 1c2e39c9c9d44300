//! Lifecycle Controller: the `Idle | Running | Stopped | Exhausted` state
//! machine that spawns and cancels Vendor/Customer workers, injected as a
//! shared singleton rather than a process-global.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::app_config::AppConfig;
use crate::cancellation::CancellationToken;
use crate::config_store::ConfigurationStore;
use crate::domain::Configuration;
use crate::error::ApiError;
use crate::events::{Broadcaster, EventKind};
use crate::pool::TicketPool;
use crate::transactions::TransactionLog;
use crate::workers::{customer, vendor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LifecycleState {
    Idle,
    Running,
    Stopped,
    Exhausted,
}

#[derive(Debug, Clone)]
pub struct LifecycleStatus {
    pub state: LifecycleState,
    pub configuration: Option<Configuration>,
}

pub struct LifecycleController {
    state: Mutex<LifecycleState>,
    token: Mutex<CancellationToken>,
    handles: Mutex<Vec<JoinHandle<()>>>,
    pool: Arc<TicketPool>,
    config_store: Arc<ConfigurationStore>,
    transactions: Arc<TransactionLog>,
    broadcaster: Arc<Broadcaster>,
    app_config: Arc<AppConfig>,
}

impl LifecycleController {
    pub fn new(
        pool: Arc<TicketPool>,
        config_store: Arc<ConfigurationStore>,
        transactions: Arc<TransactionLog>,
        broadcaster: Arc<Broadcaster>,
        app_config: Arc<AppConfig>,
    ) -> Self {
        Self {
            state: Mutex::new(LifecycleState::Idle),
            token: Mutex::new(CancellationToken::new()),
            handles: Mutex::new(Vec::new()),
            pool,
            config_store,
            transactions,
            broadcaster,
            app_config,
        }
    }

    pub async fn status(&self) -> LifecycleStatus {
        LifecycleStatus {
            state: *self.state.lock().await,
            configuration: self.config_store.get().await,
        }
    }

    /// `IDLE|STOPPED → RUNNING`. Requires `self` to be held behind an `Arc`
    /// so the exhaustion watcher can hold its own clone across a spawned
    /// task.
    pub async fn start(self: &Arc<Self>) -> Result<(), ApiError> {
        {
            let state = self.state.lock().await;
            match *state {
                LifecycleState::Running => {
                    return Err(ApiError::IllegalTransition("already running".into()));
                }
                LifecycleState::Exhausted => {
                    return Err(ApiError::IllegalTransition("must reset first".into()));
                }
                LifecycleState::Idle | LifecycleState::Stopped => {}
            }
        }

        let configuration = self
            .config_store
            .get()
            .await
            .ok_or_else(|| ApiError::IllegalTransition("no configuration".into()))?;

        self.transactions.clear();
        self.pool.activate(&configuration).await;

        let token = CancellationToken::new();
        *self.token.lock().await = token.clone();

        let mut handles = Vec::new();

        for (index, event) in configuration.events.iter().enumerate() {
            let vendor_id = (index + 1) as u32;
            handles.push(tokio::spawn(vendor::run(
                vendor_id,
                event.name.clone(),
                event.price,
                configuration.release_rate,
                self.pool.clone(),
                self.broadcaster.clone(),
                token.clone(),
            )));
        }

        for customer_id in 1..=self.app_config.customer_pool_size as u32 {
            handles.push(tokio::spawn(customer::run(
                customer_id,
                configuration.retrieval_rate,
                self.pool.clone(),
                self.broadcaster.clone(),
                token.clone(),
            )));
        }

        *self.handles.lock().await = handles;

        {
            let mut state = self.state.lock().await;
            *state = LifecycleState::Running;
        }

        self.broadcaster.publish_system(
            EventKind::SystemStart,
            "Ticket system started",
            serde_json::json!({
                "maxCapacity": configuration.max_capacity,
                "totalTickets": configuration.total_tickets,
                "releaseRate": configuration.release_rate,
                "retrievalRate": configuration.retrieval_rate,
            }),
        );

        let watcher_controller = self.clone();
        let watcher_token = token;
        let watcher_pool = self.pool.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = watcher_token.cancelled() => {}
                _ = watcher_pool.wait_exhausted() => {
                    watcher_controller.teardown(LifecycleState::Exhausted).await;
                }
            }
        });

        Ok(())
    }

    /// `RUNNING → STOPPED`. Idempotent: a second call returns `Ok(false)`.
    pub async fn stop(&self) -> Result<bool, ApiError> {
        Ok(self.teardown(LifecycleState::Stopped).await)
    }

    /// `RUNNING|STOPPED → IDLE`. Does not clear the stored configuration;
    /// a subsequent `start()` reuses the last accepted one.
    pub async fn reset(&self) {
        self.teardown(LifecycleState::Stopped).await;
        self.pool.clear().await;
        self.transactions.clear();
        {
            let mut state = self.state.lock().await;
            *state = LifecycleState::Idle;
        }
        self.broadcaster
            .publish_system(EventKind::SystemReset, "system reset", serde_json::json!({}));
    }

    /// Cancels workers and joins them if `state` is still `Running`,
    /// transitioning to `terminal`. A no-op (returns `false`) if another
    /// caller already moved the state out of `Running` first, guarding
    /// against an explicit `stop()` racing the internal exhaustion watcher.
    async fn teardown(&self, terminal: LifecycleState) -> bool {
        {
            let mut state = self.state.lock().await;
            if *state != LifecycleState::Running {
                return false;
            }
            *state = terminal;
        }

        let token = self.token.lock().await.clone();
        token.cancel();
        self.pool.stop().await;

        let handles = std::mem::take(&mut *self.handles.lock().await);
        for handle in handles {
            let _ = handle.await;
        }

        let snapshot = self.pool.snapshot().await;
        self.broadcaster.publish_system(
            EventKind::SystemStop,
            "Ticket system stopped",
            serde_json::json!({
                "ticketsAdded": snapshot.tickets_added,
                "ticketsSold": snapshot.tickets_sold,
            }),
        );

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EventSpec;
    use rust_decimal::Decimal;

    fn controller() -> Arc<LifecycleController> {
        let broadcaster = Arc::new(Broadcaster::new());
        let transactions = Arc::new(TransactionLog::new());
        let pool = Arc::new(TicketPool::new(transactions.clone(), broadcaster.clone()));
        let config_store = Arc::new(ConfigurationStore::new());
        let app_config = Arc::new(AppConfig::default());
        Arc::new(LifecycleController::new(
            pool,
            config_store,
            transactions,
            broadcaster,
            app_config,
        ))
    }

    async fn configure(controller: &LifecycleController, total_tickets: u32) {
        controller
            .config_store
            .set(crate::domain::ConfigurationSpec {
                max_capacity: total_tickets,
                total_tickets,
                release_rate: 4,
                retrieval_rate: 4,
                events: vec![EventSpec {
                    name: "A".into(),
                    price: Decimal::new(500, 2),
                }],
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn start_without_configuration_is_rejected() {
        let controller = controller();
        let err = controller.start().await.unwrap_err();
        assert!(matches!(err, ApiError::IllegalTransition(_)));
    }

    #[tokio::test]
    async fn start_then_start_again_is_rejected() {
        let controller = controller();
        configure(&controller, 100).await;
        controller.start().await.unwrap();
        let err = controller.start().await.unwrap_err();
        assert!(matches!(err, ApiError::IllegalTransition(_)));
        controller.stop().await.unwrap();
    }

    #[tokio::test]
    async fn stop_twice_is_idempotent() {
        let controller = controller();
        configure(&controller, 100).await;
        controller.start().await.unwrap();
        assert!(controller.stop().await.unwrap());
        assert!(!controller.stop().await.unwrap());
    }

    #[tokio::test]
    async fn reset_returns_to_idle_with_empty_pool() {
        let controller = controller();
        configure(&controller, 100).await;
        controller.start().await.unwrap();
        controller.reset().await;
        let status = controller.status().await;
        assert_eq!(status.state, LifecycleState::Idle);
        let snapshot = controller.pool.snapshot().await;
        assert_eq!(snapshot.current_count, 0);
        assert_eq!(snapshot.tickets_added, 0);
    }

    #[tokio::test]
    async fn reset_preserves_stored_configuration() {
        let controller = controller();
        configure(&controller, 50).await;
        controller.reset().await;
        assert!(controller.config_store.is_configured().await);
    }

    #[tokio::test]
    async fn runs_to_exhaustion_with_tiny_supply() {
        let controller = controller();
        configure(&controller, 4).await;
        controller.start().await.unwrap();

        for _ in 0..200 {
            if controller.status().await.state == LifecycleState::Exhausted {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        }

        let status = controller.status().await;
        assert_eq!(status.state, LifecycleState::Exhausted);
        let snapshot = controller.pool.snapshot().await;
        assert_eq!(snapshot.tickets_added, 4);
        assert_eq!(snapshot.tickets_sold, 4);
        assert_eq!(controller.transactions.len(), 4);

        let err = controller.start().await.unwrap_err();
        assert!(matches!(err, ApiError::IllegalTransition(_)));
    }
}
