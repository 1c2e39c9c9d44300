//! Shared application state injected into every handler: a plain struct of
//! `Arc`-wrapped singletons passed via `Router::with_state`, rather than
//! process globals.

use std::sync::Arc;
use std::time::Instant;

use crate::app_config::AppConfig;
use crate::config_store::ConfigurationStore;
use crate::events::Broadcaster;
use crate::lifecycle::LifecycleController;
use crate::pool::TicketPool;
use crate::transactions::TransactionLog;

#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<LifecycleController>,
    pub config_store: Arc<ConfigurationStore>,
    pub pool: Arc<TicketPool>,
    pub transactions: Arc<TransactionLog>,
    pub broadcaster: Arc<Broadcaster>,
    pub app_config: Arc<AppConfig>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(app_config: Arc<AppConfig>) -> Self {
        let broadcaster = Arc::new(Broadcaster::new());
        let transactions = Arc::new(TransactionLog::new());
        let pool = Arc::new(TicketPool::new(transactions.clone(), broadcaster.clone()));
        let config_store = Arc::new(ConfigurationStore::new());
        let controller = Arc::new(LifecycleController::new(
            pool.clone(),
            config_store.clone(),
            transactions.clone(),
            broadcaster.clone(),
            app_config.clone(),
        ));

        Self {
            controller,
            config_store,
            pool,
            transactions,
            broadcaster,
            app_config,
            started_at: Instant::now(),
        }
    }
}
