//! Process-level configuration, loaded once at startup from the
//! environment.

use std::env;
use std::path::PathBuf;

/// Default customer worker-pool size, kept as a named default, overridable via
/// `TICKET_MARKET_CUSTOMER_POOL_SIZE`.
pub const DEFAULT_CUSTOMER_POOL_SIZE: usize = 20;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub log_dir: PathBuf,
    pub log_file_prefix: String,
    pub log_rotation: String,
    pub log_level: String,
    pub log_json: bool,
    pub customer_pool_size: usize,
}

impl AppConfig {
    /// Reads `TICKET_MARKET_*` environment variables, falling back to
    /// sensible development defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        Self {
            host: env::var("TICKET_MARKET_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("TICKET_MARKET_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
            log_dir: env::var("TICKET_MARKET_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("logs")),
            log_file_prefix: env::var("TICKET_MARKET_LOG_FILE")
                .unwrap_or_else(|_| "ticket_market".to_string()),
            log_rotation: env::var("TICKET_MARKET_LOG_ROTATION")
                .unwrap_or_else(|_| "daily".to_string()),
            log_level: env::var("TICKET_MARKET_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            log_json: env::var("TICKET_MARKET_LOG_JSON")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            customer_pool_size: env::var("TICKET_MARKET_CUSTOMER_POOL_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CUSTOMER_POOL_SIZE),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_dir: PathBuf::from("logs"),
            log_file_prefix: "ticket_market".to_string(),
            log_rotation: "daily".to_string(),
            log_level: "info".to_string(),
            log_json: false,
            customer_pool_size: DEFAULT_CUSTOMER_POOL_SIZE,
        }
    }
}
