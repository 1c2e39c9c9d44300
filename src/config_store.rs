//! Configuration Store: the last accepted, validated [`Configuration`].
//!
//! Guarded by a `tokio::sync::RwLock` so status reads (`GET /api/system-status`)
//! never contend with each other, only with the rare write. Validation always
//! happens before a write lands: an invalid configuration never replaces a
//! valid one already in place.

use tokio::sync::RwLock;

use crate::domain::{Configuration, ConfigurationSpec, ValidationDetail};

pub struct ConfigurationStore {
    current: RwLock<Option<Configuration>>,
}

impl ConfigurationStore {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(None),
        }
    }

    /// Validates `spec` and, only if it passes, replaces the stored
    /// configuration. On failure the previous configuration (if any) is
    /// left untouched.
    pub async fn set(&self, spec: ConfigurationSpec) -> Result<Configuration, Vec<ValidationDetail>> {
        spec.validate()?;
        let configuration = spec.into_configuration();
        *self.current.write().await = Some(configuration.clone());
        Ok(configuration)
    }

    pub async fn get(&self) -> Option<Configuration> {
        self.current.read().await.clone()
    }

    /// A `reset()` does **not** clear the stored configuration. `start()`
    /// after a bare reset reuses the last accepted configuration.
    pub async fn is_configured(&self) -> bool {
        self.current.read().await.is_some()
    }
}

impl Default for ConfigurationStore {
    fn default() -> Self {
        Self::new()
    }
}
