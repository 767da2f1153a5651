use crate::config::ServerConfig;
use crate::store::ProductStore;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Product collection (shared across requests)
    pub store: Arc<ProductStore>,
}

impl ServerState {
    /// Create new server state with an empty product collection.
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(ProductStore::new()),
        }
    }

    /// Exact match against the configured shared secret. Empty keys are
    /// always rejected.
    pub fn is_valid_api_key(&self, key: &str) -> bool {
        !key.is_empty() && key == self.config.api_key
    }
}
