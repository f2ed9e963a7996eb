// Application state module
// Shared, read-only state handed to every connection

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use super::types::Config;
use crate::store::FileStore;

/// Application state
pub struct AppState {
    pub config: Config,
    pub store: FileStore,

    // Cached config values for fast access without touching the config tree
    pub cached_access_log: Arc<AtomicBool>,
}

impl AppState {
    pub fn new(config: &Config, store: FileStore) -> Self {
        Self {
            config: config.clone(),
            store,
            cached_access_log: Arc::new(AtomicBool::new(config.logging.access_log)),
        }
    }
}
