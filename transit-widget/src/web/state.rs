//! State shared by every handler.

use std::sync::Arc;

use crate::backend::TransitBackend;
use crate::widget::ConfigStore;

/// Collaborators for the pipeline plus the configuration store.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<TransitBackend>,
    pub store: Arc<ConfigStore>,
}

impl AppState {
    pub fn new(backend: TransitBackend, store: ConfigStore) -> Self {
        Self {
            backend: Arc::new(backend),
            store: Arc::new(store),
        }
    }
}
