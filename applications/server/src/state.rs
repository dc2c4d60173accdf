/// Shared application state
use crate::config::ApiSettings;
use roster_core::UserStore;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub api: ApiSettings,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>, api: ApiSettings) -> Self {
        Self { store, api }
    }
}
