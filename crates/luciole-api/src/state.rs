//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use luciole_core::config::AppConfig;
use luciole_core::traits::SubscriptionStore;
use luciole_push::DispatchCoordinator;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Subscription persistence.
    pub store: Arc<dyn SubscriptionStore>,
    /// Fan-out delivery coordinator.
    pub dispatcher: Arc<DispatchCoordinator>,
}

impl AppState {
    /// Create state over a store and a pre-wired dispatcher.
    pub fn new(
        config: Arc<AppConfig>,
        store: Arc<dyn SubscriptionStore>,
        dispatcher: Arc<DispatchCoordinator>,
    ) -> Self {
        Self {
            config,
            store,
            dispatcher,
        }
    }
}
