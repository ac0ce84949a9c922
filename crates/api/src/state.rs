use std::sync::Arc;

use onboarding_core::{Catalog, ProgressTracker};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable; all inner data is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Immutable tutorial catalog, loaded once at startup.
    pub catalog: Arc<Catalog>,
    /// In-memory per-user progress store.
    pub tracker: Arc<ProgressTracker>,
}

impl AppState {
    /// Wire up the state graph: the tracker shares the catalog so the
    /// training-complete gate always sees the catalog served to clients.
    pub fn new(config: ServerConfig, catalog: Catalog) -> Self {
        let catalog = Arc::new(catalog);
        let tracker = Arc::new(ProgressTracker::new(Arc::clone(&catalog)));

        Self {
            config: Arc::new(config),
            catalog,
            tracker,
        }
    }
}
