use std::sync::Arc;

use crate::config::Config;
use crate::store::AtsStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Resume, rubric and opportunity storage. Postgres in production.
    pub store: Arc<dyn AtsStore>,
    pub config: Config,
}
