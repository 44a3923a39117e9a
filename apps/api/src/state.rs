use std::sync::Arc;

use crate::config::Config;
use crate::jobs::store::JobStore;
use crate::sorting::catalog::PageCatalog;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Source of the active job snapshot. Postgres in production.
    pub jobs: Arc<dyn JobStore>,
    /// Landing-page catalog, built once at startup.
    pub catalog: Arc<PageCatalog>,
    pub config: Config,
}
