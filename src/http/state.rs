//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::FullRepository;
use crate::models::time::ReportClock;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for storage operations
    pub repository: Arc<dyn FullRepository>,
    /// Reference clock for report windows
    pub clock: ReportClock,
}

impl AppState {
    /// Create a new application state with the given repository and clock.
    pub fn new(repository: Arc<dyn FullRepository>, clock: ReportClock) -> Self {
        Self { repository, clock }
    }
}
