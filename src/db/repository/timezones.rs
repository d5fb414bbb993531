//! Repository trait for store timezone assignments.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::StoreTimezone;

/// Repository trait for the per-store timezone collection.
///
/// Missing assignments are expected (the caller falls back to the
/// default zone), so lookups return `Option` rather than erroring.
#[async_trait]
pub trait TimezoneRepository: Send + Sync {
    /// IANA zone name assigned to a store, if any.
    async fn timezone_for_store(&self, store_id: &str) -> RepositoryResult<Option<String>>;

    /// Number of stored assignments.
    async fn timezone_count(&self) -> RepositoryResult<usize>;

    /// Append a batch of assignments (seed loading).
    async fn insert_timezones(&self, timezones: Vec<StoreTimezone>) -> RepositoryResult<()>;
}
