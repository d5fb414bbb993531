//! Repository trait for report job records.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{ReportRecord, ReportRow};

/// Repository trait for the report collection.
///
/// A record is created in `Progress` when a run starts, grows one row
/// per processed store, and is completed exactly once. Completion never
/// reverses; completing an already complete record is a no-op.
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Create a new record in the `Progress` state.
    ///
    /// # Returns
    /// * `Err(RepositoryError::ValidationError)` - If the identifier is
    ///   already taken.
    async fn create_report(&self, report_id: &str) -> RepositoryResult<()>;

    /// Append one computed row to a record.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If the record doesn't exist.
    async fn append_report_row(&self, report_id: &str, row: ReportRow) -> RepositoryResult<()>;

    /// Flip a record to `Complete`. Idempotent.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If the record doesn't exist.
    async fn complete_report(&self, report_id: &str) -> RepositoryResult<()>;

    /// Current state of a record, regardless of completion.
    async fn get_report(&self, report_id: &str) -> RepositoryResult<Option<ReportRecord>>;
}
