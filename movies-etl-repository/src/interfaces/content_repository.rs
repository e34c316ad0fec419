use async_trait::async_trait;

use crate::errors::ContentRepositoryError;
use crate::types::{InsertOutcome, SqlValue, TableSpec};

/// Abstracts the destination store of the migration.
///
/// Implementations write exactly one row per call and treat each call as an
/// independent unit of work: a successful insert is committed before
/// returning, a failed one is rolled back so the next call starts clean.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Insert a single row into `table`.
    ///
    /// `values` are positional and line up with `table.columns`.
    ///
    /// # Returns
    ///
    /// * `Ok(InsertOutcome::Inserted)` - The row was written
    /// * `Ok(InsertOutcome::AlreadyPresent)` - A row with the same id exists and the
    ///   table's conflict policy left it untouched
    /// * `Err(ContentRepositoryError)` - The row was rejected, or the store is unreachable
    async fn insert_row(
        &self,
        table: &TableSpec,
        values: &[SqlValue],
    ) -> Result<InsertOutcome, ContentRepositoryError>;
}
