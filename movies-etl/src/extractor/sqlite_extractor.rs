use async_stream::try_stream;
use futures::{Stream, TryStreamExt};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::errors::ExtractError;
use crate::extractor::records::{query_error, select_statement, SourceRecord};

/// Batch size used when none is configured.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Reads catalog tables from a SQLite source in fixed-size batches.
///
/// The extractor never writes to the source.
pub struct SqliteExtractor {
    pool: SqlitePool,
    batch_size: usize,
}

impl SqliteExtractor {
    /// Create an extractor over `pool`.
    ///
    /// Fails fast with `ExtractError::EmptySource` when the source exposes no
    /// tables, which usually means the wrong file was opened.
    pub async fn new(pool: SqlitePool, batch_size: usize) -> Result<Self, ExtractError> {
        if batch_size == 0 {
            return Err(ExtractError::InvalidBatchSize);
        }

        let extractor = Self { pool, batch_size };
        extractor.check_tables().await?;
        Ok(extractor)
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    async fn check_tables(&self) -> Result<(), ExtractError> {
        let tables: Vec<String> =
            sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type = 'table'")
                .fetch_all(&self.pool)
                .await?;

        debug!(tables = ?tables, "Tables in the source database");

        if tables.is_empty() {
            return Err(ExtractError::EmptySource);
        }
        Ok(())
    }

    /// Stream the records of `R`'s table in batches of `batch_size`.
    ///
    /// Rows come in the order the source returns them. Every batch is full
    /// except possibly the last one; an empty table yields no batch. The
    /// stream reads lazily and cannot be restarted.
    pub fn batches<R: SourceRecord>(
        &self,
    ) -> impl Stream<Item = Result<Vec<R>, ExtractError>> + '_ {
        let batch_size = self.batch_size;
        let pool = &self.pool;

        try_stream! {
            let statement = select_statement::<R>();
            debug!(table = R::KIND.table_name(), "Executing source query");

            let mut rows = sqlx::query(&statement).fetch(pool);
            let mut batch = Vec::with_capacity(batch_size);

            while let Some(row) = rows.try_next().await.map_err(query_error::<R>)? {
                batch.push(R::from_row(&row)?);
                if batch.len() == batch_size {
                    yield std::mem::replace(&mut batch, Vec::with_capacity(batch_size));
                }
            }

            if !batch.is_empty() {
                yield batch;
            }
        }
    }

    /// Drain every batch of `R` into one ordered collection.
    pub async fn collect_all<R: SourceRecord>(&self) -> Result<Vec<R>, ExtractError> {
        let mut batches = std::pin::pin!(self.batches::<R>());
        let mut records = Vec::new();
        let mut batch_count = 0usize;

        while let Some(batch) = batches.try_next().await? {
            batch_count += 1;
            records.extend(batch);
        }

        info!(
            table = R::KIND.table_name(),
            records = records.len(),
            batches = batch_count,
            "Extracted table"
        );
        Ok(records)
    }
}
