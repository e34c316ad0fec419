//! Loader module for the movies migration.
//!
//! Writes materialized collections to the destination store one row at a
//! time. Every row gets a `RowOutcome`; only a lost connection stops the
//! loader.

mod summary;

pub use summary::{LoadSummary, RowOutcome, RunSummary};

use std::sync::Arc;
use tracing::{debug, error, info, instrument};

use crate::errors::LoaderError;
use crate::orchestrator::Dataset;
use movies_etl_repository::{
    ContentRepository, ContentRepositoryError, DestinationRecord, InsertOutcome,
};
use movies_etl_shared::EntityKind;

/// Loader that writes catalog records through a `ContentRepository`.
///
/// The conflict handling of each kind comes from its `TableSpec`:
/// - `DoNothing` tables keep an existing row with the same id
/// - `Reject` tables report the conflict, and the row is skipped
pub struct ContentLoader {
    repository: Arc<dyn ContentRepository>,
}

impl ContentLoader {
    /// Create a new loader with the given repository.
    pub fn new(repository: Arc<dyn ContentRepository>) -> Self {
        Self { repository }
    }

    /// Write a single row and classify the result.
    ///
    /// Uniqueness violations are logged at debug level and rejected rows at
    /// error level; both are skipped. A connection failure is returned as an
    /// error.
    pub async fn write_row<R: DestinationRecord>(&self, row: &R) -> Result<RowOutcome, LoaderError> {
        match self.repository.insert_row(&R::TABLE, &row.values()).await {
            Ok(InsertOutcome::Inserted) => Ok(RowOutcome::Inserted),
            Ok(InsertOutcome::AlreadyPresent) => Ok(RowOutcome::AlreadyPresent),
            Err(ContentRepositoryError::UniqueViolation(message)) => {
                debug!(
                    kind = %R::KIND,
                    id = row.id(),
                    error = %message,
                    "Ignoring duplicate entry"
                );
                Ok(RowOutcome::SkippedDuplicate)
            }
            Err(ContentRepositoryError::Rejected(message)) => {
                error!(
                    kind = %R::KIND,
                    id = row.id(),
                    error = %message,
                    "Error inserting record"
                );
                Ok(RowOutcome::SkippedError(message))
            }
            Err(ContentRepositoryError::Connection(message)) => Err(LoaderError::Connection {
                kind: R::KIND,
                message,
            }),
        }
    }

    /// Write every row of one collection, in order.
    #[instrument(skip(self, rows), fields(kind = %R::KIND, row_count = rows.len()))]
    pub async fn load<R: DestinationRecord>(&self, rows: &[R]) -> Result<LoadSummary, LoaderError> {
        let mut summary = LoadSummary::new(R::KIND);

        for row in rows {
            let outcome = self.write_row(row).await?;
            summary.record(&outcome);
        }

        info!(
            kind = %R::KIND,
            inserted = summary.inserted,
            already_present = summary.already_present,
            duplicates = summary.duplicates,
            failed = summary.failed,
            "Loaded collection"
        );
        Ok(summary)
    }

    /// Write a whole dataset, parents before link tables.
    pub async fn save_all(&self, dataset: &Dataset) -> Result<RunSummary, LoaderError> {
        let mut run = RunSummary::default();

        for kind in EntityKind::LOAD_ORDER {
            let summary = match kind {
                EntityKind::FilmWork => self.load(&dataset.film_works).await?,
                EntityKind::Genre => self.load(&dataset.genres).await?,
                EntityKind::Person => self.load(&dataset.persons).await?,
                EntityKind::GenreFilmWork => self.load(&dataset.genre_film_works).await?,
                EntityKind::PersonFilmWork => self.load(&dataset.person_film_works).await?,
            };
            run.push(summary);
        }

        Ok(run)
    }
}
