//! Orchestrator module for the movies migration.
//!
//! Drains the extractor into memory, then hands each collection to the
//! loader in dependency order. A run is a single pass.

use std::time::Instant;
use tracing::{info, instrument, warn};

use crate::errors::ExtractError;
use crate::extractor::SqliteExtractor;
use crate::loader::{ContentLoader, RunSummary};
use crate::MigrationError;
use movies_etl_shared::{EntityKind, FilmWork, Genre, GenreFilmWork, Person, PersonFilmWork};

/// Every collection of a run, fully materialized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub film_works: Vec<FilmWork>,
    pub genres: Vec<Genre>,
    pub persons: Vec<Person>,
    pub genre_film_works: Vec<GenreFilmWork>,
    pub person_film_works: Vec<PersonFilmWork>,
}

impl Dataset {
    /// Number of records held for `kind`.
    pub fn len(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::FilmWork => self.film_works.len(),
            EntityKind::Genre => self.genres.len(),
            EntityKind::Person => self.persons.len(),
            EntityKind::GenreFilmWork => self.genre_film_works.len(),
            EntityKind::PersonFilmWork => self.person_film_works.len(),
        }
    }

    /// True when no table holds a row.
    pub fn is_empty(&self) -> bool {
        EntityKind::LOAD_ORDER.iter().all(|kind| self.len(*kind) == 0)
    }
}

/// Orchestrator that runs one migration from source to destination.
pub struct Orchestrator {
    extractor: SqliteExtractor,
    loader: ContentLoader,
}

impl Orchestrator {
    /// Create a new orchestrator with the given components.
    pub fn new(extractor: SqliteExtractor, loader: ContentLoader) -> Self {
        Self { extractor, loader }
    }

    /// Read every collection from the source.
    pub async fn extract(&self) -> Result<Dataset, ExtractError> {
        Ok(Dataset {
            film_works: self.extractor.collect_all().await?,
            genres: self.extractor.collect_all().await?,
            persons: self.extractor.collect_all().await?,
            genre_film_works: self.extractor.collect_all().await?,
            person_film_works: self.extractor.collect_all().await?,
        })
    }

    /// Run the migration.
    ///
    /// Extraction errors and a lost destination connection abort the run;
    /// rows rejected by the destination are skipped and counted in the
    /// returned summary.
    #[instrument(skip(self), fields(batch_size = self.extractor.batch_size()))]
    pub async fn run(&self) -> Result<RunSummary, MigrationError> {
        let started = Instant::now();
        info!("Starting migration run");

        let dataset = self.extract().await?;
        info!(
            film_works = dataset.film_works.len(),
            genres = dataset.genres.len(),
            persons = dataset.persons.len(),
            genre_film_works = dataset.genre_film_works.len(),
            person_film_works = dataset.person_film_works.len(),
            "Source extracted"
        );
        if dataset.is_empty() {
            warn!("Source tables hold no rows, nothing to load");
        }

        let summary = self.loader.save_all(&dataset).await?;

        info!(
            inserted = summary.inserted(),
            already_present = summary.already_present(),
            skipped = summary.skipped(),
            elapsed_secs = format!("{:.2}", started.elapsed().as_secs_f64()),
            "Migration run complete"
        );
        Ok(summary)
    }
}
