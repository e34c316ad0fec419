//! Dependency initialization and wiring for the movies migration.

use std::path::Path;
use std::sync::Arc;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use crate::config::{PostgresSettings, Settings};
use crate::extractor::SqliteExtractor;
use crate::loader::{ContentLoader, RunSummary};
use crate::orchestrator::Orchestrator;
use crate::MigrationError;
use movies_etl_repository::PostgresContentRepository;

/// Container for all initialized dependencies.
///
/// Owns one pool per store, each capped at a single connection, so the
/// pools can be closed once the run is over.
pub struct Dependencies {
    /// The configured orchestrator ready to run.
    pub orchestrator: Orchestrator,
    source: SqlitePool,
    destination: PgPool,
}

impl Dependencies {
    /// Open both stores and wire the pipeline.
    ///
    /// Any pool opened before a failure is closed before returning.
    pub async fn new(settings: &Settings) -> Result<Self, MigrationError> {
        info!(
            sqlite_path = %settings.sqlite_path.display(),
            db_host = %settings.postgres.host,
            db_port = settings.postgres.port,
            db_name = %settings.postgres.database,
            db_schema = %settings.postgres.schema,
            batch_size = settings.batch_size,
            "Initializing dependencies"
        );

        let source = Self::open_source(&settings.sqlite_path).await?;
        info!("SQLite source opened");

        let destination = match Self::open_destination(&settings.postgres).await {
            Ok(pool) => pool,
            Err(e) => {
                source.close().await;
                return Err(e);
            }
        };
        info!("PostgreSQL connection established");

        let extractor = match SqliteExtractor::new(source.clone(), settings.batch_size).await {
            Ok(extractor) => extractor,
            Err(e) => {
                source.close().await;
                destination.close().await;
                return Err(e.into());
            }
        };

        let repository =
            PostgresContentRepository::new(destination.clone(), settings.postgres.schema.clone());
        let loader = ContentLoader::new(Arc::new(repository));
        let orchestrator = Orchestrator::new(extractor, loader);

        Ok(Self {
            orchestrator,
            source,
            destination,
        })
    }

    /// Run the migration once, then close both pools whatever the result.
    pub async fn run(self) -> Result<RunSummary, MigrationError> {
        let result = self.orchestrator.run().await;
        self.close().await;
        result
    }

    /// Close both pools.
    pub async fn close(&self) {
        self.source.close().await;
        self.destination.close().await;
        debug!("Database pools closed");
    }

    async fn open_source(path: &Path) -> Result<SqlitePool, MigrationError> {
        let options = SqliteConnectOptions::new().filename(path).read_only(true);

        SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| {
                MigrationError::connection(format!(
                    "Failed to open SQLite source {}: {}",
                    path.display(),
                    e
                ))
            })
    }

    async fn open_destination(settings: &PostgresSettings) -> Result<PgPool, MigrationError> {
        PgPoolOptions::new()
            .max_connections(1)
            .connect_with(settings.connect_options())
            .await
            .map_err(|e| {
                MigrationError::connection(format!(
                    "Failed to connect to PostgreSQL at {}:{}: {}",
                    settings.host, settings.port, e
                ))
            })
    }
}
