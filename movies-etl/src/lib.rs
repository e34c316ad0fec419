//! # Movies ETL
//!
//! Copies the movies catalog (film works, genres, persons and their link
//! tables) from a SQLite file into PostgreSQL.
//!
//! ## Architecture
//!
//! The migration follows the Extractor-Loader pattern:
//!
//! 1. **Extractor**: Streams each table out of SQLite in fixed-size batches
//! 2. **Loader**: Writes each collection to PostgreSQL row by row
//! 3. **Orchestrator**: Drains the extractor and loads kinds in dependency order
//!
//! ## Modules
//!
//! - [`config`]: Settings and dependency initialization
//! - [`extractor`]: SQLite batch extractor
//! - [`loader`]: Per-row loader with typed outcomes
//! - [`orchestrator`]: Coordinates a migration run
//! - [`errors`]: Error types for the components

pub mod config;
pub mod errors;
pub mod extractor;
pub mod loader;
pub mod orchestrator;

pub use config::{Dependencies, Settings};
pub use errors::{ExtractError, LoaderError};
pub use loader::{ContentLoader, LoadSummary, RowOutcome, RunSummary};
pub use orchestrator::{Dataset, Orchestrator};

use thiserror::Error;

/// Errors that end a migration run.
#[derive(Error, Debug)]
pub enum MigrationError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A store could not be opened.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Extraction from the source failed.
    #[error("Extract error: {0}")]
    ExtractError(#[from] ExtractError),

    /// The destination became unusable while loading.
    #[error("Loader error: {0}")]
    LoaderError(#[from] LoaderError),
}

impl MigrationError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }
}
