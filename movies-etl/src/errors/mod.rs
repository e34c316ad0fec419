//! Error types for the migration components.

use movies_etl_shared::EntityKind;
use thiserror::Error;

/// Errors raised while reading the source store.
///
/// All of them are fatal for the run.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Batch size of zero.
    #[error("Batch size must be a positive integer")]
    InvalidBatchSize,

    /// The source exposes no tables at all.
    #[error("No tables found in the source database, check the source file")]
    EmptySource,

    /// A source row is missing a declared column or holds an unusable value.
    #[error("Invalid row in {table}, column {column}: {message}")]
    RowShape {
        table: &'static str,
        column: &'static str,
        message: String,
    },

    /// Query or connection failure.
    #[error("Source database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ExtractError {
    /// Create a row shape error.
    pub fn row_shape(table: &'static str, column: &'static str, msg: impl Into<String>) -> Self {
        Self::RowShape {
            table,
            column,
            message: msg.into(),
        }
    }
}

/// Errors that stop the loader.
///
/// Rejected rows are not errors: they come back as `RowOutcome`s.
#[derive(Error, Debug)]
pub enum LoaderError {
    /// The destination store became unreachable.
    #[error("Destination unreachable while loading {kind}: {message}")]
    Connection { kind: EntityKind, message: String },
}
