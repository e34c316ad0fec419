//! PostgreSQL implementation of the movies ETL repository.
//!
//! Rows are written one statement per transaction into `<schema>.<table>`,
//! with the conflict clause taken from the record's `TableSpec`.

mod content_repository;

pub use content_repository::{insert_statement, PostgresContentRepository};
