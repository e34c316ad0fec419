//! # Movies ETL Repository
//!
//! This crate provides the interface the migration loader writes through and
//! its PostgreSQL implementation. Each record type describes its destination
//! table once (`TableSpec`), so a single insert routine serves every kind.

pub mod errors;
pub mod interfaces;
pub mod postgres;
pub mod types;

pub use errors::ContentRepositoryError;
pub use interfaces::ContentRepository;
pub use postgres::PostgresContentRepository;
pub use types::{ColumnSpec, ConflictPolicy, DestinationRecord, InsertOutcome, SqlValue, TableSpec};
