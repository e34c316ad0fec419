//! Extractor module for the movies migration.
//!
//! Streams the catalog tables out of SQLite in fixed-size batches.

mod records;
mod sqlite_extractor;

pub use records::{select_statement, SourceRecord};
pub use sqlite_extractor::{SqliteExtractor, DEFAULT_BATCH_SIZE};
