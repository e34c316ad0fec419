//! Error types for the movies ETL repository.

mod content_repository_error;

pub use content_repository_error::ContentRepositoryError;
