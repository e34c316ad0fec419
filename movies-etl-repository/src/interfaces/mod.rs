//! Interface definitions for the destination store.
//!
//! The loader only depends on `ContentRepository`, so tests can swap the
//! PostgreSQL implementation for an in-memory one.

mod content_repository;

pub use content_repository::ContentRepository;
