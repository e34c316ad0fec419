//! # Movies ETL Shared
//!
//! This crate defines the records moved by the movies catalog migration:
//! film works, genres, persons and the two link tables between them.
//! Both the extractor and the repository crates build on these types.

pub mod types;

pub use types::{
    Entity, EntityKind, FilmWork, Genre, GenreFilmWork, ParseRoleError, Person, PersonFilmWork,
    Role,
};
