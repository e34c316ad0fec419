//! Entity kinds and the ordering the destination store depends on.

use std::fmt;

/// The five collections copied by a migration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    FilmWork,
    Genre,
    Person,
    GenreFilmWork,
    PersonFilmWork,
}

impl EntityKind {
    /// Order in which kinds must be written so that link rows always find
    /// their parents: film works, genres and persons before the link tables.
    pub const LOAD_ORDER: [EntityKind; 5] = [
        EntityKind::FilmWork,
        EntityKind::Genre,
        EntityKind::Person,
        EntityKind::GenreFilmWork,
        EntityKind::PersonFilmWork,
    ];

    /// Table name shared by the source and the destination store.
    pub fn table_name(&self) -> &'static str {
        match self {
            EntityKind::FilmWork => "film_work",
            EntityKind::Genre => "genre",
            EntityKind::Person => "person",
            EntityKind::GenreFilmWork => "genre_film_work",
            EntityKind::PersonFilmWork => "person_film_work",
        }
    }

    /// Whether rows of this kind reference rows of other kinds.
    pub fn is_link(&self) -> bool {
        matches!(self, EntityKind::GenreFilmWork | EntityKind::PersonFilmWork)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

/// A record keyed by an opaque identifier.
pub trait Entity {
    /// Kind of collection this record belongs to.
    const KIND: EntityKind;

    /// Primary key of the record.
    fn id(&self) -> &str;
}
