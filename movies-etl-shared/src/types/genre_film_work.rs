use crate::types::{Entity, EntityKind};

/// Many-to-many link between a genre and a film work.
#[derive(Debug, Clone, PartialEq)]
pub struct GenreFilmWork {
    pub id: String,
    pub genre_id: String,
    pub film_work_id: String,
    pub created_at: String,
}

impl Entity for GenreFilmWork {
    const KIND: EntityKind = EntityKind::GenreFilmWork;

    fn id(&self) -> &str {
        &self.id
    }
}
