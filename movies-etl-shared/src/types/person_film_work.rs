use crate::types::{Entity, EntityKind, Role};

/// Many-to-many link between a person and a film work, qualified by the
/// role the person played.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonFilmWork {
    pub id: String,
    pub film_work_id: String,
    pub person_id: String,
    pub role: Role,
    pub created_at: String,
}

impl Entity for PersonFilmWork {
    const KIND: EntityKind = EntityKind::PersonFilmWork;

    fn id(&self) -> &str {
        &self.id
    }
}
