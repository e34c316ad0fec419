use crate::types::{Entity, EntityKind};

/// A film or show in the catalog.
///
/// Dates and timestamps are kept as the text the source store holds; the
/// destination store casts them on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct FilmWork {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub creation_date: Option<String>,
    pub rating: Option<f64>,
    /// Work type, e.g. `movie` or `tv_show`.
    pub kind: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Entity for FilmWork {
    const KIND: EntityKind = EntityKind::FilmWork;

    fn id(&self) -> &str {
        &self.id
    }
}
