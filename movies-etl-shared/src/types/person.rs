use crate::types::{Entity, EntityKind};

#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub id: String,
    pub full_name: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Entity for Person {
    const KIND: EntityKind = EntityKind::Person;

    fn id(&self) -> &str {
        &self.id
    }
}
