mod entity_kind;
mod film_work;
mod genre;
mod genre_film_work;
mod person;
mod person_film_work;
mod role;

pub use entity_kind::{Entity, EntityKind};
pub use film_work::FilmWork;
pub use genre::Genre;
pub use genre_film_work::GenreFilmWork;
pub use person::Person;
pub use person_film_work::PersonFilmWork;
pub use role::{ParseRoleError, Role};
