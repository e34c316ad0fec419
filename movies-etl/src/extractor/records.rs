//! Decoding of source rows into catalog records.

use movies_etl_shared::{Entity, FilmWork, Genre, GenreFilmWork, Person, PersonFilmWork, Role};
use sqlx::sqlite::{Sqlite, SqliteRow};
use sqlx::{Decode, Row, Type};

use crate::errors::ExtractError;

/// A record that can be read from its source table.
///
/// `COLUMNS` is the fixed projection selected from the table; `from_row`
/// must read every one of them and fails if any is missing.
pub trait SourceRecord: Entity + Sized + Send + 'static {
    const COLUMNS: &'static [&'static str];

    fn from_row(row: &SqliteRow) -> Result<Self, ExtractError>;
}

/// `SELECT <columns> FROM <table>` for a record type.
pub fn select_statement<R: SourceRecord>() -> String {
    format!(
        "SELECT {} FROM {}",
        R::COLUMNS.join(", "),
        R::KIND.table_name()
    )
}

/// Turn a failed source query into an `ExtractError`.
///
/// SQLite refuses a projection naming an absent column before returning any
/// row; that case is reported as a row shape error on the missing column.
pub fn query_error<R: SourceRecord>(err: sqlx::Error) -> ExtractError {
    let missing = match &err {
        sqlx::Error::Database(db_err) => db_err
            .message()
            .strip_prefix("no such column: ")
            .and_then(|name| name.rsplit('.').next())
            .and_then(|name| R::COLUMNS.iter().find(|column| **column == name).copied()),
        _ => None,
    };

    match missing {
        Some(column) => ExtractError::row_shape(R::KIND.table_name(), column, err.to_string()),
        None => ExtractError::Database(err),
    }
}

fn column<'r, R, T>(row: &'r SqliteRow, name: &'static str) -> Result<T, ExtractError>
where
    R: SourceRecord,
    T: Decode<'r, Sqlite> + Type<Sqlite>,
{
    row.try_get(name)
        .map_err(|e| ExtractError::row_shape(R::KIND.table_name(), name, e.to_string()))
}

impl SourceRecord for FilmWork {
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "title",
        "description",
        "creation_date",
        "rating",
        "type",
        "created_at",
        "updated_at",
    ];

    fn from_row(row: &SqliteRow) -> Result<Self, ExtractError> {
        Ok(FilmWork {
            id: column::<Self, _>(row, "id")?,
            title: column::<Self, _>(row, "title")?,
            description: column::<Self, _>(row, "description")?,
            creation_date: column::<Self, _>(row, "creation_date")?,
            rating: column::<Self, _>(row, "rating")?,
            kind: column::<Self, _>(row, "type")?,
            created_at: column::<Self, _>(row, "created_at")?,
            updated_at: column::<Self, _>(row, "updated_at")?,
        })
    }
}

impl SourceRecord for Genre {
    const COLUMNS: &'static [&'static str] =
        &["id", "name", "description", "created_at", "updated_at"];

    fn from_row(row: &SqliteRow) -> Result<Self, ExtractError> {
        Ok(Genre {
            id: column::<Self, _>(row, "id")?,
            name: column::<Self, _>(row, "name")?,
            description: column::<Self, _>(row, "description")?,
            created_at: column::<Self, _>(row, "created_at")?,
            updated_at: column::<Self, _>(row, "updated_at")?,
        })
    }
}

impl SourceRecord for Person {
    const COLUMNS: &'static [&'static str] = &["id", "full_name", "created_at", "updated_at"];

    fn from_row(row: &SqliteRow) -> Result<Self, ExtractError> {
        Ok(Person {
            id: column::<Self, _>(row, "id")?,
            full_name: column::<Self, _>(row, "full_name")?,
            created_at: column::<Self, _>(row, "created_at")?,
            updated_at: column::<Self, _>(row, "updated_at")?,
        })
    }
}

impl SourceRecord for GenreFilmWork {
    const COLUMNS: &'static [&'static str] = &["id", "genre_id", "film_work_id", "created_at"];

    fn from_row(row: &SqliteRow) -> Result<Self, ExtractError> {
        Ok(GenreFilmWork {
            id: column::<Self, _>(row, "id")?,
            genre_id: column::<Self, _>(row, "genre_id")?,
            film_work_id: column::<Self, _>(row, "film_work_id")?,
            created_at: column::<Self, _>(row, "created_at")?,
        })
    }
}

impl SourceRecord for PersonFilmWork {
    const COLUMNS: &'static [&'static str] =
        &["id", "film_work_id", "person_id", "role", "created_at"];

    fn from_row(row: &SqliteRow) -> Result<Self, ExtractError> {
        let role: String = column::<Self, _>(row, "role")?;
        let role = role.parse::<Role>().map_err(|e| {
            ExtractError::row_shape(Self::KIND.table_name(), "role", e.to_string())
        })?;

        Ok(PersonFilmWork {
            id: column::<Self, _>(row, "id")?,
            film_work_id: column::<Self, _>(row, "film_work_id")?,
            person_id: column::<Self, _>(row, "person_id")?,
            role,
            created_at: column::<Self, _>(row, "created_at")?,
        })
    }
}
