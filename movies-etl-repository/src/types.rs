//! Table descriptions and row values for the destination store.
//!
//! Every record type moved by the migration declares its destination table,
//! column list and conflict policy once through `DestinationRecord`. The
//! repository turns that description into a parameterized INSERT.

use movies_etl_shared::{Entity, EntityKind, FilmWork, Genre, GenreFilmWork, Person, PersonFilmWork};

/// What to do when a row with the same primary key already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// `ON CONFLICT (id) DO NOTHING`: keep the existing row, report it as present.
    DoNothing,
    /// Plain INSERT: a conflicting row is rejected with a unique violation.
    Reject,
}

/// A destination column and the SQL type its text parameter is cast to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub cast: Option<&'static str>,
}

impl ColumnSpec {
    pub const fn plain(name: &'static str) -> Self {
        Self { name, cast: None }
    }

    pub const fn cast(name: &'static str, sql_type: &'static str) -> Self {
        Self {
            name,
            cast: Some(sql_type),
        }
    }
}

/// Destination table of one entity kind.
///
/// The first column is always the primary key `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSpec {
    pub kind: EntityKind,
    pub columns: &'static [ColumnSpec],
    pub conflict: ConflictPolicy,
}

impl TableSpec {
    pub fn name(&self) -> &'static str {
        self.kind.table_name()
    }

    /// Position of `column` in the column list.
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == column)
    }
}

/// A single bound parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(Option<String>),
    Float(Option<f64>),
}

impl SqlValue {
    /// Text content of the value, if it is a non-null text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SqlValue::Text(text) => text.as_deref(),
            SqlValue::Float(_) => None,
        }
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(Some(value))
    }
}

impl From<Option<String>> for SqlValue {
    fn from(value: Option<String>) -> Self {
        SqlValue::Text(value)
    }
}

impl From<Option<f64>> for SqlValue {
    fn from(value: Option<f64>) -> Self {
        SqlValue::Float(value)
    }
}

/// Result of a successful `insert_row` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    AlreadyPresent,
}

/// A record that knows how to be written to its destination table.
pub trait DestinationRecord: Entity + Send + Sync {
    const TABLE: TableSpec;

    /// Parameters in the order of `TABLE.columns`.
    fn values(&self) -> Vec<SqlValue>;
}

impl DestinationRecord for FilmWork {
    const TABLE: TableSpec = TableSpec {
        kind: EntityKind::FilmWork,
        columns: &[
            ColumnSpec::cast("id", "uuid"),
            ColumnSpec::plain("title"),
            ColumnSpec::plain("description"),
            ColumnSpec::cast("creation_date", "date"),
            ColumnSpec::cast("rating", "numeric"),
            ColumnSpec::plain("type"),
            ColumnSpec::cast("created", "timestamptz"),
            ColumnSpec::cast("modified", "timestamptz"),
        ],
        conflict: ConflictPolicy::DoNothing,
    };

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.clone().into(),
            self.title.clone().into(),
            self.description.clone().into(),
            self.creation_date.clone().into(),
            self.rating.into(),
            self.kind.clone().into(),
            self.created_at.clone().into(),
            self.updated_at.clone().into(),
        ]
    }
}

impl DestinationRecord for Genre {
    const TABLE: TableSpec = TableSpec {
        kind: EntityKind::Genre,
        columns: &[
            ColumnSpec::cast("id", "uuid"),
            ColumnSpec::plain("name"),
            ColumnSpec::plain("description"),
            ColumnSpec::cast("created", "timestamptz"),
            ColumnSpec::cast("modified", "timestamptz"),
        ],
        conflict: ConflictPolicy::DoNothing,
    };

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.clone().into(),
            self.name.clone().into(),
            self.description.clone().into(),
            self.created_at.clone().into(),
            self.updated_at.clone().into(),
        ]
    }
}

impl DestinationRecord for Person {
    const TABLE: TableSpec = TableSpec {
        kind: EntityKind::Person,
        columns: &[
            ColumnSpec::cast("id", "uuid"),
            ColumnSpec::plain("full_name"),
            ColumnSpec::cast("created", "timestamptz"),
            ColumnSpec::cast("modified", "timestamptz"),
        ],
        conflict: ConflictPolicy::DoNothing,
    };

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.clone().into(),
            self.full_name.clone().into(),
            self.created_at.clone().into(),
            self.updated_at.clone().into(),
        ]
    }
}

impl DestinationRecord for GenreFilmWork {
    const TABLE: TableSpec = TableSpec {
        kind: EntityKind::GenreFilmWork,
        columns: &[
            ColumnSpec::cast("id", "uuid"),
            ColumnSpec::cast("genre_id", "uuid"),
            ColumnSpec::cast("film_work_id", "uuid"),
            ColumnSpec::cast("created", "timestamptz"),
        ],
        conflict: ConflictPolicy::DoNothing,
    };

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.clone().into(),
            self.genre_id.clone().into(),
            self.film_work_id.clone().into(),
            self.created_at.clone().into(),
        ]
    }
}

impl DestinationRecord for PersonFilmWork {
    const TABLE: TableSpec = TableSpec {
        kind: EntityKind::PersonFilmWork,
        columns: &[
            ColumnSpec::cast("id", "uuid"),
            ColumnSpec::cast("film_work_id", "uuid"),
            ColumnSpec::cast("person_id", "uuid"),
            ColumnSpec::plain("role"),
            ColumnSpec::cast("created", "timestamptz"),
        ],
        // Duplicates are caught per row by the loader and skipped.
        conflict: ConflictPolicy::Reject,
    };

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.clone().into(),
            self.film_work_id.clone().into(),
            self.person_id.clone().into(),
            self.role.as_str().to_string().into(),
            self.created_at.clone().into(),
        ]
    }
}
