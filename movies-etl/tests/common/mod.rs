//! Shared fixtures for the pipeline tests: an in-memory SQLite source and an
//! in-memory destination that enforces the destination constraints.

#![allow(dead_code)]

use async_trait::async_trait;
use movies_etl_repository::{
    ConflictPolicy, ContentRepository, ContentRepositoryError, InsertOutcome, SqlValue, TableSpec,
};
use movies_etl_shared::EntityKind;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

pub const TIMESTAMP: &str = "2021-06-16 20:14:09.221838+00";

const SOURCE_SCHEMA: &str = "
CREATE TABLE film_work (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    description TEXT,
    creation_date DATE,
    file_path TEXT,
    rating FLOAT,
    type TEXT NOT NULL,
    created_at timestamp with time zone,
    updated_at timestamp with time zone
);
CREATE TABLE genre (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    description TEXT,
    created_at timestamp with time zone,
    updated_at timestamp with time zone
);
CREATE TABLE person (
    id TEXT PRIMARY KEY,
    full_name TEXT NOT NULL,
    created_at timestamp with time zone,
    updated_at timestamp with time zone
);
CREATE TABLE genre_film_work (
    id TEXT PRIMARY KEY,
    film_work_id TEXT NOT NULL,
    genre_id TEXT NOT NULL,
    created_at timestamp with time zone
);
CREATE TABLE person_film_work (
    id TEXT PRIMARY KEY,
    film_work_id TEXT NOT NULL,
    person_id TEXT NOT NULL,
    role TEXT NOT NULL,
    created_at timestamp with time zone
);
";

/// Single-connection in-memory SQLite database holding the source tables.
pub async fn source_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    sqlx::raw_sql(SOURCE_SCHEMA).execute(&pool).await.unwrap();
    pool
}

pub async fn insert_film_work(pool: &SqlitePool, id: &str, title: &str) {
    sqlx::query(
        "INSERT INTO film_work (id, title, description, creation_date, file_path, rating, type, created_at, updated_at) \
         VALUES (?, ?, NULL, NULL, NULL, ?, 'movie', ?, ?)",
    )
    .bind(id)
    .bind(title)
    .bind(8.5_f64)
    .bind(TIMESTAMP)
    .bind(TIMESTAMP)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn insert_genre(pool: &SqlitePool, id: &str, name: &str) {
    sqlx::query(
        "INSERT INTO genre (id, name, description, created_at, updated_at) VALUES (?, ?, NULL, ?, ?)",
    )
    .bind(id)
    .bind(name)
    .bind(TIMESTAMP)
    .bind(TIMESTAMP)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn insert_person(pool: &SqlitePool, id: &str, full_name: &str) {
    sqlx::query("INSERT INTO person (id, full_name, created_at, updated_at) VALUES (?, ?, ?, ?)")
        .bind(id)
        .bind(full_name)
        .bind(TIMESTAMP)
        .bind(TIMESTAMP)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn insert_genre_film_work(pool: &SqlitePool, id: &str, film_work_id: &str, genre_id: &str) {
    sqlx::query(
        "INSERT INTO genre_film_work (id, film_work_id, genre_id, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(id)
    .bind(film_work_id)
    .bind(genre_id)
    .bind(TIMESTAMP)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn insert_person_film_work(
    pool: &SqlitePool,
    id: &str,
    film_work_id: &str,
    person_id: &str,
    role: &str,
) {
    sqlx::query(
        "INSERT INTO person_film_work (id, film_work_id, person_id, role, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(film_work_id)
    .bind(person_id)
    .bind(role)
    .bind(TIMESTAMP)
    .execute(pool)
    .await
    .unwrap();
}

/// The f1/g1/p1 catalog: one row in each of the five tables.
pub async fn seed_single_movie(pool: &SqlitePool) {
    insert_film_work(pool, "f1", "Star Wars").await;
    insert_genre(pool, "g1", "Sci-Fi").await;
    insert_person(pool, "p1", "Mark Hamill").await;
    insert_genre_film_work(pool, "gf1", "f1", "g1").await;
    insert_person_film_work(pool, "pf1", "f1", "p1", "actor").await;
}

/// Column groups that must be unique per table, besides the primary key.
fn unique_indexes(table: &str) -> &'static [&'static [&'static str]] {
    match table {
        "genre_film_work" => &[&["film_work_id", "genre_id"]],
        "person_film_work" => &[&["film_work_id", "person_id", "role"]],
        _ => &[],
    }
}

/// Parent table referenced by a foreign key column.
fn referenced_table(column: &str) -> Option<&'static str> {
    match column {
        "film_work_id" => Some("film_work"),
        "genre_id" => Some("genre"),
        "person_id" => Some("person"),
        _ => None,
    }
}

#[derive(Default)]
struct State {
    tables: HashMap<&'static str, Vec<Vec<SqlValue>>>,
    inserts: Vec<(&'static str, String)>,
}

/// Destination mock that behaves like the content schema: primary keys,
/// foreign keys from the link tables and the link-table unique indexes.
#[derive(Default)]
pub struct InMemoryContentRepository {
    state: Mutex<State>,
    rejected_ids: HashSet<String>,
    lost_connection_at: Option<EntityKind>,
}

impl InMemoryContentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject the row with `id` as a malformed value would be.
    pub fn reject_id(mut self, id: &str) -> Self {
        self.rejected_ids.insert(id.to_string());
        self
    }

    /// Fail with a connection error on the first write to `kind`.
    pub fn lose_connection_at(mut self, kind: EntityKind) -> Self {
        self.lost_connection_at = Some(kind);
        self
    }

    /// Store a row directly, bypassing every check.
    pub fn seed(&self, table: &'static str, values: Vec<SqlValue>) {
        self.state
            .lock()
            .unwrap()
            .tables
            .entry(table)
            .or_default()
            .push(values);
    }

    pub fn count(&self, table: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .tables
            .get(table)
            .map(Vec::len)
            .unwrap_or(0)
    }

    /// Text value of `column` in the row with `id`.
    pub fn text(&self, spec: &TableSpec, id: &str, column: &str) -> Option<String> {
        let index = spec.column_index(column)?;
        let state = self.state.lock().unwrap();
        state
            .tables
            .get(spec.name())?
            .iter()
            .find(|row| row[0].as_text() == Some(id))
            .and_then(|row| row[index].as_text().map(str::to_string))
    }

    /// Tables of the successful inserts, in the order they happened.
    pub fn insert_order(&self) -> Vec<&'static str> {
        self.state
            .lock()
            .unwrap()
            .inserts
            .iter()
            .map(|(table, _)| *table)
            .collect()
    }

    fn contains(state: &State, table: &str, id: &str) -> bool {
        state
            .tables
            .get(table)
            .map(|rows| rows.iter().any(|row| row[0].as_text() == Some(id)))
            .unwrap_or(false)
    }
}

#[async_trait]
impl ContentRepository for InMemoryContentRepository {
    async fn insert_row(
        &self,
        table: &TableSpec,
        values: &[SqlValue],
    ) -> Result<InsertOutcome, ContentRepositoryError> {
        if self.lost_connection_at == Some(table.kind) {
            return Err(ContentRepositoryError::connection("connection reset by peer"));
        }
        if values.len() != table.columns.len() {
            return Err(ContentRepositoryError::rejected("wrong number of values"));
        }

        let id = match values[0].as_text() {
            Some(id) => id.to_string(),
            None => return Err(ContentRepositoryError::rejected("null value in column id")),
        };
        if self.rejected_ids.contains(&id) {
            return Err(ContentRepositoryError::rejected(format!(
                "invalid input syntax for type uuid: {}",
                id
            )));
        }

        let mut state = self.state.lock().unwrap();

        if Self::contains(&state, table.name(), &id) {
            return match table.conflict {
                ConflictPolicy::DoNothing => Ok(InsertOutcome::AlreadyPresent),
                ConflictPolicy::Reject => Err(ContentRepositoryError::unique_violation(format!(
                    "duplicate key value violates unique constraint {}_pkey",
                    table.name()
                ))),
            };
        }

        for (column, value) in table.columns.iter().zip(values) {
            if let (Some(parent), Some(parent_id)) = (referenced_table(column.name), value.as_text()) {
                if !Self::contains(&state, parent, parent_id) {
                    return Err(ContentRepositoryError::rejected(format!(
                        "insert on table {} violates foreign key constraint on {}",
                        table.name(),
                        column.name
                    )));
                }
            }
        }

        let existing = state.tables.get(table.name()).cloned().unwrap_or_default();
        for index in unique_indexes(table.name()) {
            let key = |row: &[SqlValue]| -> Vec<SqlValue> {
                index
                    .iter()
                    .filter_map(|name| table.column_index(name).map(|i| row[i].clone()))
                    .collect()
            };
            let candidate = key(values);
            if existing.iter().any(|row| key(row.as_slice()) == candidate) {
                return Err(ContentRepositoryError::unique_violation(format!(
                    "duplicate key value violates unique index on {}",
                    table.name()
                )));
            }
        }

        state
            .tables
            .entry(table.name())
            .or_default()
            .push(values.to_vec());
        state.inserts.push((table.name(), id));
        Ok(InsertOutcome::Inserted)
    }
}
