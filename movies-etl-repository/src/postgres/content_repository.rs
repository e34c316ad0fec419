use async_trait::async_trait;
use tracing::warn;

use crate::errors::ContentRepositoryError;
use crate::interfaces::ContentRepository;
use crate::types::{ConflictPolicy, InsertOutcome, SqlValue, TableSpec};

/// PostgreSQL-backed destination store.
///
/// Holds the pool opened for the run and the schema the catalog tables live
/// in (`content` by default).
pub struct PostgresContentRepository {
    pool: sqlx::PgPool,
    schema: String,
}

impl PostgresContentRepository {
    /// Creates a new PostgreSQL content repository.
    ///
    /// # Arguments
    ///
    /// * `pool` - Pool connected to the destination database
    /// * `schema` - Schema holding the catalog tables
    pub fn new(pool: sqlx::PgPool, schema: impl Into<String>) -> Self {
        Self {
            pool,
            schema: schema.into(),
        }
    }
}

/// Builds the parameterized INSERT for `table` in `schema`.
///
/// Parameters are numbered in column order and cast to the column type where
/// the table declares one.
pub fn insert_statement(schema: &str, table: &TableSpec) -> String {
    let columns = table
        .columns
        .iter()
        .map(|column| column.name)
        .collect::<Vec<_>>()
        .join(", ");

    let placeholders = table
        .columns
        .iter()
        .enumerate()
        .map(|(index, column)| match column.cast {
            Some(sql_type) => format!("${}::{}", index + 1, sql_type),
            None => format!("${}", index + 1),
        })
        .collect::<Vec<_>>()
        .join(", ");

    let mut statement = format!(
        "INSERT INTO {}.{} ({}) VALUES ({})",
        schema,
        table.name(),
        columns,
        placeholders
    );

    if table.conflict == ConflictPolicy::DoNothing {
        statement.push_str(" ON CONFLICT (id) DO NOTHING");
    }

    statement
}

#[async_trait]
impl ContentRepository for PostgresContentRepository {
    async fn insert_row(
        &self,
        table: &TableSpec,
        values: &[SqlValue],
    ) -> Result<InsertOutcome, ContentRepositoryError> {
        if values.len() != table.columns.len() {
            return Err(ContentRepositoryError::rejected(format!(
                "{} expects {} values, got {}",
                table.name(),
                table.columns.len(),
                values.len()
            )));
        }

        let statement = insert_statement(&self.schema, table);
        let mut query = sqlx::query(&statement);
        for value in values {
            query = match value {
                SqlValue::Text(text) => query.bind(text.as_deref()),
                SqlValue::Float(number) => query.bind(*number),
            };
        }

        // Failing to get a session means the store is gone, whatever the cause.
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| ContentRepositoryError::connection(e.to_string()))?;
        match query.execute(&mut *tx).await {
            Ok(result) => {
                tx.commit().await?;
                if result.rows_affected() == 0 {
                    Ok(InsertOutcome::AlreadyPresent)
                } else {
                    Ok(InsertOutcome::Inserted)
                }
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(
                        table = table.name(),
                        error = %rollback_err,
                        "Failed to roll back rejected row"
                    );
                    return Err(rollback_err.into());
                }
                Err(e.into())
            }
        }
    }
}
