use std::env;
use std::fmt;
use std::path::PathBuf;

use sqlx::postgres::PgConnectOptions;

use crate::extractor::DEFAULT_BATCH_SIZE;
use crate::MigrationError;

/// Default SQLite source file.
const DEFAULT_SQLITE_PATH: &str = "db.sqlite";

/// Default PostgreSQL host.
const DEFAULT_DB_HOST: &str = "localhost";

/// Default PostgreSQL port.
const DEFAULT_DB_PORT: u16 = 5432;

/// Default schema holding the catalog tables.
const DEFAULT_DB_SCHEMA: &str = "content";

/// Connection parameters of the destination database.
#[derive(Clone, PartialEq, Eq)]
pub struct PostgresSettings {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    /// Schema set as `search_path` and used to qualify table names.
    pub schema: String,
}

impl PostgresSettings {
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.database)
            .username(&self.user)
            .password(&self.password)
            .options([("search_path", self.schema.as_str())])
    }
}

impl fmt::Debug for PostgresSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"***")
            .field("schema", &self.schema)
            .finish()
    }
}

/// Everything a migration run needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub sqlite_path: PathBuf,
    pub postgres: PostgresSettings,
    pub batch_size: usize,
}

impl Settings {
    /// Read settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SQLITE_PATH`: Source database file (default: db.sqlite)
    /// - `DB_HOST`: PostgreSQL host (default: localhost)
    /// - `DB_PORT`: PostgreSQL port (default: 5432)
    /// - `DB_NAME`: Database name (required)
    /// - `DB_USER`: Database user (required)
    /// - `DB_PASSWORD`: Database password (required)
    /// - `DB_SCHEMA`: Schema of the catalog tables (default: content)
    /// - `BATCH_SIZE`: Extraction batch size (default: 100)
    pub fn from_env() -> Result<Self, MigrationError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through `lookup`, which returns the value of a variable
    /// if it is set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, MigrationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| MigrationError::config(format!("{} must be set", key)))
        };

        let port = match lookup("DB_PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| MigrationError::config(format!("Invalid DB_PORT: {}", value)))?,
            None => DEFAULT_DB_PORT,
        };

        let batch_size = match lookup("BATCH_SIZE") {
            Some(value) => value
                .parse::<usize>()
                .ok()
                .filter(|size| *size > 0)
                .ok_or_else(|| {
                    MigrationError::config(format!(
                        "BATCH_SIZE must be a positive integer, got {}",
                        value
                    ))
                })?,
            None => DEFAULT_BATCH_SIZE,
        };

        let schema = lookup("DB_SCHEMA").unwrap_or_else(|| DEFAULT_DB_SCHEMA.to_string());
        if !is_identifier(&schema) {
            return Err(MigrationError::config(format!(
                "DB_SCHEMA must be a plain identifier, got {}",
                schema
            )));
        }

        Ok(Self {
            sqlite_path: lookup("SQLITE_PATH")
                .unwrap_or_else(|| DEFAULT_SQLITE_PATH.to_string())
                .into(),
            postgres: PostgresSettings {
                host: lookup("DB_HOST").unwrap_or_else(|| DEFAULT_DB_HOST.to_string()),
                port,
                database: required("DB_NAME")?,
                user: required("DB_USER")?,
                password: required("DB_PASSWORD")?,
                schema,
            },
            batch_size,
        })
    }
}

/// Schema names are spliced into SQL, so only `[A-Za-z_][A-Za-z0-9_]*` is accepted.
fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
