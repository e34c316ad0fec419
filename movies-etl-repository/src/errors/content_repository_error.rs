use thiserror::Error;

/// Errors returned by a `ContentRepository`.
///
/// Row-level rejections (`UniqueViolation`, `Rejected`) only concern the row
/// being written. `Connection` means the store itself cannot be used any more.
#[derive(Debug, Clone, Error)]
pub enum ContentRepositoryError {
    /// The row violates a uniqueness constraint.
    #[error("Unique violation: {0}")]
    UniqueViolation(String),

    /// The row was refused for another reason (foreign key, bad value, ...).
    #[error("Row rejected: {0}")]
    Rejected(String),

    /// The store could not be reached or the connection broke.
    #[error("Connection error: {0}")]
    Connection(String),
}

impl ContentRepositoryError {
    pub fn unique_violation(msg: impl Into<String>) -> Self {
        Self::UniqueViolation(msg.into())
    }

    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::Rejected(msg.into())
    }

    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Whether the error leaves the store usable for the next row.
    pub fn is_row_level(&self) -> bool {
        !matches!(self, Self::Connection(_))
    }
}

/// SQLSTATE classes that mean the server cannot serve the session:
/// connection exceptions (08), authorization (28), insufficient resources
/// (53) and operator intervention (57).
fn is_connection_sqlstate(code: &str) -> bool {
    matches!(code.get(..2), Some("08" | "28" | "53" | "57"))
}

impl From<sqlx::Error> for ContentRepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err)
                if db_err.code().is_some_and(|code| is_connection_sqlstate(&code)) =>
            {
                Self::Connection(db_err.message().to_string())
            }
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                Self::UniqueViolation(db_err.message().to_string())
            }
            sqlx::Error::Database(db_err) => Self::Rejected(db_err.message().to_string()),
            sqlx::Error::Encode(e) => Self::Rejected(e.to_string()),
            sqlx::Error::TypeNotFound { type_name } => {
                Self::Rejected(format!("type not found: {}", type_name))
            }
            other => Self::Connection(other.to_string()),
        }
    }
}
