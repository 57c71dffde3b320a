//! # Error Handling
//!
//! Error types shared by the repository layer. Storage-level constraint
//! violations are surfaced as [`RepositoryError::Conflict`] so callers can
//! tell "already exists" apart from other database failures.

use sea_orm::{DbErr, RuntimeErr, SqlErr};
use thiserror::Error;

/// Errors returned by repository operations
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Database(#[source] DbErr),
}

impl RepositoryError {
    /// Classifies a database error, turning unique violations into `Conflict`.
    pub fn database_error(error: DbErr) -> Self {
        if is_unique_violation(&error) {
            tracing::debug!(?error, "Unique constraint violation detected");
            return Self::Conflict(error.to_string());
        }

        match error {
            DbErr::RecordNotFound(record) => Self::NotFound(record),
            other => Self::Database(other),
        }
    }

    pub fn validation_error<S: Into<String>>(message: S) -> Self {
        let message = message.into();
        tracing::warn!(reason = %message, "Rejected invalid input");
        Self::Validation(message)
    }

    pub fn not_found<S: Into<String>>(what: S) -> Self {
        Self::NotFound(what.into())
    }

    /// True when the error came from a uniqueness constraint
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}

impl From<DbErr> for RepositoryError {
    fn from(error: DbErr) -> Self {
        Self::database_error(error)
    }
}

/// Detects unique-constraint violations across Postgres, MySQL and SQLite.
pub fn is_unique_violation(error: &DbErr) -> bool {
    const PG_UNIQUE: &str = "23505";
    const MYSQL_DUPLICATE_CODES: &[&str] = &["1022", "1062", "1169", "1586"];
    const SQLITE_DUPLICATE_CODES: &[&str] = &["1555", "2067"];

    if matches!(error.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        return true;
    }

    let runtime_err = match error {
        DbErr::Query(RuntimeErr::SqlxError(sqlx_err))
        | DbErr::Exec(RuntimeErr::SqlxError(sqlx_err)) => sqlx_err,
        _ => return false,
    };

    let Some(db_error) = runtime_err.as_database_error() else {
        return false;
    };

    if db_error.is_unique_violation() {
        return true;
    }

    if let Some(code) = db_error.code() {
        let code_str = code.as_ref();
        return code_str == PG_UNIQUE
            || MYSQL_DUPLICATE_CODES.contains(&code_str)
            || SQLITE_DUPLICATE_CODES.contains(&code_str);
    }

    false
}
