//! Error handling utilities for repositories

use ratecard_core::error::DomainError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
///
/// Pool exhaustion and transport failures become `DatabaseUnavailable` so the
/// API can answer 503 instead of 500.
pub fn map_db_error(e: SqlxError) -> DomainError {
    match e {
        SqlxError::PoolTimedOut | SqlxError::PoolClosed | SqlxError::Io(_) => {
            DomainError::DatabaseUnavailable(e.to_string())
        }
        other => DomainError::DatabaseError(other.to_string()),
    }
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    map_db_error(e)
}

/// Map a foreign key violation on delete to a validation error
pub fn map_still_referenced(e: SqlxError, what: &str) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() {
            return DomainError::ValidationError(format!("{what} is still referenced by rates"));
        }
    }
    map_db_error(e)
}

/// Escape LIKE wildcards in a user supplied search term
pub fn like_pattern(term: &str) -> String {
    let escaped = term
        .trim()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}
