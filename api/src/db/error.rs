// Error types for database operations

use thiserror::Error;

/// Error types for database connection and query operations
#[derive(Debug, Error)]
pub enum DbError {
    /// Error occurred during database connection attempt or acquire
    #[error("Database connection error: {0}")]
    ConnectionError(String),

    /// Error occurred during database query execution
    #[error("Database query error: {0}")]
    QueryError(String),

    /// Uniqueness violation, typically a concurrent writer racing on the same row
    #[error("Database conflict: {0}")]
    ConflictError(String),
}

impl From<sea_orm::DbErr> for DbError {
    fn from(err: sea_orm::DbErr) -> Self {
        match &err {
            sea_orm::DbErr::Conn(_) | sea_orm::DbErr::ConnectionAcquire(_) => {
                DbError::ConnectionError(err.to_string())
            }
            _ if is_unique_violation(&err) => DbError::ConflictError(err.to_string()),
            _ => DbError::QueryError(err.to_string()),
        }
    }
}

/// Postgres reports unique-index violations as error 23505; sqlx surfaces
/// the message text, so match on it the same way across drivers
fn is_unique_violation(err: &sea_orm::DbErr) -> bool {
    let msg = err.to_string();
    msg.contains("duplicate key") || msg.contains("unique constraint") || msg.contains("23505")
}
