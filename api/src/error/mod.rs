use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::db::DbError;

/// Error taxonomy for ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// No valid user session; nothing was mutated
    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Requested quantity exceeds the project's available credits
    #[error("Insufficient credits: requested {requested}, available {available}")]
    InsufficientInventory { requested: i32, available: i32 },

    /// A concurrent writer won the race on the same rows; retry from the
    /// inventory re-check
    #[error("Concurrent ledger modification detected")]
    ConsistencyConflict,

    /// Transient store failure; retryable with backoff
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

pub type LedgerResult<T> = Result<T, LedgerError>;

impl LedgerError {
    /// Whether the ledger service may retry the whole operation locally
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            LedgerError::ConsistencyConflict | LedgerError::StoreUnavailable(_)
        )
    }
}

impl IntoResponse for LedgerError {
    fn into_response(self) -> Response {
        let status = match &self {
            LedgerError::Unauthenticated => StatusCode::UNAUTHORIZED,
            LedgerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            LedgerError::NotFound(_) => StatusCode::NOT_FOUND,
            LedgerError::InsufficientInventory { .. } => StatusCode::CONFLICT,
            LedgerError::ConsistencyConflict => StatusCode::CONFLICT,
            LedgerError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            LedgerError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// DbError to LedgerError conversion implementation
impl From<DbError> for LedgerError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ConnectionError(msg) => LedgerError::StoreUnavailable(msg),
            DbError::ConflictError(_) => LedgerError::ConsistencyConflict,
            DbError::QueryError(msg) => LedgerError::DatabaseError(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_and_unavailable_are_retryable() {
        assert!(LedgerError::ConsistencyConflict.is_retryable());
        assert!(LedgerError::StoreUnavailable("timeout".into()).is_retryable());
    }

    #[test]
    fn validation_errors_are_terminal() {
        assert!(!LedgerError::NotFound("p".into()).is_retryable());
        assert!(!LedgerError::InsufficientInventory {
            requested: 10,
            available: 5
        }
        .is_retryable());
        assert!(!LedgerError::InvalidRequest("quantity".into()).is_retryable());
        assert!(!LedgerError::Unauthenticated.is_retryable());
    }

    #[test]
    fn db_errors_classify_by_transience() {
        assert!(matches!(
            LedgerError::from(DbError::ConnectionError("refused".into())),
            LedgerError::StoreUnavailable(_)
        ));
        assert!(matches!(
            LedgerError::from(DbError::ConflictError("duplicate key".into())),
            LedgerError::ConsistencyConflict
        ));
        assert!(matches!(
            LedgerError::from(DbError::QueryError("syntax".into())),
            LedgerError::DatabaseError(_)
        ));
    }
}
