use sea_orm::error::{DbErr, SqlErr};
use thiserror::Error;

/// Error type for schema and seeding operations.
///
/// Storage failures are classified into a small closed set instead of a
/// single catch-all: connection problems, constraint violations, and
/// malformed input each get their own variant so callers can tell a dead
/// database apart from a duplicate SKU.
#[derive(Debug, Error)]
pub enum OpsError {
    #[error("database connectivity error: {0}")]
    Connectivity(String),

    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("database error: {0}")]
    Database(DbErr),
}

impl From<DbErr> for OpsError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => OpsError::ConstraintViolation(msg),
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => OpsError::ConstraintViolation(msg),
            _ => match err {
                DbErr::Conn(e) => OpsError::Connectivity(e.to_string()),
                DbErr::ConnectionAcquire(e) => OpsError::Connectivity(e.to_string()),
                other => OpsError::Database(other),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::RuntimeErr;

    #[test]
    fn connection_errors_classify_as_connectivity() {
        let err = OpsError::from(DbErr::Conn(RuntimeErr::Internal(
            "connection refused".to_string(),
        )));
        assert!(matches!(err, OpsError::Connectivity(_)));
    }

    #[test]
    fn other_errors_pass_through() {
        let err = OpsError::from(DbErr::Custom("boom".to_string()));
        assert!(matches!(err, OpsError::Database(_)));
    }
}
