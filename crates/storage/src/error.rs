use sqlx::error::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn is_not_null_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if matches!(e.kind(), ErrorKind::NotNullViolation)
        )
    }

    pub fn is_check_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if matches!(e.kind(), ErrorKind::CheckViolation)
        )
    }

    /// The backend could not be reached at all, as opposed to rejecting a statement.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            StorageError::Database(
                sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
            )
        )
    }

    /// Turns constraint failures reported by the driver into `ConstraintViolation`.
    pub(crate) fn classify(self) -> Self {
        if self.is_not_null_violation() || self.is_check_violation() {
            let message = match &self {
                StorageError::Database(sqlx::Error::Database(e)) => e.message().to_string(),
                other => other.to_string(),
            };
            return StorageError::ConstraintViolation(message);
        }
        self
    }
}
