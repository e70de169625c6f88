use erp_adapter_core::error::CoreError;
use erp_adapter_core::erp_request::InvalidTransitionError;
use erp_adapter_core::validation::rules::ValidationError;

/// Errors from the persistence adapter.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A domain-level error from `erp_adapter_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<ValidationError> for DbError {
    fn from(e: ValidationError) -> Self {
        Self::Core(CoreError::Validation(e))
    }
}

impl From<InvalidTransitionError> for DbError {
    fn from(e: InvalidTransitionError) -> Self {
        Self::Core(CoreError::InvalidTransition(e))
    }
}

/// Convenience alias for adapter results.
pub type DbResult<T> = Result<T, DbError>;
