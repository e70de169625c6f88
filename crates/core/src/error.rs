use crate::erp_request::InvalidTransitionError;
use crate::types::RequestId;
use crate::validation::rules::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: RequestId },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransitionError),

    #[error("Configuration error: {0}")]
    Config(String),
}
