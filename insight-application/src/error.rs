use anyhow::anyhow;
use thiserror::Error;

use insight_domain::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Connectivity(message) => AppError::Unavailable(message),
            StoreError::Unauthorized => {
                AppError::Unavailable("store rejected the service credentials".to_string())
            }
            StoreError::NotFound => AppError::NotFound("record not found".to_string()),
            other => AppError::Internal(anyhow!(other)),
        }
    }
}
