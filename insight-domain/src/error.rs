use thiserror::Error;

/// Failure of a call into the hosted table store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unreachable: {0}")]
    Connectivity(String),
    #[error("record not found")]
    NotFound,
    #[error("store rejected the service credentials")]
    Unauthorized,
    #[error("store responded {status}: {message}")]
    Backend { status: u16, message: String },
    #[error("failed to decode store response: {0}")]
    Decode(String),
}

impl StoreError {
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::Connectivity(_) => "connectivity",
            StoreError::NotFound => "not_found",
            StoreError::Unauthorized => "unauthorized",
            StoreError::Backend { .. } => "backend",
            StoreError::Decode(_) => "decode",
        }
    }
}
