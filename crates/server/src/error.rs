//! Errors surfaced by the recommendation service.
//!
//! Each variant corresponds to one response class of the request-facing
//! contract: `NotFound` (404), `InvalidParameter` (422), and
//! `DataUnavailable` / `Internal` (500).

use recommenders::RecommendError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    /// Data or model not loaded
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Unexpected failure; the underlying message is kept
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// HTTP status code an API layer should answer with
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::NotFound(_) => 404,
            ServiceError::InvalidParameter { .. } => 422,
            ServiceError::DataUnavailable(_) | ServiceError::Internal(_) => 500,
        }
    }
}

impl From<RecommendError> for ServiceError {
    fn from(err: RecommendError) -> Self {
        match err {
            RecommendError::NotFitted(_) | RecommendError::DataUnavailable(_) => {
                ServiceError::DataUnavailable(err.to_string())
            }
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
