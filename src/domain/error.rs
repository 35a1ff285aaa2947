use thiserror::Error;

use super::pagination::PaginationError;
use super::validation::FieldError;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation failed: {} invalid field(s)", errors.len())]
    InvalidFields { errors: Vec<FieldError> },

    #[error("Invalid ID format: {message}")]
    InvalidId { message: String },

    #[error("Invalid query parameter '{param}': {message}")]
    InvalidQuery { param: String, message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

/// Query parameter carrying the ordering string
pub const ORDER_PARAM: &str = "_order";

/// Query parameter carrying the page size
pub const PAGE_SIZE_PARAM: &str = "_size";

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn invalid_fields(errors: Vec<FieldError>) -> Self {
        Self::InvalidFields { errors }
    }

    pub fn invalid_id(message: impl Into<String>) -> Self {
        Self::InvalidId {
            message: message.into(),
        }
    }

    pub fn invalid_query(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidQuery {
            param: param.into(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}

impl From<PaginationError> for DomainError {
    fn from(err: PaginationError) -> Self {
        let param = match err {
            PaginationError::InvalidOrderField(_) => ORDER_PARAM,
            PaginationError::InvalidPageSize(_) => PAGE_SIZE_PARAM,
        };

        Self::invalid_query(param, err.to_string())
    }
}
