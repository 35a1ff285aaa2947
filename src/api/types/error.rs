//! API error envelope

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, FieldError};

/// Error categories reported in the `type` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorType {
    InvalidRequestError,
    NotFoundError,
    ConflictError,
    ServerError,
}

impl std::fmt::Display for ApiErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequestError => write!(f, "invalid_request_error"),
            Self::NotFoundError => write!(f, "not_found_error"),
            Self::ConflictError => write!(f, "conflict_error"),
            Self::ServerError => write!(f, "server_error"),
        }
    }
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

/// Error detail structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: ApiErrorType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Per-field validation failures
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, error_type: ApiErrorType, message: impl Into<String>) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                error: ApiErrorDetail {
                    message: message.into(),
                    error_type,
                    param: None,
                    code: None,
                    errors: Vec::new(),
                },
            },
        }
    }

    /// Add parameter info
    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.response.error.param = Some(param.into());
        self
    }

    /// Add error code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.response.error.code = Some(code.into());
        self
    }

    pub fn with_errors(mut self, errors: Vec<FieldError>) -> Self {
        self.response.error.errors = errors;
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ApiErrorType::InvalidRequestError, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, ApiErrorType::NotFoundError, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, ApiErrorType::ConflictError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, ApiErrorType::ServerError, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let message = err.to_string();

        match err {
            DomainError::NotFound { message } => Self::not_found(message),
            DomainError::InvalidFields { errors } => Self::bad_request(message)
                .with_code("validation_failed")
                .with_errors(errors),
            DomainError::InvalidId { message } => Self::bad_request(message).with_param("id"),
            DomainError::InvalidQuery { param, message } => {
                Self::bad_request(message).with_param(param)
            }
            DomainError::Conflict { message } => Self::conflict(message),
            DomainError::Internal { .. } | DomainError::Storage { .. } => {
                tracing::error!(error = %message, "Request failed");
                Self::internal("Internal server error")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.response.error.error_type, self.response.error.message
        )
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PaginationError;

    #[test]
    fn test_api_error_with_param() {
        let err = ApiError::bad_request("Invalid value")
            .with_param("_size")
            .with_code("invalid_type");

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.response.error.param, Some("_size".to_string()));
        assert_eq!(err.response.error.code, Some("invalid_type".to_string()));
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (DomainError::not_found("x"), StatusCode::NOT_FOUND),
            (DomainError::invalid_fields(vec![]), StatusCode::BAD_REQUEST),
            (DomainError::invalid_id("x"), StatusCode::BAD_REQUEST),
            (DomainError::invalid_query("_order", "x"), StatusCode::BAD_REQUEST),
            (DomainError::conflict("x"), StatusCode::CONFLICT),
            (DomainError::internal("x"), StatusCode::INTERNAL_SERVER_ERROR),
            (DomainError::storage("x"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (domain_err, status) in cases {
            assert_eq!(ApiError::from(domain_err).status, status);
        }
    }

    #[test]
    fn test_invalid_order_field_names_param() {
        let domain_err: DomainError = PaginationError::InvalidOrderField("age".to_string()).into();
        let api_err = ApiError::from(domain_err);

        assert_eq!(api_err.response.error.param.as_deref(), Some("_order"));
        assert!(api_err.response.error.message.contains("'age'"));
    }

    #[test]
    fn test_storage_details_are_not_exposed() {
        let api_err = ApiError::from(DomainError::storage("password=secret host=db"));
        assert!(!api_err.response.error.message.contains("secret"));
    }

    #[test]
    fn test_field_errors_serialization() {
        let api_err = ApiError::from(DomainError::invalid_fields(vec![FieldError::new(
            "address.zipcode",
            "Zipcode must have the format 00000-000",
        )]));

        let json = serde_json::to_value(&api_err.response).unwrap();
        assert_eq!(json["error"]["type"], "invalid_request_error");
        assert_eq!(json["error"]["code"], "validation_failed");
        assert_eq!(json["error"]["errors"][0]["field"], "address.zipcode");
    }

    #[test]
    fn test_empty_optional_fields_are_omitted() {
        let json = serde_json::to_value(&ApiError::not_found("User not found").response).unwrap();
        let detail = json["error"].as_object().unwrap();

        assert!(!detail.contains_key("param"));
        assert!(!detail.contains_key("code"));
        assert!(!detail.contains_key("errors"));
    }
}
