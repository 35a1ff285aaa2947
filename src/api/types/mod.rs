//! Request and response types shared by API handlers

pub mod error;
pub mod json;
pub mod pagination;

pub use error::{ApiError, ApiErrorDetail, ApiErrorResponse, ApiErrorType};
pub use json::Json;
pub use pagination::{PageQuery, PaginatedResponse};
