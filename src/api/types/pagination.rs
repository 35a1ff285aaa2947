//! Wire types for paged list endpoints

use serde::{Deserialize, Serialize};

use crate::config::PaginationConfig;
use crate::domain::{Page, PageRequest, PAGE_SIZE_PARAM};

use super::error::ApiError;

/// `_page`, `_size` and `_order` query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    #[serde(rename = "_page")]
    pub page: Option<i64>,
    #[serde(rename = "_size")]
    pub size: Option<i64>,
    #[serde(rename = "_order")]
    pub order: Option<String>,
}

impl PageQuery {
    /// Apply defaults and the configured size ceiling
    pub fn into_page_request(self, config: &PaginationConfig) -> Result<PageRequest, ApiError> {
        let page_size = self.size.unwrap_or(config.default_page_size);

        if page_size > config.max_page_size {
            return Err(ApiError::bad_request(format!(
                "Page size must not exceed {}, got {}",
                config.max_page_size, page_size
            ))
            .with_param(PAGE_SIZE_PARAM));
        }

        Ok(PageRequest {
            page_number: self.page.unwrap_or(1),
            page_size,
            order_by: self.order,
        })
    }
}

/// One page of items plus its position in the full listing
#[derive(Debug, Clone, Serialize)]
pub struct PaginatedResponse<T> {
    pub success: bool,
    pub data: Vec<T>,
    pub current_page: i64,
    pub total_pages: usize,
    pub page_size: usize,
    pub total_count: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl<T> From<Page<T>> for PaginatedResponse<T> {
    fn from(page: Page<T>) -> Self {
        Self {
            success: true,
            current_page: page.current_page(),
            total_pages: page.total_pages(),
            page_size: page.page_size(),
            total_count: page.total_count(),
            has_previous: page.has_previous(),
            has_next: page.has_next(),
            data: page.into_items(),
        }
    }
}
