//! Page snapshot and page request types

use serde::{Deserialize, Serialize};

use super::error::PaginationError;

/// Caller input for one page: raw page number, page size and ordering string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page_number: i64,
    pub page_size: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
}

impl PageRequest {
    pub fn new(page_number: i64, page_size: i64) -> Self {
        Self {
            page_number,
            page_size,
            order_by: None,
        }
    }

    pub fn with_order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    pub fn order_by(&self) -> Option<&str> {
        self.order_by.as_deref()
    }

    /// Resolve the request into a skip/take window.
    ///
    /// Fails only for a non-positive page size.
    pub fn window(&self) -> Result<PageWindow, PaginationError> {
        let page_size = usize::try_from(self.page_size)
            .ok()
            .filter(|size| *size > 0)
            .ok_or(PaginationError::InvalidPageSize(self.page_size))?;

        // Page numbers below 1 and offsets that overflow select nothing
        let skip = if self.page_number > 0 {
            usize::try_from(self.page_number - 1)
                .ok()
                .and_then(|previous_pages| previous_pages.checked_mul(page_size))
        } else {
            None
        };

        Ok(PageWindow { skip, page_size })
    }
}

/// Skip/take bounds derived from a validated request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    skip: Option<usize>,
    page_size: usize,
}

impl PageWindow {
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Offset of the first item, `None` when the page selects nothing
    pub fn skip(&self) -> Option<usize> {
        self.skip
    }

    /// Whether this window selects at least one of `total_count` items
    pub fn overlaps(&self, total_count: usize) -> bool {
        self.skip.is_some_and(|skip| skip < total_count)
    }

    /// Number of items the window yields out of `total_count`
    pub fn take(&self, total_count: usize) -> usize {
        match self.skip {
            Some(skip) if skip < total_count => self.page_size.min(total_count - skip),
            _ => 0,
        }
    }
}

/// One bounded slice of an ordered sequence plus its position in the whole.
///
/// Computed fresh per call; holds no reference back to its source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    items: Vec<T>,
    current_page: i64,
    total_pages: usize,
    page_size: usize,
    total_count: usize,
}

impl<T> Page<T> {
    /// Assemble a page; `total_pages` is derived from the count and page size
    pub(crate) fn new(items: Vec<T>, current_page: i64, page_size: usize, total_count: usize) -> Self {
        debug_assert!(page_size > 0);
        debug_assert!(items.len() <= page_size);

        Self {
            items,
            current_page,
            total_pages: total_count.div_ceil(page_size),
            page_size,
            total_count,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn current_page(&self) -> i64 {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        i64::try_from(self.total_pages).map_or(true, |total| self.current_page < total)
    }

    /// Convert the items while keeping the pagination metadata
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            current_page: self.current_page,
            total_pages: self.total_pages,
            page_size: self.page_size,
            total_count: self.total_count,
        }
    }
}
