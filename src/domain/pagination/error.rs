use thiserror::Error;

/// Errors raised before any page is computed
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaginationError {
    #[error("Cannot order by '{0}': no such field")]
    InvalidOrderField(String),

    #[error("Page size must be at least 1, got {0}")]
    InvalidPageSize(i64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offender() {
        assert_eq!(
            PaginationError::InvalidOrderField("doesNotExist".to_string()).to_string(),
            "Cannot order by 'doesNotExist': no such field"
        );
        assert_eq!(
            PaginationError::InvalidPageSize(0).to_string(),
            "Page size must be at least 1, got 0"
        );
    }
}
