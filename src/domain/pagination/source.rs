//! Page source contract for push-down paging

use async_trait::async_trait;

use crate::domain::DomainError;

use super::comparator::Comparator;
use super::field::Sortable;
use super::order::OrderSpec;

#[cfg(test)]
use mockall::automock;

/// A queryable collection the paginator can count and slice.
///
/// The paginator issues `count` and then, if the requested window is not
/// empty, a single `fetch`. Implementations backed by a mutable store must
/// answer both calls from one consistent snapshot (for example one
/// transaction); the paginator does not provide that guarantee itself.
///
/// Field names in `order` have already been checked against the record's
/// field table when `fetch` is called.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PageSource<T: Send + Sync + 'static>: Send + Sync {
    /// Number of records in the source
    async fn count(&self) -> Result<usize, DomainError>;

    /// Records `skip..skip + take` of the source ordered by `order`.
    ///
    /// Records equal under every key must keep the source's natural order.
    async fn fetch(
        &self,
        skip: usize,
        take: usize,
        order: &OrderSpec,
    ) -> Result<Vec<T>, DomainError>;
}

/// Page source over an owned in-memory snapshot
#[derive(Debug, Clone)]
pub struct InMemoryPageSource<T> {
    items: Vec<T>,
}

impl<T> InMemoryPageSource<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> From<Vec<T>> for InMemoryPageSource<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

#[async_trait]
impl<T> PageSource<T> for InMemoryPageSource<T>
where
    T: Sortable + Clone + Send + Sync + 'static,
{
    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.items.len())
    }

    async fn fetch(
        &self,
        skip: usize,
        take: usize,
        order: &OrderSpec,
    ) -> Result<Vec<T>, DomainError> {
        let comparator = Comparator::<T>::for_record(order)?;

        if comparator.is_identity() {
            return Ok(self.items.iter().skip(skip).take(take).cloned().collect());
        }

        let mut ordered: Vec<&T> = self.items.iter().collect();
        ordered.sort_by(|a, b| comparator.compare(a, b));

        Ok(ordered.into_iter().skip(skip).take(take).cloned().collect())
    }
}
