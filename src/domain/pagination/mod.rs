//! Pagination domain
//!
//! Generic paging with dynamic multi-key ordering. A caller supplies a
//! collection of records, a page number, a page size and a comma-separated
//! ordering such as `"lastname asc, firstname desc"`; the result is one
//! [`Page`] of stably ordered records plus its position in the whole.
//!
//! Records opt in by implementing [`Sortable`], which exposes a table of
//! named field accessors. Collections are either paged in memory with
//! [`paginate`] or through a [`PageSource`] that pushes count, ordering and
//! skip/take down to storage with [`paginate_source`].

mod comparator;
mod error;
mod field;
mod order;
mod page;
mod paginator;
mod source;

pub use comparator::Comparator;
pub use error::PaginationError;
pub use field::{FieldAccessor, FieldMap, SortValue, Sortable};
pub use order::{OrderKey, OrderSpec};
pub use page::{Page, PageRequest, PageWindow};
pub use paginator::{paginate, paginate_source};
pub use source::{InMemoryPageSource, PageSource};

#[cfg(test)]
pub use source::MockPageSource;
