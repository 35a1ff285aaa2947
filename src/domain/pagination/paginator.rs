//! Page computation over in-memory sequences and page sources

use tracing::debug;

use crate::domain::DomainError;

use super::comparator::Comparator;
use super::error::PaginationError;
use super::field::Sortable;
use super::order::OrderSpec;
use super::page::{Page, PageRequest};
use super::source::PageSource;

/// Order `items` by `request.order_by` and cut out the requested page.
///
/// Unknown order fields and non-positive page sizes fail before any work is
/// done. Page numbers below 1 or past the last page yield an empty page with
/// correct metadata.
pub fn paginate<T: Sortable>(
    mut items: Vec<T>,
    request: &PageRequest,
) -> Result<Page<T>, PaginationError> {
    let spec = OrderSpec::parse(request.order_by());
    let comparator = Comparator::<T>::for_record(&spec)?;
    let window = request.window()?;

    let total_count = items.len();
    let take = window.take(total_count);

    let page_items = match window.skip() {
        Some(skip) if take > 0 => {
            comparator.sort(&mut items);
            items.drain(skip..skip + take).collect()
        }
        _ => Vec::new(),
    };

    Ok(Page::new(
        page_items,
        request.page_number,
        window.page_size(),
        total_count,
    ))
}

/// Same contract as [`paginate`], with counting and slicing pushed down to `source`
pub async fn paginate_source<T, S>(source: &S, request: &PageRequest) -> Result<Page<T>, DomainError>
where
    T: Sortable + Send + Sync + 'static,
    S: PageSource<T> + ?Sized,
{
    let spec = OrderSpec::parse(request.order_by());
    Comparator::<T>::for_record(&spec)?;
    let window = request.window()?;

    let total_count = source.count().await?;
    let take = window.take(total_count);

    let items = match window.skip() {
        Some(skip) if take > 0 => source.fetch(skip, take, &spec).await?,
        _ => Vec::new(),
    };

    debug!(
        page = request.page_number,
        page_size = window.page_size(),
        total_count,
        returned = items.len(),
        order_by = %spec,
        "Computed page"
    );

    Ok(Page::new(items, request.page_number, window.page_size(), total_count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pagination::field::{FieldMap, SortValue};
    use crate::domain::pagination::source::{InMemoryPageSource, MockPageSource};
    use once_cell::sync::Lazy;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: i64,
        last: String,
        first: String,
        group: i64,
    }

    static ROW_FIELDS: Lazy<FieldMap<Row>> = Lazy::new(|| {
        FieldMap::<Row>::new()
            .field("id", |r| SortValue::Int(r.id))
            .field("lastname", |r| SortValue::Text(&r.last))
            .field("firstname", |r| SortValue::Text(&r.first))
            .field("group", |r| SortValue::Int(r.group))
    });

    impl Sortable for Row {
        fn field_map() -> &'static FieldMap<Self> {
            &ROW_FIELDS
        }
    }

    fn row(id: i64, last: &str, first: &str, group: i64) -> Row {
        Row {
            id,
            last: last.to_string(),
            first: first.to_string(),
            group,
        }
    }

    fn numbered(count: i64) -> Vec<Row> {
        (1..=count).map(|i| row(i, "Doe", "Jo", i % 3)).collect()
    }

    fn ids(page: &Page<Row>) -> Vec<i64> {
        page.items().iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_page_size_invariant() {
        for size in 1..=8 {
            for number in 0..=10 {
                let page = paginate(numbered(17), &PageRequest::new(number, size)).unwrap();
                assert!(page.items().len() <= size as usize);
            }
        }
    }

    #[test]
    fn test_total_pages() {
        for (count, size, expected) in [(0, 3, 0), (1, 3, 1), (3, 3, 1), (4, 3, 2), (9, 3, 3)] {
            let page = paginate(numbered(count), &PageRequest::new(1, size)).unwrap();
            assert_eq!(page.total_pages(), expected);
            assert_eq!(page.total_count(), count as usize);
        }
    }

    #[test]
    fn test_pages_partition_the_ordered_source() {
        let source = numbered(11);
        let order = "group desc, id";

        let mut expected = source.clone();
        Comparator::<Row>::for_record(&OrderSpec::parse(Some(order)))
            .unwrap()
            .sort(&mut expected);

        let first = paginate(source.clone(), &PageRequest::new(1, 4).with_order_by(order)).unwrap();
        let mut collected = Vec::new();

        for number in 1..=first.total_pages() as i64 {
            let page =
                paginate(source.clone(), &PageRequest::new(number, 4).with_order_by(order)).unwrap();
            collected.extend(page.into_items());
        }

        assert_eq!(collected, expected);
    }

    #[test]
    fn test_repeated_calls_are_stable() {
        let source = numbered(12);
        let request = PageRequest::new(2, 5).with_order_by("group");

        let a = paginate(source.clone(), &request).unwrap();
        let b = paginate(source, &request).unwrap();

        assert_eq!(ids(&a), ids(&b));
    }

    #[test]
    fn test_ties_keep_source_order() {
        let source = vec![row(3, "Lee", "a", 0), row(1, "Ash", "b", 0), row(2, "Lee", "c", 0)];
        let page = paginate(source, &PageRequest::new(1, 10).with_order_by("lastname")).unwrap();

        assert_eq!(ids(&page), vec![1, 3, 2]);
    }

    #[test]
    fn test_empty_order_preserves_source_order() {
        let source = vec![row(5, "Zed", "z", 0), row(2, "Amy", "a", 0), row(9, "Kim", "k", 0)];

        for order in [None, Some(""), Some("   ")] {
            let mut request = PageRequest::new(1, 10);
            request.order_by = order.map(String::from);

            let page = paginate(source.clone(), &request).unwrap();
            assert_eq!(ids(&page), vec![5, 2, 9]);
        }
    }

    #[test]
    fn test_multi_key_ordering() {
        let source = vec![row(1, "Lee", "Amy", 0), row(2, "Lee", "Ben", 0), row(3, "Ash", "Cal", 0)];
        let request = PageRequest::new(1, 10).with_order_by("lastname asc, firstname desc");

        let page = paginate(source, &request).unwrap();
        let names: Vec<_> = page
            .items()
            .iter()
            .map(|r| format!("{}/{}", r.last, r.first))
            .collect();

        assert_eq!(names, vec!["Ash/Cal", "Lee/Ben", "Lee/Amy"]);
    }

    #[test]
    fn test_out_of_range_page() {
        let page = paginate(numbered(5), &PageRequest::new(10, 2)).unwrap();

        assert!(page.items().is_empty());
        assert_eq!(page.total_count(), 5);
        assert_eq!(page.total_pages(), 3);
        assert!(!page.has_next());
        assert!(page.has_previous());
    }

    #[test]
    fn test_non_positive_page_number_is_empty() {
        let page = paginate(numbered(5), &PageRequest::new(0, 2)).unwrap();

        assert!(page.items().is_empty());
        assert_eq!(page.total_pages(), 3);
        assert!(!page.has_previous());
        assert!(page.has_next());
    }

    #[test]
    fn test_invalid_field_fails_before_paging() {
        let err = paginate(numbered(5), &PageRequest::new(1, 2).with_order_by("doesNotExist"))
            .unwrap_err();

        assert_eq!(
            err,
            PaginationError::InvalidOrderField("doesNotExist".to_string())
        );
    }

    #[test]
    fn test_invalid_field_fails_on_empty_source() {
        let result = paginate(Vec::<Row>::new(), &PageRequest::new(1, 2).with_order_by("nope"));
        assert!(matches!(result, Err(PaginationError::InvalidOrderField(_))));
    }

    #[test]
    fn test_last_page_partially_filled() {
        let page = paginate(numbered(7), &PageRequest::new(4, 2)).unwrap();

        assert_eq!(ids(&page), vec![7]);
        assert_eq!(page.total_pages(), 4);
        assert!(!page.has_next());
    }

    #[test]
    fn test_invalid_page_size() {
        assert_eq!(
            paginate(numbered(3), &PageRequest::new(1, 0)).unwrap_err(),
            PaginationError::InvalidPageSize(0)
        );
    }

    #[tokio::test]
    async fn test_in_memory_source_matches_paginate() {
        let source = numbered(10);
        let request = PageRequest::new(2, 3).with_order_by("group desc, id desc");

        let direct = paginate(source.clone(), &request).unwrap();
        let pushed = paginate_source(&InMemoryPageSource::new(source), &request)
            .await
            .unwrap();

        assert_eq!(direct, pushed);
    }

    #[tokio::test]
    async fn test_source_not_fetched_for_out_of_range_page() {
        let mut source = MockPageSource::<Row>::new();
        source.expect_count().times(1).returning(|| Ok(5));
        source.expect_fetch().times(0);

        let page = paginate_source(&source, &PageRequest::new(10, 2)).await.unwrap();

        assert!(page.items().is_empty());
        assert_eq!(page.total_pages(), 3);
    }

    #[tokio::test]
    async fn test_source_receives_window_and_order() {
        let mut source = MockPageSource::<Row>::new();
        source.expect_count().returning(|| Ok(7));
        source
            .expect_fetch()
            .withf(|skip, take, order| {
                *skip == 6 && *take == 1 && order.to_string() == "lastname desc"
            })
            .times(1)
            .returning(|_, _, _| Ok(vec![row(7, "Doe", "Jo", 1)]));

        let request = PageRequest::new(4, 2).with_order_by("lastname DESC");
        let page = paginate_source(&source, &request).await.unwrap();

        assert_eq!(ids(&page), vec![7]);
        assert_eq!(page.total_count(), 7);
    }

    #[tokio::test]
    async fn test_source_invalid_field_skips_storage() {
        let mut source = MockPageSource::<Row>::new();
        source.expect_count().times(0);
        source.expect_fetch().times(0);

        let result =
            paginate_source(&source, &PageRequest::new(1, 2).with_order_by("unknown")).await;

        assert!(matches!(result, Err(DomainError::InvalidQuery { .. })));
    }

    #[tokio::test]
    async fn test_source_errors_propagate() {
        let mut source = MockPageSource::<Row>::new();
        source
            .expect_count()
            .returning(|| Err(DomainError::storage("connection lost")));

        let result = paginate_source(&source, &PageRequest::new(1, 2)).await;
        assert!(matches!(result, Err(DomainError::Storage { .. })));
    }
}
