//! Composite comparator chaining ordering keys

use std::cmp::Ordering;

use super::error::PaginationError;
use super::field::{FieldAccessor, FieldMap, Sortable};
use super::order::OrderSpec;

struct ResolvedKey<T> {
    accessor: FieldAccessor<T>,
    descending: bool,
}

/// Compares two records key by key; the first non-equal key decides.
///
/// An empty comparator reports every pair as equal, which combined with a
/// stable sort leaves the source order untouched.
pub struct Comparator<T> {
    keys: Vec<ResolvedKey<T>>,
}

impl<T> Comparator<T> {
    /// Resolve every key against `fields`, failing on the first unknown name
    pub fn build(spec: &OrderSpec, fields: &FieldMap<T>) -> Result<Self, PaginationError> {
        let keys = spec
            .iter()
            .map(|key| {
                fields
                    .get(key.field())
                    .map(|accessor| ResolvedKey {
                        accessor,
                        descending: key.is_descending(),
                    })
                    .ok_or_else(|| PaginationError::InvalidOrderField(key.field().to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { keys })
    }

    pub fn is_identity(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        for key in &self.keys {
            let ordering = (key.accessor)(a).cmp(&(key.accessor)(b));
            let ordering = if key.descending {
                ordering.reverse()
            } else {
                ordering
            };

            if ordering != Ordering::Equal {
                return ordering;
            }
        }

        Ordering::Equal
    }

    /// Stable in-place sort; elements equal under every key keep their relative order
    pub fn sort(&self, items: &mut [T]) {
        if self.is_identity() {
            return;
        }
        items.sort_by(|a, b| self.compare(a, b));
    }
}

impl<T: Sortable> Comparator<T> {
    /// Build against the record type's own field table
    pub fn for_record(spec: &OrderSpec) -> Result<Self, PaginationError> {
        Self::build(spec, T::field_map())
    }
}

impl<T> std::fmt::Debug for Comparator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Comparator")
            .field("keys", &self.keys.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pagination::field::SortValue;

    #[derive(Debug, Clone, PartialEq)]
    struct Person {
        last: &'static str,
        first: &'static str,
        age: i64,
    }

    fn fields() -> FieldMap<Person> {
        FieldMap::<Person>::new()
            .field("lastname", |p| SortValue::Text(p.last))
            .field("firstname", |p| SortValue::Text(p.first))
            .field("age", |p| SortValue::Int(p.age))
    }

    fn person(last: &'static str, first: &'static str, age: i64) -> Person {
        Person { last, first, age }
    }

    #[test]
    fn test_empty_spec_is_identity() {
        let comparator = Comparator::build(&OrderSpec::default(), &fields()).unwrap();
        let a = person("Lee", "Amy", 1);
        let b = person("Ash", "Cal", 2);

        assert!(comparator.is_identity());
        assert_eq!(comparator.compare(&a, &b), Ordering::Equal);
    }

    #[test]
    fn test_primary_then_tie_breaker() {
        let spec = OrderSpec::parse(Some("lastname asc, firstname desc"));
        let comparator = Comparator::build(&spec, &fields()).unwrap();

        let mut people = vec![
            person("Lee", "Amy", 30),
            person("Lee", "Ben", 25),
            person("Ash", "Cal", 40),
        ];
        comparator.sort(&mut people);

        let names: Vec<_> = people.iter().map(|p| (p.last, p.first)).collect();
        assert_eq!(names, vec![("Ash", "Cal"), ("Lee", "Ben"), ("Lee", "Amy")]);
    }

    #[test]
    fn test_numeric_descending() {
        let spec = OrderSpec::parse(Some("age desc"));
        let comparator = Comparator::build(&spec, &fields()).unwrap();

        let mut people = vec![person("A", "a", 9), person("B", "b", 10), person("C", "c", 2)];
        comparator.sort(&mut people);

        let ages: Vec<_> = people.iter().map(|p| p.age).collect();
        assert_eq!(ages, vec![10, 9, 2]);
    }

    #[test]
    fn test_equal_elements_keep_source_order() {
        let spec = OrderSpec::parse(Some("lastname"));
        let comparator = Comparator::build(&spec, &fields()).unwrap();

        let mut people = vec![
            person("Lee", "first", 1),
            person("Ash", "x", 2),
            person("Lee", "second", 3),
            person("Lee", "third", 4),
        ];
        comparator.sort(&mut people);

        let firsts: Vec<_> = people.iter().map(|p| p.first).collect();
        assert_eq!(firsts, vec!["x", "first", "second", "third"]);
    }

    #[test]
    fn test_unknown_field_fails_fast() {
        let spec = OrderSpec::parse(Some("lastname, doesNotExist desc, age"));
        let err = Comparator::build(&spec, &fields()).unwrap_err();

        assert_eq!(
            err,
            PaginationError::InvalidOrderField("doesNotExist".to_string())
        );
    }

    #[test]
    fn test_field_names_are_case_sensitive() {
        let spec = OrderSpec::parse(Some("LastName"));
        assert!(Comparator::build(&spec, &fields()).is_err());
    }
}
