//! Name-based field access for record types
//!
//! Records expose their orderable fields through an explicit accessor table
//! so the paginator can order any record shape by a field name that only
//! arrives at runtime.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A field value extracted from a record for comparison
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortValue<'a> {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(&'a str),
    Uuid(Uuid),
    Timestamp(DateTime<Utc>),
}

impl SortValue<'_> {
    fn rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Int(_) => 2,
            Self::Float(_) => 3,
            Self::Text(_) => 4,
            Self::Uuid(_) => 5,
            Self::Timestamp(_) => 6,
        }
    }
}

impl Eq for SortValue<'_> {}

impl PartialOrd for SortValue<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortValue<'_> {
    /// Natural ordering within a kind; values of different kinds order by kind.
    ///
    /// Nulls sort first. Integers and floats compare numerically with each
    /// other, floats use IEEE total ordering, text compares ordinally.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Null, Self::Null) => Ordering::Equal,
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Float(a), Self::Float(b)) => a.total_cmp(b),
            (Self::Int(a), Self::Float(b)) => (*a as f64).total_cmp(b),
            (Self::Float(a), Self::Int(b)) => a.total_cmp(&(*b as f64)),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Uuid(a), Self::Uuid(b)) => a.cmp(b),
            (Self::Timestamp(a), Self::Timestamp(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl<'a, V> From<Option<V>> for SortValue<'a>
where
    V: Into<SortValue<'a>>,
{
    fn from(value: Option<V>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<'a> From<&'a str> for SortValue<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for SortValue<'_> {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for SortValue<'_> {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for SortValue<'_> {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for SortValue<'_> {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<Uuid> for SortValue<'_> {
    fn from(value: Uuid) -> Self {
        Self::Uuid(value)
    }
}

impl From<DateTime<Utc>> for SortValue<'_> {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

/// Extracts one field of `T` as a comparable value
pub type FieldAccessor<T> = for<'a> fn(&'a T) -> SortValue<'a>;

/// Case-sensitive table of field name to accessor
pub struct FieldMap<T> {
    fields: HashMap<&'static str, FieldAccessor<T>>,
}

impl<T> FieldMap<T> {
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    /// Register a field accessor
    pub fn field(mut self, name: &'static str, accessor: FieldAccessor<T>) -> Self {
        self.fields.insert(name, accessor);
        self
    }

    pub fn get(&self, name: &str) -> Option<FieldAccessor<T>> {
        self.fields.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Registered field names, sorted
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.fields.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl<T> Default for FieldMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for FieldMap<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldMap")
            .field("fields", &self.names())
            .finish()
    }
}

/// Record types that can be ordered by field name
pub trait Sortable: Sized + 'static {
    fn field_map() -> &'static FieldMap<Self>;
}
