//! Ordering keys parsed from a free-form `order_by` string

use serde::Serialize;

/// Direction word that selects descending order (compared case-insensitively)
const DESCENDING_WORD: &str = "desc";

/// A single `(field, direction)` pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderKey {
    field: String,
    descending: bool,
}

impl OrderKey {
    pub fn new(field: impl Into<String>, descending: bool) -> Self {
        Self {
            field: field.into(),
            descending,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, false)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, true)
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn is_descending(&self) -> bool {
        self.descending
    }
}

/// Ordered list of keys: the first is the primary sort, the rest break ties in sequence
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OrderSpec(Vec<OrderKey>);

impl OrderSpec {
    /// Parse a comma-separated ordering such as `"lastname asc, firstname desc"`.
    ///
    /// Never fails. Blank tokens are skipped, any direction word other than
    /// `desc` means ascending, and duplicate fields are kept as redundant
    /// tie-breakers. Field names are not checked here; that happens when the
    /// comparator is built against a concrete record type.
    pub fn parse(order_by: Option<&str>) -> Self {
        let Some(raw) = order_by else {
            return Self::default();
        };

        let keys = raw
            .split(',')
            .filter_map(|token| {
                let mut words = token.split_whitespace();
                let field = words.next()?;
                let descending = words
                    .next()
                    .is_some_and(|word| word.eq_ignore_ascii_case(DESCENDING_WORD));

                Some(OrderKey::new(field, descending))
            })
            .collect();

        Self(keys)
    }

    pub fn keys(&self) -> &[OrderKey] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OrderKey> {
        self.0.iter()
    }
}

impl From<Vec<OrderKey>> for OrderSpec {
    fn from(keys: Vec<OrderKey>) -> Self {
        Self(keys)
    }
}

impl<'a> IntoIterator for &'a OrderSpec {
    type Item = &'a OrderKey;
    type IntoIter = std::slice::Iter<'a, OrderKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::fmt::Display for OrderSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, key) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            let direction = if key.descending { "desc" } else { "asc" };
            write!(f, "{} {}", key.field, direction)?;
        }
        Ok(())
    }
}
