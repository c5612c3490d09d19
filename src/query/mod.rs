//! Queries and the scan/projection engine

mod executor;
mod projector;

pub(crate) use executor::matching_ids;
pub(crate) use projector::project;

use crate::types::{Row, TableSchema, Value};
use std::collections::HashMap;
use std::fmt;

/// What a read or mutation should match: everything, a set of
/// field/value pairs, or an arbitrary predicate.
pub enum Query {
    /// Match every row.
    All,

    /// Match rows whose values equal every entry of the map. Text values
    /// compare case-insensitively; other values compare loosely
    /// (numeric/boolean coercion).
    Values(HashMap<String, Value>),

    /// Match rows for which the predicate returns `true`. The predicate
    /// sees a snapshot reference and cannot mutate stored state.
    Predicate(Box<dyn Fn(&Row) -> bool>),
}

impl Query {
    /// Build a value-match query from field/value pairs.
    pub fn by_values<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Query::Values(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build a predicate query from a row function.
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&Row) -> bool + 'static,
    {
        Query::Predicate(Box::new(f))
    }

    /// Restrict a value-match map to fields present in the schema. The
    /// scan engine trusts its input to be schema-filtered already.
    pub(crate) fn filtered(self, schema: &TableSchema) -> Self {
        match self {
            Query::Values(map) => Query::Values(schema.filter_fields(&map)),
            other => other,
        }
    }
}

impl Default for Query {
    fn default() -> Self {
        Query::All
    }
}

impl fmt::Debug for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::All => write!(f, "Query::All"),
            Query::Values(map) => f.debug_tuple("Query::Values").field(map).finish(),
            Query::Predicate(_) => write!(f, "Query::Predicate(..)"),
        }
    }
}

/// Sort direction for a sort key, ascending unless stated otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Keyword-style parameters for `Database::query_all`.
///
/// ```
/// use slotdb::{QueryParams, Query, SortDirection};
///
/// let params = QueryParams::new()
///     .with_query(Query::by_values([("author", "Ramachandran")]))
///     .sort_by("year", SortDirection::Ascending)
///     .with_start(2)
///     .with_limit(3);
/// ```
#[derive(Debug, Default)]
pub struct QueryParams {
    pub(crate) query: Query,
    pub(crate) limit: Option<usize>,
    pub(crate) start: Option<usize>,
    pub(crate) sort: Vec<(String, SortDirection)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: Query) -> Self {
        self.query = query;
        self
    }

    /// Cap the number of returned rows.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skip this many rows before returning results.
    pub fn with_start(mut self, start: usize) -> Self {
        self.start = Some(start);
        self
    }

    /// Append a sort key; earlier keys take priority.
    pub fn sort_by(mut self, field: &str, direction: SortDirection) -> Self {
        self.sort.push((field.to_string(), direction));
        self
    }
}
