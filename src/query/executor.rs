//! Query evaluation: full scan with optional early exit
//!
//! Every query is an O(row count) scan in ascending id order; there are no
//! index structures to consult.

use super::Query;
use crate::store::TableRows;
use crate::types::{Row, RowId, Value};

/// Scan a table's rows and collect matching ids in ascending id order.
///
/// With a limit, the scan stops as soon as that many matches are found
/// rather than filtering afterwards.
pub(crate) fn matching_ids(rows: &TableRows, query: &Query, limit: Option<usize>) -> Vec<RowId> {
    let mut ids = Vec::new();
    if limit == Some(0) {
        return ids;
    }
    for (id, row) in rows {
        if query.matches(row) {
            ids.push(*id);
            if Some(ids.len()) == limit {
                break;
            }
        }
    }
    ids
}

impl Query {
    /// Whether a single row satisfies this query.
    pub(crate) fn matches(&self, row: &Row) -> bool {
        match self {
            Query::All => true,
            Query::Values(map) => map.iter().all(|(field, wanted)| {
                row.get(field)
                    .map(|actual| value_matches(actual, wanted))
                    .unwrap_or(false)
            }),
            Query::Predicate(f) => f(row),
        }
    }
}

/// Two-branch comparator for value-match queries: text query values
/// compare case-insensitively against the stringified row value, anything
/// else compares under loose numeric/boolean/null coercion.
fn value_matches(actual: &Value, wanted: &Value) -> bool {
    match wanted {
        Value::Text(want) => match actual {
            // a null row value never matches a text query
            Value::Null => false,
            other => other.to_string().to_lowercase() == want.to_lowercase(),
        },
        other => loosely_equal(actual, other),
    }
}

/// Loose equality: null equals only null; everything else compares
/// numerically after coercion (booleans as 0/1, numeric text parsed).
fn loosely_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        _ => match (a.coerce_number(), b.coerce_number()) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        },
    }
}
