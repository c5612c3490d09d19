//! Result projection: multi-key sort and offset/limit slicing

use super::SortDirection;
use crate::types::{Row, Value};
use std::cmp::Ordering;

/// Sort matched rows by the given keys (first key highest priority), then
/// slice `[start, start + limit)`. The sort is stable, so ties keep the
/// order the matches arrived in.
pub(crate) fn project(
    mut rows: Vec<Row>,
    sort: &[(String, SortDirection)],
    start: Option<usize>,
    limit: Option<usize>,
) -> Vec<Row> {
    if !sort.is_empty() {
        rows.sort_by(|a, b| compare_rows(a, b, sort));
    }
    rows.into_iter()
        .skip(start.unwrap_or(0))
        .take(limit.unwrap_or(usize::MAX))
        .collect()
}

fn compare_rows(a: &Row, b: &Row, keys: &[(String, SortDirection)]) -> Ordering {
    for (field, direction) in keys {
        let left = a.get(field).unwrap_or(&Value::Null);
        let right = b.get(field).unwrap_or(&Value::Null);
        let ordering = match direction {
            SortDirection::Ascending => compare_values(left, right),
            SortDirection::Descending => compare_values(right, left),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Total order over values for sorting: nulls, then booleans, then
/// numbers (compared as f64), then text.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    fn rank(value: &Value) -> u8 {
        match value {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Integer(_) | Value::Float(_) => 2,
            Value::Text(_) => 3,
        }
    }

    fn numeric(value: &Value) -> Option<f64> {
        match value {
            Value::Integer(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Integer(x), Value::Integer(y)) => x.cmp(y),
        (Value::Text(x), Value::Text(y)) => x.cmp(y),
        _ => match (numeric(a), numeric(b)) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            _ => rank(a).cmp(&rank(b)),
        },
    }
}
