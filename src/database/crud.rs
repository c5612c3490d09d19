//! Row operations
//!
//! The read path resolves matching ids through the scan engine and clones
//! rows out through the projector. Mutations resolve ids the same way and
//! then write through the schema filter, so a stored row only ever carries
//! schema fields and an engine-assigned `ID`.

use crate::error::Result;
use crate::query::{matching_ids, project, Query, QueryParams};
use crate::types::{Row, RowId, Value, ID_FIELD};

use super::core::Database;

/// Outcome of `insert_or_update`.
#[derive(Debug, Clone, PartialEq)]
pub enum Upsert {
    /// Nothing matched the query; a new row was inserted with this id.
    Inserted(RowId),
    /// The data was applied to every matched row.
    Updated(Vec<RowId>),
}

impl Database {
    /// Insert a row, returning its assigned id.
    ///
    /// Incoming data is coerced against the schema: unknown fields are
    /// dropped, missing fields become `Null`, and any supplied `ID` is
    /// ignored in favor of the table's counter.
    pub fn insert(&mut self, table: &str, data: Row) -> Result<RowId> {
        let row = self.schema(table)?.coerce(&data);
        self.insert_coerced(table, row)
    }

    /// Update rows matching `query` through a transform.
    ///
    /// The transform receives a snapshot clone of each matched row.
    /// Returning `Some(data)` merges the data's fields onto the stored row
    /// (an `ID` in the data is discarded) and re-filters it to the schema;
    /// returning `None` leaves the row untouched and uncounted. Returns
    /// the number of rows actually updated.
    pub fn update<F>(&mut self, table: &str, query: Query, mut transform: F) -> Result<usize>
    where
        F: FnMut(Row) -> Option<Row>,
    {
        let ids = self.matched_ids(table, query, None)?;
        self.apply_update(table, &ids, &mut transform)
    }

    /// Delete rows matching `query`, returning the number removed.
    pub fn delete_rows(&mut self, table: &str, query: Query) -> Result<usize> {
        let ids = self.matched_ids(table, query, None)?;
        let rows = self.rows_mut(table)?;
        let mut removed = 0;
        for id in &ids {
            if rows.remove(id).is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Insert `data` as a new row if nothing matches `query`, otherwise
    /// apply it to every matched row through the update merge path.
    pub fn insert_or_update(&mut self, table: &str, query: Query, data: Row) -> Result<Upsert> {
        let ids = self.matched_ids(table, query, None)?;
        if ids.is_empty() {
            let row = self.schema(table)?.coerce(&data);
            Ok(Upsert::Inserted(self.insert_coerced(table, row)?))
        } else {
            self.apply_update(table, &ids, &mut |_| Some(data.clone()))?;
            Ok(Upsert::Updated(ids))
        }
    }

    /// Rows matching `query`, in id order, optionally capped at `limit`
    /// matches during the scan. Returned rows are independent clones.
    pub fn query(&self, table: &str, query: Query, limit: Option<usize>) -> Result<Vec<Row>> {
        let ids = self.matched_ids(table, query, limit)?;
        self.select(table, &ids)
    }

    /// Keyword-style read: query plus sort, offset, and limit.
    ///
    /// With sort keys present, all matches are collected so the sort runs
    /// over the full match set and `limit`/`start` slice the sorted
    /// result; without sort keys the scan short-circuits once
    /// `start + limit` matches are found.
    pub fn query_all(&self, table: &str, params: QueryParams) -> Result<Vec<Row>> {
        let QueryParams {
            query,
            limit,
            start,
            sort,
        } = params;

        let scan_cap = if sort.is_empty() {
            limit.map(|cap| cap.saturating_add(start.unwrap_or(0)))
        } else {
            None
        };

        let ids = self.matched_ids(table, query, scan_cap)?;
        let matched = self.select(table, &ids)?;
        Ok(project(matched, &sort, start, limit))
    }

    // ==================== Internal helpers ====================

    /// Resolve the ids matching a query, in ascending id order. The
    /// value-match map is filtered to schema fields before the scan.
    fn matched_ids(&self, table: &str, query: Query, limit: Option<usize>) -> Result<Vec<RowId>> {
        let query = query.filtered(self.schema(table)?);
        Ok(matching_ids(self.rows(table)?, &query, limit))
    }

    /// Clone the rows for a list of ids.
    fn select(&self, table: &str, ids: &[RowId]) -> Result<Vec<Row>> {
        let rows = self.rows(table)?;
        Ok(ids.iter().filter_map(|id| rows.get(id).cloned()).collect())
    }

    /// Store a schema-coerced row under a freshly allocated id.
    pub(crate) fn insert_coerced(&mut self, table: &str, mut row: Row) -> Result<RowId> {
        let id = self.schema_mut(table)?.allocate_id();
        row.insert(ID_FIELD.to_string(), Value::Integer(id as i64));
        self.rows_mut(table)?.insert(id, row);
        Ok(id)
    }

    /// Run the update transform over a resolved id set.
    fn apply_update<F>(&mut self, table: &str, ids: &[RowId], transform: &mut F) -> Result<usize>
    where
        F: FnMut(Row) -> Option<Row>,
    {
        let schema = self.schema(table)?.clone();
        let rows = self.rows_mut(table)?;
        let mut updated = 0;

        for id in ids {
            let snapshot = match rows.get(id) {
                Some(row) => row.clone(),
                None => continue,
            };
            if let Some(mut new_data) = transform(snapshot) {
                new_data.remove(ID_FIELD);
                if let Some(stored) = rows.get_mut(id) {
                    for (field, value) in new_data {
                        stored.insert(field, value);
                    }
                    schema.retain_schema_fields(stored);
                    updated += 1;
                }
            }
        }
        Ok(updated)
    }
}
