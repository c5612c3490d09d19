//! In-memory row store
//!
//! Maps each table name to its rows, keyed by row id. Purely in-memory;
//! persistence is handled a level up by serializing the whole database
//! state.

use crate::types::{Row, RowId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Rows of one table, keyed by row id. `BTreeMap` keeps iteration in
/// ascending id order, which is id-assignment order.
pub type TableRows = BTreeMap<RowId, Row>;

/// Row storage for all tables.
///
/// Serializes transparently as the `data` half of the persisted database
/// document; numeric row ids become JSON object keys in text form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowStore {
    tables: HashMap<String, TableRows>,
}

impl RowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty row map for a table.
    pub fn create(&mut self, name: &str) {
        self.tables.insert(name.to_string(), TableRows::new());
    }

    /// Drop a table's rows entirely.
    pub fn remove(&mut self, name: &str) -> Option<TableRows> {
        self.tables.remove(name)
    }

    /// Empty a table's rows, keeping the table itself.
    pub fn clear(&mut self, name: &str) {
        if let Some(rows) = self.tables.get_mut(name) {
            rows.clear();
        }
    }

    pub fn rows(&self, name: &str) -> Option<&TableRows> {
        self.tables.get(name)
    }

    pub fn rows_mut(&mut self, name: &str) -> Option<&mut TableRows> {
        self.tables.get_mut(name)
    }

    /// Number of rows in a table, by enumeration.
    pub fn row_count(&self, name: &str) -> usize {
        self.tables.get(name).map(|rows| rows.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Value;

    fn row(title: &str) -> Row {
        let mut row = Row::new();
        row.insert("title".into(), Value::Text(title.into()));
        row
    }

    #[test]
    fn test_create_insert_count() {
        let mut store = RowStore::new();
        store.create("books");
        assert_eq!(store.row_count("books"), 0);

        store.rows_mut("books").unwrap().insert(1, row("Freakonomics"));
        store.rows_mut("books").unwrap().insert(2, row("Phantoms"));
        assert_eq!(store.row_count("books"), 2);
    }

    #[test]
    fn test_iteration_is_ascending_id_order() {
        let mut store = RowStore::new();
        store.create("books");
        let rows = store.rows_mut("books").unwrap();
        rows.insert(3, row("c"));
        rows.insert(1, row("a"));
        rows.insert(2, row("b"));

        let ids: Vec<RowId> = store.rows("books").unwrap().keys().copied().collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_clear_and_remove() {
        let mut store = RowStore::new();
        store.create("books");
        store.rows_mut("books").unwrap().insert(1, row("a"));

        store.clear("books");
        assert_eq!(store.row_count("books"), 0);
        assert!(store.rows("books").is_some());

        store.remove("books");
        assert!(store.rows("books").is_none());
    }

    #[test]
    fn test_serde_text_keys() {
        let mut store = RowStore::new();
        store.create("books");
        store.rows_mut("books").unwrap().insert(1, Row::new());

        let json = serde_json::to_string(&store).unwrap();
        assert_eq!(json, r#"{"books":{"1":{}}}"#);

        let back: RowStore = serde_json::from_str(&json).unwrap();
        assert_eq!(back.row_count("books"), 1);
        assert!(back.rows("books").unwrap().contains_key(&1));
    }
}
