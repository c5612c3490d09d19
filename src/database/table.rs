//! Table management
//!
//! Table creation, alteration, and the schema accessors. Every operation
//! taking a table name checks existence before touching any state.

use crate::error::{DbError, Result};
use crate::naming::check_name;
use crate::types::{Row, RowId, Value, ID_FIELD};

use super::core::Database;
use std::collections::HashMap;

/// Default values applied to existing rows when new fields are added
/// through `alter_table`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldDefaults {
    /// Every added field receives this value in every existing row.
    Uniform(Value),
    /// Each added field takes its value from this map; fields absent from
    /// the map default to `Null`.
    PerField(HashMap<String, Value>),
}

impl Database {
    /// Create a table with the given fields.
    ///
    /// The field list is de-duplicated; `ID` is reserved and always the
    /// first field. Fails with `TableExists` on collision and with
    /// `InvalidName` if the table or any field name is invalid.
    pub fn create_table(&mut self, name: &str, fields: &[&str]) -> Result<()> {
        self.state.tables.create(name, fields)?;
        self.state.data.create(name);
        Ok(())
    }

    /// Create a table and bulk-insert the given records, inferring the
    /// field list from the first record (non-`ID` names in sorted order).
    ///
    /// Returns the ids of the inserted rows. Fails with `MalformedInput`
    /// on an empty record list, before any schema is registered.
    pub fn create_table_with_data(&mut self, name: &str, records: Vec<Row>) -> Result<Vec<RowId>> {
        let first = records
            .first()
            .ok_or_else(|| DbError::MalformedInput("no records to infer fields from".into()))?;

        let mut inferred: Vec<&str> = first
            .keys()
            .map(String::as_str)
            .filter(|field| *field != ID_FIELD)
            .collect();
        inferred.sort_unstable();

        self.create_table(name, &inferred)?;

        let mut ids = Vec::with_capacity(records.len());
        for record in records {
            ids.push(self.insert(name, record)?);
        }
        Ok(ids)
    }

    /// Remove a table's schema and all of its rows.
    pub fn drop_table(&mut self, name: &str) -> Result<()> {
        self.require_table(name)?;
        self.state.tables.remove(name);
        self.state.data.remove(name);
        Ok(())
    }

    /// Empty a table's rows and reset its id counter to 1, keeping the
    /// field list.
    pub fn truncate(&mut self, name: &str) -> Result<()> {
        self.schema_mut(name)?.reset_counter();
        self.state.data.clear(name);
        Ok(())
    }

    /// Append new fields to a table's schema.
    ///
    /// Names are validated up front; an invalid name fails the whole call
    /// with nothing applied. Requested names that already exist (and `ID`)
    /// are skipped. With `defaults` given, every existing row receives a
    /// value for each field actually added.
    pub fn alter_table(
        &mut self,
        name: &str,
        new_fields: &[&str],
        defaults: Option<FieldDefaults>,
    ) -> Result<()> {
        self.require_table(name)?;
        for field in new_fields {
            check_name(field)?;
        }

        let added = self.schema_mut(name)?.append_fields(new_fields);
        if added.is_empty() {
            return Ok(());
        }

        if let Some(defaults) = defaults {
            let rows = self.rows_mut(name)?;
            for row in rows.values_mut() {
                for field in &added {
                    let value = match &defaults {
                        FieldDefaults::Uniform(value) => value.clone(),
                        FieldDefaults::PerField(map) => {
                            map.get(field).cloned().unwrap_or(Value::Null)
                        }
                    };
                    row.insert(field.clone(), value);
                }
            }
        }
        Ok(())
    }

    // ==================== Schema accessors ====================

    /// Whether a table exists.
    pub fn table_exists(&self, name: &str) -> bool {
        self.state.tables.contains(name)
    }

    /// Ordered field list of a table, `ID` first.
    pub fn table_fields(&self, name: &str) -> Result<&[String]> {
        self.state.tables.fields(name)
    }

    /// Number of tables in the database.
    pub fn table_count(&self) -> usize {
        self.state.tables.len()
    }

    /// Whether `field` is a member of the table's schema.
    pub fn column_exists(&self, name: &str, field: &str) -> Result<bool> {
        self.state.tables.column_exists(name, field)
    }

    /// Number of rows in a table.
    pub fn row_count(&self, name: &str) -> Result<usize> {
        self.require_table(name)?;
        Ok(self.state.data.row_count(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Query;
    use crate::storage::MemoryBackend;

    fn open_db() -> Database {
        Database::open("library", Box::new(MemoryBackend::new())).unwrap()
    }

    fn record(pairs: &[(&str, Value)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_create_and_accessors() {
        let mut db = open_db();
        assert_eq!(db.table_count(), 0);

        db.create_table("books", &["title", "year"]).unwrap();
        assert!(db.table_exists("books"));
        assert_eq!(db.table_count(), 1);
        assert_eq!(db.table_fields("books").unwrap(), ["ID", "title", "year"]);
        assert!(db.column_exists("books", "year").unwrap());
        assert!(!db.column_exists("books", "rating").unwrap());
        assert_eq!(db.row_count("books").unwrap(), 0);
    }

    #[test]
    fn test_create_with_invalid_field_registers_nothing() {
        let mut db = open_db();
        let err = db.create_table("books", &["good", "bad-field"]).unwrap_err();
        assert!(matches!(err, DbError::InvalidName(_)));
        assert!(!db.table_exists("books"));
    }

    #[test]
    fn test_drop_table() {
        let mut db = open_db();
        db.create_table("books", &["title"]).unwrap();
        db.drop_table("books").unwrap();
        assert!(!db.table_exists("books"));

        let err = db.drop_table("books").unwrap_err();
        assert!(matches!(err, DbError::TableNotFound(_)));
    }

    #[test]
    fn test_truncate_keeps_fields_resets_counter() {
        let mut db = open_db();
        db.create_table("books", &["title"]).unwrap();
        db.insert("books", record(&[("title", Value::Text("a".into()))])).unwrap();
        db.insert("books", record(&[("title", Value::Text("b".into()))])).unwrap();

        db.truncate("books").unwrap();
        assert_eq!(db.row_count("books").unwrap(), 0);
        assert_eq!(db.table_fields("books").unwrap(), ["ID", "title"]);

        let id = db
            .insert("books", record(&[("title", Value::Text("c".into()))]))
            .unwrap();
        assert_eq!(id, 1);
    }

    #[test]
    fn test_create_table_with_data() {
        let mut db = open_db();
        let records = vec![
            record(&[
                ("title", Value::Text("Phantoms in the brain".into())),
                ("year", Value::Integer(1999)),
            ]),
            record(&[
                ("title", Value::Text("The tell-tale brain".into())),
                ("year", Value::Integer(2011)),
                ("publisher", Value::Text("dropped".into())),
            ]),
        ];

        let ids = db.create_table_with_data("books", records).unwrap();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(db.table_fields("books").unwrap(), ["ID", "title", "year"]);
        assert_eq!(db.row_count("books").unwrap(), 2);

        // the second record's unknown field was dropped on insert
        let rows = db.query("books", Query::by_values([("year", 2011)]), None).unwrap();
        assert!(!rows[0].contains_key("publisher"));
    }

    #[test]
    fn test_create_table_with_no_data_fails() {
        let mut db = open_db();
        let err = db.create_table_with_data("books", Vec::new()).unwrap_err();
        assert!(matches!(err, DbError::MalformedInput(_)));
        assert!(!db.table_exists("books"));
    }

    #[test]
    fn test_alter_table_uniform_default() {
        let mut db = open_db();
        db.create_table("books", &["title"]).unwrap();
        for title in ["a", "b", "c"] {
            db.insert("books", record(&[("title", Value::Text(title.into()))])).unwrap();
        }

        db.alter_table("books", &["rating"], Some(FieldDefaults::Uniform(Value::Integer(0))))
            .unwrap();
        assert_eq!(db.table_fields("books").unwrap(), ["ID", "title", "rating"]);

        let rows = db.query("books", Query::All, None).unwrap();
        assert_eq!(rows.len(), 3);
        for row in &rows {
            assert_eq!(row.get("rating"), Some(&Value::Integer(0)));
        }

        // inserts after the alter default the new field to null
        db.insert("books", record(&[("title", Value::Text("d".into()))])).unwrap();
        let rows = db
            .query("books", Query::by_values([("title", "d")]), None)
            .unwrap();
        assert_eq!(rows[0].get("rating"), Some(&Value::Null));
    }

    #[test]
    fn test_alter_table_per_field_defaults() {
        let mut db = open_db();
        db.create_table("books", &["title"]).unwrap();
        db.insert("books", record(&[("title", Value::Text("a".into()))])).unwrap();

        let mut defaults = HashMap::new();
        defaults.insert("rating".to_string(), Value::Integer(5));
        db.alter_table(
            "books",
            &["rating", "notes"],
            Some(FieldDefaults::PerField(defaults)),
        )
        .unwrap();

        let rows = db.query("books", Query::All, None).unwrap();
        assert_eq!(rows[0].get("rating"), Some(&Value::Integer(5)));
        assert_eq!(rows[0].get("notes"), Some(&Value::Null));
    }

    #[test]
    fn test_alter_table_invalid_name_applies_nothing() {
        let mut db = open_db();
        db.create_table("books", &["title"]).unwrap();
        db.insert("books", record(&[("title", Value::Text("a".into()))])).unwrap();

        let err = db
            .alter_table(
                "books",
                &["rating", "bad-name"],
                Some(FieldDefaults::Uniform(Value::Integer(0))),
            )
            .unwrap_err();
        assert!(matches!(err, DbError::InvalidName(_)));
        assert_eq!(db.table_fields("books").unwrap(), ["ID", "title"]);

        let rows = db.query("books", Query::All, None).unwrap();
        assert!(!rows[0].contains_key("rating"));
    }

    #[test]
    fn test_alter_table_without_defaults_leaves_rows() {
        let mut db = open_db();
        db.create_table("books", &["title"]).unwrap();
        db.insert("books", record(&[("title", Value::Text("a".into()))])).unwrap();

        db.alter_table("books", &["rating"], None).unwrap();
        let rows = db.query("books", Query::All, None).unwrap();
        assert!(!rows[0].contains_key("rating"));
    }

    #[test]
    fn test_missing_table_errors() {
        let mut db = open_db();
        assert!(matches!(db.truncate("nope"), Err(DbError::TableNotFound(_))));
        assert!(matches!(db.row_count("nope"), Err(DbError::TableNotFound(_))));
        assert!(matches!(db.table_fields("nope"), Err(DbError::TableNotFound(_))));
        assert!(matches!(
            db.alter_table("nope", &["x"], None),
            Err(DbError::TableNotFound(_))
        ));
    }
}
