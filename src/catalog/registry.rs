//! Table registry for managing table schemas

use crate::error::{DbError, Result};
use crate::naming::check_name;
use crate::types::TableSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Registry of table schemas, keyed by table name.
///
/// Serializes transparently as the `tables` half of the persisted
/// database document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableRegistry {
    tables: HashMap<String, TableSchema>,
}

impl TableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new table.
    ///
    /// Fails with `TableExists` on a name collision and with `InvalidName`
    /// if the table name or any field name fails validation. All names are
    /// checked before anything is registered.
    pub fn create(&mut self, name: &str, fields: &[&str]) -> Result<()> {
        check_name(name)?;
        if self.tables.contains_key(name) {
            return Err(DbError::TableExists(name.to_string()));
        }
        for field in fields {
            check_name(field)?;
        }
        self.tables.insert(name.to_string(), TableSchema::new(fields));
        Ok(())
    }

    /// Remove a table's schema. Existence is checked by the caller.
    pub fn remove(&mut self, name: &str) -> Option<TableSchema> {
        self.tables.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&TableSchema> {
        self.tables.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut TableSchema> {
        self.tables.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Number of registered tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Ordered field list of a table.
    pub fn fields(&self, name: &str) -> Result<&[String]> {
        self.tables
            .get(name)
            .map(|schema| schema.fields.as_slice())
            .ok_or_else(|| DbError::TableNotFound(name.to_string()))
    }

    /// Whether `field` is a member of the table's schema.
    pub fn column_exists(&self, name: &str, field: &str) -> Result<bool> {
        self.tables
            .get(name)
            .map(|schema| schema.has_field(field))
            .ok_or_else(|| DbError::TableNotFound(name.to_string()))
    }
}
