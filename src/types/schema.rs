//! Table schema definition

use serde::{Deserialize, Serialize};

use super::{Row, RowId, Value};

/// Reserved field name carrying the row identifier. Always the first
/// schema field; never settable through row data.
pub const ID_FIELD: &str = "ID";

/// Per-table schema: the ordered field list and the next unused row id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Field names, `ID` always first
    pub fields: Vec<String>,
    /// Next row id to hand out (starts at 1, only ever grows except on
    /// truncate)
    pub auto_increment: RowId,
}

impl TableSchema {
    /// Build a schema from a user-supplied field list.
    ///
    /// The list is de-duplicated (first occurrence wins, exact match), any
    /// user-supplied `ID` is stripped, and `ID` is re-inserted as the
    /// mandatory first field.
    pub fn new<S: AsRef<str>>(user_fields: &[S]) -> Self {
        let mut fields = vec![ID_FIELD.to_string()];
        for field in user_fields {
            let field = field.as_ref();
            if field != ID_FIELD && !fields.iter().any(|f| f == field) {
                fields.push(field.to_string());
            }
        }
        Self {
            fields,
            auto_increment: 1,
        }
    }

    /// Whether `name` is a member of the field list.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f == name)
    }

    /// Number of fields, including `ID`.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Hand out the next row id and advance the counter.
    pub(crate) fn allocate_id(&mut self) -> RowId {
        let id = self.auto_increment;
        self.auto_increment += 1;
        id
    }

    /// Reset the counter to 1 (truncate semantics).
    pub(crate) fn reset_counter(&mut self) {
        self.auto_increment = 1;
    }

    /// Coerce incoming row data against the schema: every non-`ID` field
    /// takes the incoming value if present, `Null` otherwise. Fields not in
    /// the schema are dropped.
    pub(crate) fn coerce(&self, data: &Row) -> Row {
        let mut row = Row::with_capacity(self.fields.len());
        for field in &self.fields {
            if field == ID_FIELD {
                continue;
            }
            let value = data.get(field).cloned().unwrap_or(Value::Null);
            row.insert(field.clone(), value);
        }
        row
    }

    /// Retain only fields that are members of the schema.
    pub(crate) fn filter_fields(&self, data: &Row) -> Row {
        data.iter()
            .filter(|(field, _)| self.has_field(field))
            .map(|(field, value)| (field.clone(), value.clone()))
            .collect()
    }

    /// Drop non-schema fields from a row in place.
    pub(crate) fn retain_schema_fields(&self, row: &mut Row) {
        row.retain(|field, _| self.has_field(field));
    }

    /// Append new field names, skipping `ID`, existing fields, and
    /// duplicates within the request. Returns the names actually added.
    pub(crate) fn append_fields<S: AsRef<str>>(&mut self, new_fields: &[S]) -> Vec<String> {
        let mut added = Vec::new();
        for field in new_fields {
            let field = field.as_ref();
            if field != ID_FIELD && !self.has_field(field) {
                self.fields.push(field.to_string());
                added.push(field.to_string());
            }
        }
        added
    }
}
