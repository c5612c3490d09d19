//! Database lifecycle
//!
//! A database is one JSON document under one slot key. Construction loads
//! the slot if it holds a valid document, otherwise initializes an empty
//! database and persists it immediately. Mutations touch only the
//! in-memory state; nothing else reaches the backend until `commit`.

use crate::catalog::TableRegistry;
use crate::error::{DbError, Result};
use crate::naming::check_name;
use crate::storage::StorageBackend;
use crate::store::{RowStore, TableRows};
use crate::types::TableSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Prefix separating database slots from other tenants of the store.
const SLOT_PREFIX: &str = "db_";

/// The whole persisted state: table schemas plus row data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct DatabaseState {
    pub(crate) tables: TableRegistry,
    pub(crate) data: RowStore,
}

/// A document-table database persisted as a single JSON slot.
///
/// ```
/// use slotdb::{Database, MemoryBackend, Query, Row, Value};
///
/// let mut db = Database::open("library", Box::new(MemoryBackend::new()))?;
/// db.create_table("books", &["title", "year"])?;
///
/// let mut book = Row::new();
/// book.insert("title".into(), Value::Text("Freakonomics".into()));
/// book.insert("year".into(), Value::Integer(2005));
/// db.insert("books", book)?;
/// db.commit()?;
///
/// let hits = db.query("books", Query::by_values([("year", 2005)]), None)?;
/// assert_eq!(hits.len(), 1);
/// # Ok::<(), slotdb::DbError>(())
/// ```
impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("name", &self.name)
            .field("slot_key", &self.slot_key)
            .field("state", &self.state)
            .field("newly_created", &self.newly_created)
            .finish()
    }
}

pub struct Database {
    name: String,
    slot_key: String,
    pub(crate) state: DatabaseState,
    backend: Box<dyn StorageBackend>,
    newly_created: bool,
}

impl Database {
    /// Open the database stored under `name` in `backend`, creating it if
    /// the slot is absent or does not hold a valid document.
    ///
    /// Fails with `InvalidName` if the identifier contains characters
    /// outside ASCII letters, digits, and underscore.
    pub fn open(name: &str, backend: Box<dyn StorageBackend>) -> Result<Self> {
        check_name(name)?;

        let mut db = Self {
            name: name.to_string(),
            slot_key: format!("{}{}", SLOT_PREFIX, name),
            state: DatabaseState::default(),
            backend,
            newly_created: false,
        };

        match db.backend.read(&db.slot_key)? {
            Some(text) => match serde_json::from_str::<DatabaseState>(&text) {
                Ok(state) => {
                    db.state = state;
                    debug!(db = %db.name, "loaded existing database");
                }
                Err(err) => {
                    warn!(db = %db.name, error = %err, "stored document invalid, reinitializing");
                    db.newly_created = true;
                    db.commit()?;
                }
            },
            None => {
                db.newly_created = true;
                db.commit()?;
                debug!(db = %db.name, "created new database");
            }
        }

        Ok(db)
    }

    /// Database identifier (without the slot prefix).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this instance created a fresh database at open.
    pub fn is_new(&self) -> bool {
        self.newly_created
    }

    /// Serialize the whole state and write it to the backend in one shot.
    ///
    /// On failure the in-memory state is untouched and remains
    /// authoritative; the caller may retry.
    pub fn commit(&mut self) -> Result<()> {
        let payload = serde_json::to_string(&self.state)?;
        self.backend.write(&self.slot_key, &payload)?;
        debug!(db = %self.name, bytes = payload.len(), "committed");
        Ok(())
    }

    /// The state as a JSON document, without touching the backend.
    pub fn serialize(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.state)?)
    }

    /// Delete the database's slot from the backend and consume the
    /// instance.
    pub fn destroy(mut self) -> Result<()> {
        self.backend.remove(&self.slot_key)?;
        debug!(db = %self.name, "destroyed");
        Ok(())
    }

    // ==================== Internal state accessors ====================

    /// Fail with `TableNotFound` unless `table` exists.
    pub(crate) fn require_table(&self, table: &str) -> Result<()> {
        if self.state.tables.contains(table) {
            Ok(())
        } else {
            Err(DbError::TableNotFound(table.to_string()))
        }
    }

    pub(crate) fn schema(&self, table: &str) -> Result<&TableSchema> {
        self.state
            .tables
            .get(table)
            .ok_or_else(|| DbError::TableNotFound(table.to_string()))
    }

    pub(crate) fn schema_mut(&mut self, table: &str) -> Result<&mut TableSchema> {
        self.state
            .tables
            .get_mut(table)
            .ok_or_else(|| DbError::TableNotFound(table.to_string()))
    }

    pub(crate) fn rows(&self, table: &str) -> Result<&TableRows> {
        self.state
            .data
            .rows(table)
            .ok_or_else(|| DbError::TableNotFound(table.to_string()))
    }

    pub(crate) fn rows_mut(&mut self, table: &str) -> Result<&mut TableRows> {
        self.state
            .data
            .rows_mut(table)
            .ok_or_else(|| DbError::TableNotFound(table.to_string()))
    }
}
