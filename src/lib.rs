//! slotdb Storage Engine
//!
//! Document-table database layered on a single flat key-value slot: callers
//! get table/row semantics while everything persists as one JSON document
//! under one storage key.
//!
//! ## Core features
//! - Schema-constrained columns with a reserved auto-increment `ID` field
//! - Value-match and predicate queries over full-table scans
//! - Multi-key sort with offset/limit projection
//! - Update-by-query through row transforms, delete-by-query, upsert
//! - Caller-driven durability: mutations stay in memory until `commit`
//!
//! ## Architecture
//! - Catalog: table schemas and auto-increment counters
//! - Store: in-memory rows per table, scanned in id order
//! - Query: scan engine plus sort/slice projector
//! - Storage: pluggable slot backends (in-memory, file)
//! - Database: the public facade tying the layers together

pub mod catalog;
pub mod database;
pub mod query;
pub mod storage;
pub mod store;
pub mod types;

mod error;
mod naming;

pub use database::{Database, FieldDefaults, Upsert};
pub use error::{DbError, Result};
pub use naming::validate_name;
pub use query::{Query, QueryParams, SortDirection};
pub use storage::{FileBackend, MemoryBackend, StorageBackend};
pub use types::{Row, RowId, TableSchema, Value, ID_FIELD};
