//! Database facade
//!
//! # Module Structure
//! - `core`: `Database` struct, open/commit/serialize/destroy lifecycle
//! - `table`: table management (create/drop/truncate/alter, accessors)
//! - `crud`: row operations (insert, query, update, delete, upsert)

pub mod core;
pub mod crud;
pub mod table;

pub use self::core::Database;
pub use crud::Upsert;
pub use table::FieldDefaults;
