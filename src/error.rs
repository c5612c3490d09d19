//! Error types for the slotdb engine

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DbError>;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("the name '{0}' contains invalid characters")]
    InvalidName(String),

    #[error("the table '{0}' already exists")]
    TableExists(String),

    #[error("the table '{0}' does not exist")]
    TableNotFound(String),

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for DbError {
    fn from(err: serde_json::Error) -> Self {
        DbError::Serialization(err.to_string())
    }
}
