//! File-backed slot storage

use super::StorageBackend;
use crate::error::Result;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Durable backend keeping one UTF-8 file per slot key beneath a root
/// directory. Slot keys are already restricted to identifier characters
/// plus the `db_` prefix, so they are used directly as file names.
#[derive(Debug, Clone)]
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    /// Use `root` as the slot directory, creating it if needed.
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }
}

impl StorageBackend for FileBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.slot_path(key)) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&mut self, key: &str, payload: &str) -> Result<()> {
        fs::write(self.slot_path(key), payload)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        match fs::remove_file(self.slot_path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = FileBackend::open(dir.path()).unwrap();

        assert_eq!(backend.read("db_library").unwrap(), None);

        backend.write("db_library", r#"{"tables":{},"data":{}}"#).unwrap();
        assert_eq!(
            backend.read("db_library").unwrap().as_deref(),
            Some(r#"{"tables":{},"data":{}}"#)
        );

        backend.remove("db_library").unwrap();
        assert_eq!(backend.read("db_library").unwrap(), None);
    }

    #[test]
    fn test_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut backend = FileBackend::open(dir.path()).unwrap();
            backend.write("db_library", "persisted").unwrap();
        }
        let backend = FileBackend::open(dir.path()).unwrap();
        assert_eq!(
            backend.read("db_library").unwrap().as_deref(),
            Some("persisted")
        );
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = FileBackend::open(dir.path()).unwrap();
        backend.remove("db_missing").unwrap();
    }
}
