// File-backed key-value store, one JSON file per key
use crate::application::key_value_store::{KeyValueStore, StoreError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Read {
                key: key.to_string(),
                source,
            }),
        }
    }

    /// Writes a sibling temp file and renames it over the target
    fn store(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let write_err = |source: std::io::Error| StoreError::Write {
            key: key.to_string(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(write_err)?;

        let path = self.path_for(key);
        let tmp_path = self.dir.join(format!(".{}.json.tmp", key));
        fs::write(&tmp_path, value).map_err(write_err)?;
        fs::rename(&tmp_path, &path).map_err(write_err)?;

        debug!(path = ?path, bytes = value.len(), "Wrote key");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_key_is_none() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.load("dashboard_configs").unwrap(), None);
    }

    #[test]
    fn test_store_creates_directory_and_overwrites() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("data"));

        store.store("dashboard_configs", "{\"configs\":{}}").unwrap();
        store.store("dashboard_configs", "{}").unwrap();

        assert_eq!(store.load("dashboard_configs").unwrap().as_deref(), Some("{}"));
        assert!(store.dir().join("dashboard_configs.json").exists());
        assert!(!store.dir().join(".dashboard_configs.json.tmp").exists());
    }

    #[test]
    fn test_unwritable_directory_reports_write_error() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let store = FileStore::new(&blocker);
        let err = store.store("dashboard_configs", "{}").unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
    }
}
