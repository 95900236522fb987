// In-memory key-value store with switchable failures
use crate::application::key_value_store::{KeyValueStore, StoreError};
use std::collections::HashMap;
use std::io;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, key: &str, value: &str) {
        self.entries.lock().unwrap().insert(key.to_string(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::Relaxed);
    }

    /// Simulates a full medium (quota exceeded)
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Relaxed);
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.fail_reads.load(Ordering::Relaxed) {
            return Err(StoreError::Read {
                key: key.to_string(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "reads disabled"),
            });
        }
        Ok(self.get(key))
    }

    fn store(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::Relaxed) {
            return Err(StoreError::Write {
                key: key.to_string(),
                source: io::Error::new(io::ErrorKind::StorageFull, "quota exceeded"),
            });
        }
        self.put(key, value);
        Ok(())
    }
}
