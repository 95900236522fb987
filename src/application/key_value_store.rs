// Storage port for the persisted dashboard blob
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read key '{key}': {source}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write key '{key}': {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

/// Durable string-valued key-value medium
pub trait KeyValueStore: Send + Sync {
    /// Raw value stored under `key`, `None` when nothing was ever written
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value stored under `key`
    fn store(&self, key: &str, value: &str) -> Result<(), StoreError>;
}
