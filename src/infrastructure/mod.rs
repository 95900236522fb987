// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod export;
pub mod file_store;
#[cfg(test)]
pub mod memory_store;
