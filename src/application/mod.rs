// Application layer - Storage port, repository and editing use cases
pub mod clock;
pub mod configuration_repository;
pub mod editing_session;
pub mod key_value_store;
pub mod template_catalog;
