// Main entry point - Dependency injection and command dispatch
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::application::clock::{Clock, IdGenerator, SystemClock};
use crate::application::configuration_repository::ConfigurationRepository;
use crate::application::template_catalog::TemplateCatalog;
use crate::infrastructure::config::{load_settings, load_settings_from, load_templates};
use crate::infrastructure::file_store::FileStore;
use crate::presentation::app_state::AppState;
use crate::presentation::cli::Cli;
use crate::presentation::handlers::handle;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let settings = match &cli.config {
        Some(file) => load_settings_from(file)?,
        None => load_settings()?,
    };

    // Initialize tracing (stderr, so command output stays on stdout)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Create storage (infrastructure layer)
    let store = Arc::new(FileStore::new(&settings.data_dir));
    tracing::debug!(dir = ?store.dir(), "Using dashboard storage");

    let templates = match &settings.templates_file {
        Some(path) => TemplateCatalog::with_extra(load_templates(path)?),
        None => TemplateCatalog::builtin(),
    };

    // Create services (application layer)
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let ids = Arc::new(IdGenerator::new(clock.clone()));
    let repository = ConfigurationRepository::new(store, ids.clone());

    let state = AppState {
        repository,
        catalog: templates,
        clock,
        ids,
        export_dir: settings.export_dir,
    };

    handle(cli.command, &state)
}
