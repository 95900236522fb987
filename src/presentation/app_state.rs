// Shared services for command handlers
use crate::application::clock::{Clock, IdGenerator};
use crate::application::configuration_repository::ConfigurationRepository;
use crate::application::editing_session::EditingSession;
use crate::application::template_catalog::TemplateCatalog;
use crate::domain::dashboard::DashboardConfig;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub repository: ConfigurationRepository,
    pub catalog: TemplateCatalog,
    pub clock: Arc<dyn Clock>,
    pub ids: Arc<IdGenerator>,
    pub export_dir: PathBuf,
}

impl AppState {
    pub fn new_session(&self) -> EditingSession {
        EditingSession::draft(self.clock.clone(), self.ids.clone())
    }

    pub fn open_session(&self, document: DashboardConfig) -> EditingSession {
        EditingSession::open(document, self.clock.clone(), self.ids.clone())
    }
}
