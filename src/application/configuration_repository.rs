// Configuration repository - Saved dashboards plus the active pointer
use crate::application::clock::IdGenerator;
use crate::application::key_value_store::{KeyValueStore, StoreError};
use crate::domain::dashboard::DashboardConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const STORAGE_KEY: &str = "dashboard_configs";

/// Whole persisted blob, rewritten on every save or activation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryState {
    #[serde(default)]
    pub configs: BTreeMap<String, DashboardConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_dashboard_id: Option<String>,
}

impl RepositoryState {
    /// Active document, `None` when the pointer is unset or dangling
    pub fn active(&self) -> Option<&DashboardConfig> {
        self.active_dashboard_id
            .as_deref()
            .and_then(|id| self.configs.get(id))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigSummary {
    pub id: String,
    pub name: String,
    pub tab_count: usize,
    pub widget_count: usize,
    pub updated_at: DateTime<Utc>,
    pub active: bool,
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("failed to persist dashboards: {0}")]
    Write(#[from] StoreError),

    #[error("failed to serialize dashboards: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Best-effort store of dashboard documents.
///
/// Reads never fail: absent, unreadable or malformed state reads as empty.
/// Writes are whole-blob read-modify-write, last writer wins.
#[derive(Clone)]
pub struct ConfigurationRepository {
    store: Arc<dyn KeyValueStore>,
    ids: Arc<IdGenerator>,
}

impl ConfigurationRepository {
    pub fn new(store: Arc<dyn KeyValueStore>, ids: Arc<IdGenerator>) -> Self {
        Self { store, ids }
    }

    pub fn load_all(&self) -> RepositoryState {
        let raw = match self.store.load(STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return RepositoryState::default(),
            Err(e) => {
                warn!(error = %e, "Dashboard storage unreadable, starting empty");
                return RepositoryState::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(state) => state,
            Err(e) => {
                warn!(error = %e, "Dashboard storage malformed, starting empty");
                RepositoryState::default()
            }
        }
    }

    /// Upsert `config` and return it as stored.
    /// Drafts get a generated `dashboard-<token>` identity first.
    pub fn save(&self, mut config: DashboardConfig) -> Result<DashboardConfig, RepositoryError> {
        let mut state = self.load_all();

        if config.is_draft() {
            config.id = self
                .ids
                .unique("dashboard", |candidate| state.configs.contains_key(candidate));
            debug!(id = %config.id, "Assigned identity to draft dashboard");
        }

        state.configs.insert(config.id.clone(), config.clone());
        self.persist(&state)?;

        info!(id = %config.id, name = %config.name, tabs = config.tabs.len(), "Saved dashboard");
        Ok(config)
    }

    /// Point the active marker at `id` without checking that it exists
    pub fn set_active(&self, id: &str) -> Result<(), RepositoryError> {
        let mut state = self.load_all();
        state.active_dashboard_id = Some(id.to_string());
        self.persist(&state)?;

        if !state.configs.contains_key(id) {
            warn!(id = %id, "Active dashboard does not resolve to a saved configuration");
        }
        info!(id = %id, "Set active dashboard");
        Ok(())
    }

    pub fn get_active(&self) -> Option<DashboardConfig> {
        self.load_all().active().cloned()
    }

    pub fn get_by_id(&self, id: &str) -> Option<DashboardConfig> {
        self.load_all().configs.remove(id)
    }

    /// Saved dashboards, most recently updated first
    pub fn list(&self) -> Vec<ConfigSummary> {
        let state = self.load_all();
        let active_id = state.active().map(|config| config.id.clone());

        let mut summaries: Vec<ConfigSummary> = state
            .configs
            .into_values()
            .map(|config| ConfigSummary {
                active: active_id.as_deref() == Some(config.id.as_str()),
                tab_count: config.tabs.len(),
                widget_count: config.widget_count(),
                id: config.id,
                name: config.name,
                updated_at: config.updated_at,
            })
            .collect();

        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then_with(|| a.id.cmp(&b.id)));
        summaries
    }

    fn persist(&self, state: &RepositoryState) -> Result<(), RepositoryError> {
        let json = serde_json::to_string(state)?;
        self.store.store(STORAGE_KEY, &json)?;
        Ok(())
    }
}
