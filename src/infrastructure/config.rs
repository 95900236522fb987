use crate::domain::template::Template;
use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE: &str = "config/dashboard";
pub const ENV_PREFIX: &str = "DASHBOARD";

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Settings {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
    #[serde(default)]
    pub templates_file: Option<PathBuf>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_log_level() -> String {
    "info".to_string()
}

/// `config/dashboard.{toml,json,yaml}` if present, overridden by `DASHBOARD_*` variables
pub fn load_settings() -> anyhow::Result<Settings> {
    load_settings_from(SETTINGS_FILE)
}

pub fn load_settings_from(file: &str) -> anyhow::Result<Settings> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(file).required(false))
        .add_source(config::Environment::with_prefix(ENV_PREFIX))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[derive(Debug, Deserialize)]
struct TemplatesFile {
    #[serde(default)]
    templates: Vec<Template>,
}

/// Extra templates from a JSON file shaped `{ "templates": [...] }`
pub fn load_templates(path: &Path) -> anyhow::Result<Vec<Template>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read templates from {:?}", path))?;
    let file: TemplatesFile = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse templates from {:?}", path))?;

    tracing::info!(count = file.templates.len(), path = ?path, "Loaded extra templates");
    Ok(file.templates)
}
