// JSON export of a dashboard document
use crate::domain::dashboard::DashboardConfig;
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

/// `<name with whitespace runs as '-', lowercased>-dashboard.json`
pub fn export_file_name(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_whitespace = false;

    for ch in name.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
        } else {
            slug.extend(ch.to_lowercase());
            in_whitespace = false;
        }
    }

    format!("{}-dashboard.json", slug)
}

pub fn export_json(config: &DashboardConfig) -> anyhow::Result<String> {
    serde_json::to_string_pretty(config).context("Failed to serialize dashboard")
}

/// Write the export file into `dir` and return its path
pub fn export_to(dir: &Path, config: &DashboardConfig) -> anyhow::Result<PathBuf> {
    let json = export_json(config)?;
    fs::create_dir_all(dir).with_context(|| format!("Failed to create export directory {:?}", dir))?;

    let path = dir.join(export_file_name(&config.name));
    fs::write(&path, json).with_context(|| format!("Failed to write export to {:?}", path))?;

    tracing::info!(id = %config.id, path = ?path, "Exported dashboard");
    Ok(path)
}
