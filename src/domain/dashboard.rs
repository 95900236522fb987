// Dashboard configuration domain model
use super::widget::WidgetPlacement;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DRAFT_NAME: &str = "New Dashboard";
pub const DRAFT_TAB_ID: &str = "main";
pub const DRAFT_TAB_NAME: &str = "Main";

/// Columns per breakpoint, shared by every placement in a tab (lg, md, sm, xs, xxs)
pub const GRID_COLUMNS: [(&str, u32); 5] = [("lg", 12), ("md", 10), ("sm", 6), ("xs", 4), ("xxs", 2)];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tab {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub layout: Vec<WidgetPlacement>,
}

impl Tab {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            layout: Vec::new(),
        }
    }

    pub fn with_layout(id: &str, name: &str, layout: Vec<WidgetPlacement>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            layout,
        }
    }

    pub fn contains_widget(&self, widget_id: &str) -> bool {
        self.layout.iter().any(|item| item.i == widget_id)
    }
}

/// The persisted dashboard document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardConfig {
    /// Empty until the first save
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(default)]
    pub tabs: Vec<Tab>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DashboardConfig {
    /// Never-saved document with a single empty "Main" tab
    pub fn draft(now: DateTime<Utc>) -> Self {
        Self {
            id: String::new(),
            name: DRAFT_NAME.to_string(),
            template_id: None,
            tabs: vec![Tab::new(DRAFT_TAB_ID, DRAFT_TAB_NAME)],
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_draft(&self) -> bool {
        self.id.is_empty()
    }

    pub fn tab(&self, tab_id: &str) -> Option<&Tab> {
        self.tabs.iter().find(|tab| tab.id == tab_id)
    }

    pub fn first_tab_id(&self) -> Option<&str> {
        self.tabs.first().map(|tab| tab.id.as_str())
    }

    pub fn widget_count(&self) -> usize {
        self.tabs.iter().map(|tab| tab.layout.len()).sum()
    }
}
