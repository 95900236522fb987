// Template domain model and built-in catalog
use super::dashboard::Tab;
use super::widget::{WidgetKind, WidgetPlacement};
use serde::{Deserialize, Serialize};

/// Read-only seed document offered when starting a dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub tabs: Vec<Tab>,
}

impl Template {
    pub fn tab_count_label(&self) -> String {
        let count = self.tabs.len();
        format!("{} tab{}", count, if count == 1 { "" } else { "s" })
    }
}

pub fn builtin_templates() -> Vec<Template> {
    use WidgetKind::{Card, Chart, Table};

    vec![
        Template {
            id: "single-column".to_string(),
            name: "Single Column Dashboard".to_string(),
            description: "Simple single column layout perfect for focused analytics".to_string(),
            category: "Basic".to_string(),
            thumbnail: None,
            tabs: vec![Tab::with_layout(
                "main",
                "Main",
                vec![
                    WidgetPlacement::at("widget-1", 0, 0, 12, 4, Chart),
                    WidgetPlacement::at("widget-2", 0, 4, 12, 4, Table),
                    WidgetPlacement::at("widget-3", 0, 8, 12, 3, Card),
                ],
            )],
        },
        Template {
            id: "executive-dashboard".to_string(),
            name: "Executive Dashboard".to_string(),
            description: "High-level overview with key metrics and charts".to_string(),
            category: "Business".to_string(),
            thumbnail: None,
            tabs: vec![
                Tab::with_layout(
                    "overview",
                    "Overview",
                    vec![
                        WidgetPlacement::at("kpi-1", 0, 0, 3, 2, Card),
                        WidgetPlacement::at("kpi-2", 3, 0, 3, 2, Card),
                        WidgetPlacement::at("kpi-3", 6, 0, 3, 2, Card),
                        WidgetPlacement::at("kpi-4", 9, 0, 3, 2, Card),
                        WidgetPlacement::at("main-chart", 0, 2, 8, 5, Chart),
                        WidgetPlacement::at("side-chart", 8, 2, 4, 5, Chart),
                    ],
                ),
                Tab::with_layout(
                    "details",
                    "Details",
                    vec![WidgetPlacement::at("detail-table", 0, 0, 12, 6, Table)],
                ),
            ],
        },
        Template {
            id: "analytics-dashboard".to_string(),
            name: "Analytics Dashboard".to_string(),
            description: "Data-heavy dashboard with multiple visualization types".to_string(),
            category: "Analytics".to_string(),
            thumbnail: None,
            tabs: vec![
                Tab::with_layout(
                    "metrics",
                    "Metrics",
                    vec![
                        WidgetPlacement::at("chart-1", 0, 0, 6, 4, Chart),
                        WidgetPlacement::at("chart-2", 6, 0, 6, 4, Chart),
                        WidgetPlacement::at("chart-3", 0, 4, 4, 4, Chart),
                        WidgetPlacement::at("chart-4", 4, 4, 4, 4, Chart),
                        WidgetPlacement::at("chart-5", 8, 4, 4, 4, Chart),
                    ],
                ),
                Tab::with_layout(
                    "data",
                    "Data",
                    vec![WidgetPlacement::at("data-table", 0, 0, 12, 8, Table)],
                ),
            ],
        },
    ]
}
