// Read-only dashboard rendering for the terminal
use crate::domain::dashboard::{DashboardConfig, GRID_COLUMNS};
use crate::domain::widget::{WidgetKind, WidgetPlacement};
use std::fmt::Write;

pub const EMPTY_TITLE: &str = "No Dashboard Configuration";
pub const EMPTY_HINT: &str = "Create a dashboard using the builder to get started";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    Chart,
    Table,
    Metric,
}

impl From<WidgetKind> for Presentation {
    fn from(kind: WidgetKind) -> Self {
        match kind {
            WidgetKind::Table => Self::Table,
            WidgetKind::Card => Self::Metric,
            WidgetKind::Chart | WidgetKind::Custom => Self::Chart,
        }
    }
}

impl Presentation {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Chart => "Chart Widget",
            Self::Table => "Table Widget",
            Self::Metric => "Metric",
        }
    }

    fn body(&self) -> &'static str {
        match self {
            Self::Chart => "Chart Placeholder",
            Self::Table => "Table Placeholder",
            Self::Metric => "42 KPI Value",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WidgetView {
    pub id: String,
    pub presentation: Presentation,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl From<&WidgetPlacement> for WidgetView {
    fn from(item: &WidgetPlacement) -> Self {
        Self {
            id: item.i.clone(),
            presentation: item.component_type.into(),
            x: item.x,
            y: item.y,
            w: item.w,
            h: item.h,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TabView {
    pub id: String,
    pub name: String,
    pub widgets: Vec<WidgetView>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardView {
    Empty,
    Tabs {
        name: String,
        show_navigation: bool,
        tabs: Vec<TabView>,
    },
}

pub fn build_view(config: &DashboardConfig) -> DashboardView {
    if config.tabs.is_empty() {
        return DashboardView::Empty;
    }

    let tabs = config
        .tabs
        .iter()
        .map(|tab| TabView {
            id: tab.id.clone(),
            name: tab.name.clone(),
            widgets: tab.layout.iter().map(WidgetView::from).collect(),
        })
        .collect();

    DashboardView::Tabs {
        name: config.name.clone(),
        show_navigation: config.tabs.len() > 1,
        tabs,
    }
}

/// Grid columns for a breakpoint name, `None` if unknown
pub fn columns_for(breakpoint: &str) -> Option<u32> {
    GRID_COLUMNS
        .iter()
        .find(|(name, _)| *name == breakpoint)
        .map(|(_, columns)| *columns)
}

/// Plain-text rendering. Shows only `selected_tab` (default: first tab);
/// widgets wider than `columns` are flagged.
pub fn render_text(view: &DashboardView, selected_tab: Option<&str>, columns: u32) -> String {
    let mut out = String::new();

    let (name, show_navigation, tabs) = match view {
        DashboardView::Empty => {
            let _ = writeln!(out, "{}", EMPTY_TITLE);
            let _ = writeln!(out, "{}", EMPTY_HINT);
            return out;
        }
        DashboardView::Tabs {
            name,
            show_navigation,
            tabs,
        } => (name, *show_navigation, tabs),
    };

    let Some(current) = selected_tab
        .and_then(|id| tabs.iter().find(|tab| tab.id == id))
        .or_else(|| tabs.first())
    else {
        let _ = writeln!(out, "{}", EMPTY_TITLE);
        return out;
    };

    let _ = writeln!(out, "{}", name);
    if show_navigation {
        let nav: Vec<String> = tabs
            .iter()
            .map(|tab| {
                if tab.id == current.id {
                    format!("[{}]", tab.name)
                } else {
                    tab.name.clone()
                }
            })
            .collect();
        let _ = writeln!(out, "Tabs: {}", nav.join(" | "));
    }

    let _ = writeln!(out, "Grid: {} columns", columns);
    if current.widgets.is_empty() {
        let _ = writeln!(out, "  (no widgets)");
    }

    let mut widgets: Vec<&WidgetView> = current.widgets.iter().collect();
    widgets.sort_by_key(|widget| (widget.y, widget.x));
    for widget in widgets {
        let overflow = if widget.x.saturating_add(widget.w) > columns { "  (overflows grid)" } else { "" };
        let _ = writeln!(
            out,
            "  {:<14} {:<20} at ({},{}) {}x{}  {}{}",
            widget.presentation.title(),
            widget.id,
            widget.x,
            widget.y,
            widget.w,
            widget.h,
            widget.presentation.body(),
            overflow
        );
    }

    out
}

/// Heading and subtitle of the dashboard home view
pub fn home_heading(active: Option<&DashboardConfig>) -> (&'static str, &'static str) {
    match active {
        Some(_) => ("Custom Dashboard", "Showing your custom dashboard configuration"),
        None => (
            "Default Dashboard",
            "Create a custom dashboard or view the default layout",
        ),
    }
}
