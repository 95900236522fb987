// Command-line surface
use crate::domain::widget::WidgetKind;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "dashboard-builder", version, about = "Compose grid dashboards from tabs, widgets and templates")]
pub struct Cli {
    /// Settings file without extension
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Which saved dashboard (and tab) an edit applies to
#[derive(Debug, Clone, Default, Args)]
pub struct Target {
    /// Dashboard id; the active dashboard when omitted
    #[arg(long)]
    pub id: Option<String>,

    /// Tab id; the first tab when omitted
    #[arg(long)]
    pub tab: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List saved dashboards
    List,

    /// Render a dashboard read-only
    Show {
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        tab: Option<String>,
        /// lg, md, sm, xs or xxs
        #[arg(long, default_value = "lg")]
        breakpoint: String,
    },

    /// List available templates
    Templates,

    /// Create and save a new dashboard
    New {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        template: Option<String>,
    },

    /// Add a chart, table, card or custom widget
    AddWidget {
        kind: WidgetKind,
        #[command(flatten)]
        target: Target,
    },

    RemoveWidget {
        widget: String,
        #[command(flatten)]
        target: Target,
    },

    /// Move and resize one widget
    Move {
        widget: String,
        x: u32,
        y: u32,
        w: u32,
        h: u32,
        #[command(flatten)]
        target: Target,
    },

    /// Merge a JSON array of {i, x, y, w, h} into the tab layout
    Relayout {
        positions: String,
        #[command(flatten)]
        target: Target,
    },

    AddTab {
        #[arg(long)]
        id: Option<String>,
    },

    /// Replace all tabs with a template's tabs
    ApplyTemplate {
        template: String,
        #[arg(long)]
        id: Option<String>,
    },

    Rename {
        name: String,
        #[arg(long)]
        id: Option<String>,
    },

    /// Mark a dashboard as the one shown by default
    Activate { id: String },

    /// Write a dashboard as pretty JSON
    Export {
        #[arg(long)]
        id: Option<String>,
        /// Output directory; the configured export_dir when omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add_widget() {
        let cli = Cli::try_parse_from(["dashboard-builder", "add-widget", "card", "--tab", "overview"]).unwrap();
        match cli.command {
            Command::AddWidget { kind, target } => {
                assert_eq!(kind, WidgetKind::Card);
                assert_eq!(target.tab.as_deref(), Some("overview"));
                assert_eq!(target.id, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_kind() {
        assert!(Cli::try_parse_from(["dashboard-builder", "add-widget", "gauge"]).is_err());
    }
}
