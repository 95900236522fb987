// Command handlers
use crate::application::editing_session::EditingSession;
use crate::domain::dashboard::DashboardConfig;
use crate::domain::widget::LayoutPosition;
use crate::infrastructure::export::export_to;
use crate::presentation::app_state::AppState;
use crate::presentation::cli::{Command, Target};
use crate::presentation::renderer::{DashboardView, build_view, columns_for, home_heading, render_text};
use anyhow::{Context, anyhow, bail};
use tracing::error;

pub fn handle(command: Command, state: &AppState) -> anyhow::Result<()> {
    match command {
        Command::List => list_dashboards(state),
        Command::Show { id, tab, breakpoint } => show_dashboard(state, id.as_deref(), tab.as_deref(), &breakpoint),
        Command::Templates => list_templates(state),
        Command::New { name, template } => new_dashboard(state, name, template.as_deref()),
        Command::AddWidget { kind, target } => edit(state, &target, |session| {
            let placement = session
                .add_widget(kind)
                .ok_or_else(|| anyhow!("dashboard has no tab to add a widget to"))?;
            println!("Added {} widget {}", kind, placement.i);
            Ok(())
        }),
        Command::RemoveWidget { widget, target } => edit(state, &target, |session| {
            session.remove_widget(&widget);
            println!("Removed widget {}", widget);
            Ok(())
        }),
        Command::Move { widget, x, y, w, h, target } => edit(state, &target, |session| {
            let placement = session
                .active_tab()
                .and_then(|tab| tab.layout.iter().find(|item| item.i == widget))
                .ok_or_else(|| anyhow!("no widget '{}' on tab '{}'", widget, session.active_tab_id()))?;
            if placement.locked {
                bail!("widget '{}' is static and cannot be moved or resized", widget);
            }
            session.relayout(vec![LayoutPosition { i: widget.clone(), x, y, w, h }]);
            println!("Moved widget {} to ({},{}) {}x{}", widget, x, y, w, h);
            Ok(())
        }),
        Command::Relayout { positions, target } => {
            let positions: Vec<LayoutPosition> =
                serde_json::from_str(&positions).context("Layout must be a JSON array of {i, x, y, w, h}")?;
            edit(state, &target, |session| {
                let count = positions.len();
                session.relayout(positions);
                println!("Applied layout of {} widget(s) to tab {}", count, session.active_tab_id());
                Ok(())
            })
        }
        Command::AddTab { id } => edit(state, &Target { id, tab: None }, |session| {
            let tab_id = session.add_tab();
            println!("Added tab {}", tab_id);
            Ok(())
        }),
        Command::ApplyTemplate { template, id } => {
            let template = state
                .catalog
                .find(&template)
                .ok_or_else(|| anyhow!("unknown template '{}'", template))?
                .clone();
            edit(state, &Target { id, tab: None }, |session| {
                session.apply_template(&template);
                println!("Applied template {}", template.name);
                Ok(())
            })
        }
        Command::Rename { name, id } => edit(state, &Target { id, tab: None }, |session| {
            println!("Renamed dashboard to {}", name);
            session.rename(name);
            Ok(())
        }),
        Command::Activate { id } => activate(state, &id),
        Command::Export { id, out } => {
            let config = resolve(state, id.as_deref())?;
            let dir = out.unwrap_or_else(|| state.export_dir.clone());
            let path = export_to(&dir, &config)?;
            println!("Exported {}", path.display());
            Ok(())
        }
    }
}

/// Saved dashboard by id, or the active one
fn resolve(state: &AppState, id: Option<&str>) -> anyhow::Result<DashboardConfig> {
    match id {
        Some(id) => state
            .repository
            .get_by_id(id)
            .ok_or_else(|| anyhow!("no saved dashboard with id '{}'", id)),
        None => state
            .repository
            .get_active()
            .ok_or_else(|| anyhow!("no active dashboard; pass --id or run `new`")),
    }
}

/// Open the target in a session, apply `f`, then save (which also activates it)
fn edit<F>(state: &AppState, target: &Target, f: F) -> anyhow::Result<()>
where
    F: FnOnce(&mut EditingSession) -> anyhow::Result<()>,
{
    let config = resolve(state, target.id.as_deref())?;
    let mut session = state.open_session(config);

    if let Some(tab) = &target.tab {
        if !session.select_tab(tab) {
            bail!("dashboard '{}' has no tab '{}'", session.document().id, tab);
        }
    }

    f(&mut session)?;
    save(state, &mut session)
}

fn save(state: &AppState, session: &mut EditingSession) -> anyhow::Result<()> {
    match session.save(&state.repository) {
        Ok(saved) => {
            println!("Dashboard saved: {} ({})", saved.name, saved.id);
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Failed to save dashboard");
            Err(anyhow::Error::new(e).context("Failed to save dashboard"))
        }
    }
}

fn new_dashboard(state: &AppState, name: Option<String>, template: Option<&str>) -> anyhow::Result<()> {
    let mut session = state.new_session();

    if let Some(template_id) = template {
        let template = state
            .catalog
            .find(template_id)
            .ok_or_else(|| anyhow!("unknown template '{}'", template_id))?;
        session.apply_template(template);
    }
    if let Some(name) = name {
        session.rename(name);
    }

    save(state, &mut session)
}

fn activate(state: &AppState, id: &str) -> anyhow::Result<()> {
    if state.repository.get_by_id(id).is_none() {
        bail!("no saved dashboard with id '{}'", id);
    }
    state.repository.set_active(id).context("Failed to activate dashboard")?;
    println!("Active dashboard: {}", id);
    Ok(())
}

fn list_dashboards(state: &AppState) -> anyhow::Result<()> {
    let summaries = state.repository.list();
    if summaries.is_empty() {
        println!("No saved dashboards");
        return Ok(());
    }

    for summary in summaries {
        println!(
            "{} {:<28} {:<24} {} tab(s), {} widget(s), updated {}",
            if summary.active { "*" } else { " " },
            summary.id,
            summary.name,
            summary.tab_count,
            summary.widget_count,
            summary.updated_at.to_rfc3339()
        );
    }
    Ok(())
}

fn list_templates(state: &AppState) -> anyhow::Result<()> {
    for template in state.catalog.all() {
        println!(
            "{:<22} {:<26} [{}] {}",
            template.id,
            template.name,
            template.category,
            template.tab_count_label()
        );
        println!("    {}", template.description);
    }
    Ok(())
}

fn show_dashboard(state: &AppState, id: Option<&str>, tab: Option<&str>, breakpoint: &str) -> anyhow::Result<()> {
    let columns = columns_for(breakpoint)
        .ok_or_else(|| anyhow!("unknown breakpoint '{}' (expected lg, md, sm, xs or xxs)", breakpoint))?;

    let config = match id {
        Some(id) => Some(resolve(state, Some(id))?),
        None => state.repository.get_active(),
    };

    let (heading, subtitle) = home_heading(config.as_ref());
    println!("{}", heading);
    println!("{}", subtitle);
    println!();

    let view = match &config {
        Some(config) => build_view(config),
        None => DashboardView::Empty,
    };
    print!("{}", render_text(&view, tab, columns));
    Ok(())
}
