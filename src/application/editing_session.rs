// Layout editing session - Reducer over a working dashboard document
use crate::application::clock::{Clock, IdGenerator};
use crate::application::configuration_repository::{ConfigurationRepository, RepositoryError};
use crate::domain::dashboard::{DashboardConfig, Tab};
use crate::domain::template::Template;
use crate::domain::widget::{LayoutPosition, WidgetKind, WidgetPlacement};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info};

/// One discrete user edit. Identities are generated before the edit is
/// built so that `reduce` stays a pure function.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutEdit {
    AddWidget { id: String, kind: WidgetKind },
    RemoveWidget { id: String },
    Relayout { positions: Vec<LayoutPosition> },
    AddTab { id: String },
    ApplyTemplate { template: Template },
    Rename { name: String },
}

impl LayoutEdit {
    fn targets_active_tab(&self) -> bool {
        matches!(
            self,
            Self::AddWidget { .. } | Self::RemoveWidget { .. } | Self::Relayout { .. }
        )
    }
}

/// Apply `edit` to `document` and return the new snapshot.
///
/// Widget edits act on the tab named by `active_tab_id`; when that tab does
/// not exist the input is returned unchanged. Every applied edit refreshes
/// `updated_at`, except a relayout that leaves the tab as it was.
pub fn reduce(
    document: &DashboardConfig,
    active_tab_id: &str,
    edit: &LayoutEdit,
    now: DateTime<Utc>,
) -> DashboardConfig {
    let mut next = document.clone();

    if edit.targets_active_tab() && next.tab(active_tab_id).is_none() {
        debug!(tab = %active_tab_id, "No active tab, edit ignored");
        return next;
    }

    match edit {
        LayoutEdit::AddWidget { id, kind } => {
            if let Some(tab) = tab_mut(&mut next, active_tab_id) {
                tab.layout.push(WidgetPlacement::new(id.clone(), *kind));
            }
        }
        LayoutEdit::RemoveWidget { id } => {
            if let Some(tab) = tab_mut(&mut next, active_tab_id) {
                tab.layout.retain(|item| item.i != *id);
            }
        }
        LayoutEdit::Relayout { positions } => {
            if let Some(tab) = tab_mut(&mut next, active_tab_id) {
                merge_positions(tab, positions);
            }
            if next.tabs == document.tabs {
                debug!(tab = %active_tab_id, "Relayout changed nothing");
                return next;
            }
        }
        LayoutEdit::AddTab { id } => {
            let name = format!("Tab {}", next.tabs.len() + 1);
            next.tabs.push(Tab::new(id.clone(), name));
        }
        LayoutEdit::ApplyTemplate { template } => {
            next.tabs = template.tabs.clone();
            next.template_id = Some(template.id.clone());
        }
        LayoutEdit::Rename { name } => {
            next.name = name.clone();
        }
    }

    next.updated_at = now;
    next
}

fn tab_mut<'a>(document: &'a mut DashboardConfig, tab_id: &str) -> Option<&'a mut Tab> {
    document.tabs.iter_mut().find(|tab| tab.id == tab_id)
}

/// Known placements keep their tab order. Entries naming no placement are
/// passed through, appended as `custom` placements with the reported geometry.
fn merge_positions(tab: &mut Tab, positions: &[LayoutPosition]) {
    for position in positions {
        match tab.layout.iter_mut().find(|item| item.i == position.i) {
            Some(item) => {
                if !item.apply_geometry(position.x, position.y, position.w, position.h) {
                    debug!(widget = %position.i, "Locked widget keeps its geometry");
                }
            }
            None => {
                debug!(widget = %position.i, "Passing through layout entry with no matching widget");
                tab.layout.push(WidgetPlacement::from(position));
            }
        }
    }
}

/// In-memory working copy of one dashboard plus the UI's tab selection
pub struct EditingSession {
    document: DashboardConfig,
    active_tab_id: String,
    clock: Arc<dyn Clock>,
    ids: Arc<IdGenerator>,
}

impl EditingSession {
    /// Session over an existing document, starting on its first tab
    pub fn open(document: DashboardConfig, clock: Arc<dyn Clock>, ids: Arc<IdGenerator>) -> Self {
        let active_tab_id = document.first_tab_id().unwrap_or_default().to_string();
        Self {
            document,
            active_tab_id,
            clock,
            ids,
        }
    }

    pub fn draft(clock: Arc<dyn Clock>, ids: Arc<IdGenerator>) -> Self {
        let document = DashboardConfig::draft(clock.now());
        Self::open(document, clock, ids)
    }

    pub fn document(&self) -> &DashboardConfig {
        &self.document
    }

    pub fn active_tab_id(&self) -> &str {
        &self.active_tab_id
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.document.tab(&self.active_tab_id)
    }

    /// Switch tabs; false when no tab has that id
    pub fn select_tab(&mut self, tab_id: &str) -> bool {
        if self.document.tab(tab_id).is_none() {
            return false;
        }
        self.active_tab_id = tab_id.to_string();
        true
    }

    fn apply(&mut self, edit: LayoutEdit) {
        debug!(?edit, tab = %self.active_tab_id, "Applying layout edit");
        self.document = reduce(&self.document, &self.active_tab_id, &edit, self.clock.now());
    }

    /// Add a widget of `kind` to the active tab; `None` when there is no active tab
    pub fn add_widget(&mut self, kind: WidgetKind) -> Option<WidgetPlacement> {
        let tab = self.active_tab()?;
        let id = self.ids.unique("widget", |candidate| tab.contains_widget(candidate));

        self.apply(LayoutEdit::AddWidget { id: id.clone(), kind });
        self.active_tab()
            .and_then(|tab| tab.layout.iter().find(|item| item.i == id))
            .cloned()
    }

    pub fn remove_widget(&mut self, widget_id: &str) {
        self.apply(LayoutEdit::RemoveWidget {
            id: widget_id.to_string(),
        });
    }

    pub fn relayout(&mut self, positions: Vec<LayoutPosition>) {
        self.apply(LayoutEdit::Relayout { positions });
    }

    /// Append a new tab and make it active, returning its id
    pub fn add_tab(&mut self) -> String {
        let document = &self.document;
        let id = self.ids.unique("tab", |candidate| document.tab(candidate).is_some());

        self.apply(LayoutEdit::AddTab { id: id.clone() });
        self.active_tab_id = id.clone();
        id
    }

    /// Replace every tab with a copy of the template's tabs
    pub fn apply_template(&mut self, template: &Template) {
        self.apply(LayoutEdit::ApplyTemplate {
            template: template.clone(),
        });
        self.active_tab_id = self.document.first_tab_id().unwrap_or_default().to_string();
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.apply(LayoutEdit::Rename { name: name.into() });
    }

    /// Persist the working document and mark it active.
    ///
    /// On failure the working document is kept so the save can be retried.
    pub fn save(&mut self, repository: &ConfigurationRepository) -> Result<DashboardConfig, RepositoryError> {
        let saved = repository.save(self.document.clone())?;
        self.document.id = saved.id.clone();
        repository.set_active(&saved.id)?;

        info!(id = %saved.id, "Dashboard saved and activated");
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::clock::testing::ManualClock;
    use crate::domain::template::builtin_templates;
    use crate::infrastructure::memory_store::MemoryStore;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn session() -> (EditingSession, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(start()));
        let ids = Arc::new(IdGenerator::new(clock.clone()));
        (EditingSession::draft(clock.clone(), ids), clock)
    }

    fn position(i: &str, x: u32, y: u32, w: u32, h: u32) -> LayoutPosition {
        LayoutPosition { i: i.to_string(), x, y, w, h }
    }

    #[test]
    fn test_add_card_widget() {
        let (mut session, clock) = session();
        session.add_widget(WidgetKind::Chart);
        clock.advance(chrono::Duration::seconds(1));

        let card = session.add_widget(WidgetKind::Card).unwrap();
        let tab = session.active_tab().unwrap();

        assert_eq!(tab.layout.len(), 2);
        assert_eq!((card.x, card.y, card.w, card.h), (0, 0, 3, 2));
        assert_ne!(tab.layout[0].i, card.i);
        assert_eq!(session.document().updated_at, start() + chrono::Duration::seconds(1));
    }

    #[test]
    fn test_widget_ids_distinct_with_stalled_clock() {
        let (mut session, _) = session();
        let a = session.add_widget(WidgetKind::Table).unwrap();
        let b = session.add_widget(WidgetKind::Table).unwrap();
        assert_ne!(a.i, b.i);
    }

    #[test]
    fn test_widget_id_avoids_existing_template_ids() {
        let (mut session, _) = session();
        let mut template = builtin_templates().remove(0);
        template.tabs[0].layout[0].i = "widget-1714564800000".to_string();
        session.apply_template(&template);

        let added = session.add_widget(WidgetKind::Card).unwrap();
        assert_eq!(added.i, "widget-1714564800001");
    }

    #[test]
    fn test_edits_without_active_tab_are_ignored() {
        let clock = Arc::new(ManualClock::new(start()));
        let ids = Arc::new(IdGenerator::new(clock.clone()));
        let mut document = DashboardConfig::draft(start());
        document.tabs.clear();
        let mut session = EditingSession::open(document.clone(), clock.clone(), ids);
        clock.advance(chrono::Duration::seconds(30));

        assert!(session.add_widget(WidgetKind::Chart).is_none());
        session.remove_widget("anything");
        session.relayout(vec![position("anything", 1, 1, 1, 1)]);
        assert_eq!(session.document(), &document);
    }

    #[test]
    fn test_remove_widget_is_idempotent() {
        let (mut session, _) = session();
        let keep = session.add_widget(WidgetKind::Chart).unwrap();
        let removed = session.add_widget(WidgetKind::Table).unwrap();

        session.remove_widget(&removed.i);
        let once = session.active_tab().unwrap().clone();
        session.remove_widget(&removed.i);

        assert_eq!(session.active_tab().unwrap(), &once);
        assert_eq!(once.layout, vec![keep]);
    }

    #[test]
    fn test_relayout_merges_by_identity() {
        let (mut session, _) = session();
        let a = session.add_widget(WidgetKind::Chart).unwrap();
        let b = session.add_widget(WidgetKind::Card).unwrap();

        session.relayout(vec![position(&b.i, 6, 0, 4, 3), position(&a.i, 0, 0, 6, 5)]);

        let layout = &session.active_tab().unwrap().layout;
        assert_eq!(layout.len(), 2);
        assert_eq!(layout[0].i, a.i);
        assert_eq!((layout[0].x, layout[0].y, layout[0].w, layout[0].h), (0, 0, 6, 5));
        assert_eq!((layout[1].x, layout[1].y, layout[1].w, layout[1].h), (6, 0, 4, 3));
        assert_eq!(layout[1].component_type, WidgetKind::Card);
    }

    #[test]
    fn test_relayout_passes_through_unknown_entries() {
        let (mut session, _) = session();
        let a = session.add_widget(WidgetKind::Chart).unwrap();

        session.relayout(vec![position(&a.i, 0, 0, 6, 4), position("extra", 1, 1, 2, 2)]);

        let layout = &session.active_tab().unwrap().layout;
        let ids: Vec<&str> = layout.iter().map(|item| item.i.as_str()).collect();
        assert_eq!(ids, vec![a.i.as_str(), "extra"]);

        let extra = &layout[1];
        assert_eq!((extra.x, extra.y, extra.w, extra.h), (1, 1, 2, 2));
        assert_eq!(extra.component_type, WidgetKind::Custom);
        assert_eq!(extra.component_props, None);
    }

    #[test]
    fn test_unchanged_relayout_keeps_timestamp() {
        let (mut session, clock) = session();
        let mut locked = session.add_widget(WidgetKind::Card).unwrap();
        locked.locked = true;
        let mut document = session.document().clone();
        document.tabs[0].layout = vec![locked.clone()];
        let mut session = EditingSession::open(document.clone(), clock.clone(), session.ids.clone());
        clock.advance(chrono::Duration::seconds(10));

        session.relayout(vec![position(&locked.i, 4, 4, 4, 4)]);
        assert_eq!(session.document(), &document);

        session.relayout(vec![position(&locked.i, locked.x, locked.y, locked.w, locked.h)]);
        assert_eq!(session.document().updated_at, document.updated_at);
    }

    #[test]
    fn test_add_tab_names_and_activates() {
        let (mut session, _) = session();
        let first = session.add_tab();
        let second = session.add_tab();

        let names: Vec<&str> = session.document().tabs.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Main", "Tab 2", "Tab 3"]);
        assert_ne!(first, second);
        assert_eq!(session.active_tab_id(), second);
    }

    #[test]
    fn test_apply_template_replaces_tabs() {
        let (mut session, _) = session();
        session.add_widget(WidgetKind::Chart);
        session.add_tab();

        let template = builtin_templates().remove(1);
        session.apply_template(&template);

        let document = session.document();
        assert_eq!(document.tabs, template.tabs);
        assert_eq!(document.template_id.as_deref(), Some("executive-dashboard"));
        assert!(document.tab("main").is_none());
        assert_eq!(session.active_tab_id(), "overview");
    }

    #[test]
    fn test_template_copy_is_independent() {
        let (mut session, _) = session();
        let template = builtin_templates().remove(0);
        session.apply_template(&template);
        session.remove_widget("widget-1");

        assert_eq!(template.tabs[0].layout.len(), 3);
        assert_eq!(session.active_tab().unwrap().layout.len(), 2);
    }

    #[test]
    fn test_rename_is_verbatim_and_refreshes_timestamp() {
        let (mut session, clock) = session();
        clock.advance(chrono::Duration::minutes(2));
        session.rename("  Sales  ");

        assert_eq!(session.document().name, "  Sales  ");
        assert_eq!(session.document().updated_at, start() + chrono::Duration::minutes(2));
        assert_eq!(session.document().created_at, start());
    }

    #[test]
    fn test_select_tab() {
        let (mut session, _) = session();
        session.add_tab();

        assert!(session.select_tab("main"));
        assert!(!session.select_tab("missing"));
        assert_eq!(session.active_tab_id(), "main");
    }

    #[test]
    fn test_reduce_leaves_input_untouched() {
        let document = DashboardConfig::draft(start());
        let later = start() + chrono::Duration::seconds(5);
        let edit = LayoutEdit::AddWidget {
            id: "widget-1".to_string(),
            kind: WidgetKind::Chart,
        };

        let next = reduce(&document, "main", &edit, later);
        assert!(document.tabs[0].layout.is_empty());
        assert_eq!(next.tabs[0].layout.len(), 1);
        assert_eq!(next.updated_at, later);
    }

    #[test]
    fn test_draft_chart_table_save() {
        let (mut session, _) = session();
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(ManualClock::new(start()));
        let repository = ConfigurationRepository::new(store, Arc::new(IdGenerator::new(clock)));

        session.add_widget(WidgetKind::Chart);
        session.add_widget(WidgetKind::Table);
        let saved = session.save(&repository).unwrap();

        assert!(!saved.id.is_empty());
        assert_eq!(session.document().id, saved.id);

        let stored = repository.get_by_id(&saved.id).unwrap();
        let main = stored.tab("main").unwrap();
        let kinds: Vec<WidgetKind> = main.layout.iter().map(|item| item.component_type).collect();
        assert_eq!(kinds, vec![WidgetKind::Chart, WidgetKind::Table]);
        assert!(main.layout.iter().all(|item| item.x == 0 && item.y == 0));
        assert_eq!(repository.get_active(), Some(stored));
    }

    #[test]
    fn test_failed_save_keeps_working_document() {
        let (mut session, _) = session();
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(ManualClock::new(start()));
        let repository = ConfigurationRepository::new(store.clone(), Arc::new(IdGenerator::new(clock)));

        session.add_widget(WidgetKind::Card);
        store.fail_writes(true);
        assert!(session.save(&repository).is_err());
        assert!(session.document().is_draft());
        assert_eq!(session.active_tab().unwrap().layout.len(), 1);

        store.fail_writes(false);
        let saved = session.save(&repository).unwrap();
        assert_eq!(repository.get_active().map(|c| c.id), Some(saved.id));
    }
}
