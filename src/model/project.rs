use chrono::NaiveDateTime;

use super::layout::{layout_chart, RenderOutcome};
use super::store::{SourceTable, TaskEdit, TaskStore};
use super::timeline::Zoom;
use super::visibility::{resource_names, set_all_collapsed, visible_tasks, ResourceFilter};

/// A loaded schedule plus the view state the pipeline needs.
///
/// Every mutation goes through this type so the hierarchy is rebuilt before
/// the next [`Project::layout`] pass.
#[derive(Debug, Clone)]
pub struct Project {
    pub name: String,
    pub store: TaskStore,
    pub resource_filter: ResourceFilter,
    pub zoom: Zoom,
    /// Set by edits and deletes, cleared by load and export.
    pub dirty: bool,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            name: "Untitled Schedule".to_string(),
            store: TaskStore::default(),
            resource_filter: ResourceFilter::All,
            zoom: Zoom::default(),
            dirty: false,
        }
    }
}

impl Project {
    pub fn new(name: impl Into<String>, store: TaskStore) -> Self {
        Self {
            name: name.into(),
            store,
            ..Default::default()
        }
    }

    /// Replace the whole task set. The zoom is kept; a resource filter that no
    /// longer names any task falls back to `All`.
    pub fn load(&mut self, name: impl Into<String>, source: SourceTable) {
        self.name = name.into();
        self.store = TaskStore::from_source(source);
        if let ResourceFilter::Only(resource) = &self.resource_filter {
            if !self.resources().contains(resource) {
                self.resource_filter = ResourceFilter::All;
            }
        }
        self.dirty = false;
        tracing::info!(
            project = %self.name,
            tasks = self.store.len(),
            columns = self.store.headers().len(),
            "schedule loaded"
        );
    }

    /// Distinct resource names for the filter picker (without `All`).
    pub fn resources(&self) -> Vec<String> {
        resource_names(self.store.tasks())
    }

    pub fn set_filter(&mut self, filter: ResourceFilter) {
        self.resource_filter = filter;
    }

    pub fn zoom_in(&mut self) {
        self.zoom.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.zoom.zoom_out();
    }

    pub fn toggle_collapse(&mut self, index: usize) {
        self.store.toggle_collapse(index);
    }

    pub fn collapse_all(&mut self) {
        set_all_collapsed(self.store.tasks_mut(), true);
    }

    pub fn expand_all(&mut self) {
        set_all_collapsed(self.store.tasks_mut(), false);
    }

    pub fn apply_edit(&mut self, index: usize, edit: &TaskEdit) -> bool {
        let applied = self.store.apply_edit(index, edit);
        if applied {
            self.dirty = true;
            tracing::debug!(index, id = %edit.id, "task edited");
        }
        applied
    }

    /// Delete a task with its descendants. Returns the removed ids.
    pub fn delete_task(&mut self, index: usize) -> Vec<String> {
        let removed = self.store.delete_subtree(index);
        if !removed.is_empty() {
            self.dirty = true;
            tracing::info!(removed = removed.len(), "task subtree deleted");
        }
        removed
    }

    /// Visible rows in original order for the current filter and collapse state.
    pub fn visible(&mut self) -> Vec<usize> {
        let filter = self.resource_filter.clone();
        visible_tasks(self.store.tasks_mut(), &filter)
    }

    /// Full recompute: visibility, window, rows, bars, connectors.
    pub fn layout(&mut self, viewport_width: f32, now: NaiveDateTime) -> RenderOutcome {
        let visible = self.visible();
        layout_chart(self.store.tasks(), &visible, viewport_width, self.zoom, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Task;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap()
    }

    fn project() -> Project {
        let mut tasks = vec![
            Task::new("1", "Phase", 1).with_dates("2024-01-10", "2024-01-20"),
            Task::new("2", "Design", 2).with_dates("2024-01-10", "2024-01-14"),
            Task::new("3", "Build", 2).with_dates("2024-01-15", "2024-01-20"),
            Task::new("4", "Launch", 1).with_dates("2024-01-21", "2024-01-21"),
        ];
        tasks[1].resource_names = "Ana".into();
        tasks[2].resource_names = "Ben".into();
        tasks[2].predecessors = "2FS".into();
        tasks[3].predecessors = "3".into();
        Project::new("demo", TaskStore::from_tasks(tasks))
    }

    #[test]
    fn collapsing_a_parent_drops_connectors_into_it() {
        let mut project = project();
        let before = project.layout(1000.0, now());
        assert_eq!(before.chart().unwrap().connectors.len(), 2);

        project.toggle_collapse(0);
        let after = project.layout(1000.0, now());
        let layout = after.chart().unwrap();
        assert_eq!(layout.rows.len(), 2);
        assert!(layout.connectors.is_empty());
    }

    #[test]
    fn filtering_hides_predecessors_of_other_resources() {
        let mut project = project();
        project.set_filter(ResourceFilter::Only("Ben".into()));
        let outcome = project.layout(1000.0, now());
        let layout = outcome.chart().unwrap();
        let shown: Vec<usize> = layout.rows.iter().map(|r| r.task).collect();
        assert_eq!(shown, vec![0, 2]);
        assert!(layout.connectors.is_empty());
    }

    #[test]
    fn empty_project_has_nothing_to_render() {
        let mut project = Project::default();
        assert!(project.layout(1000.0, now()).is_empty());
    }

    #[test]
    fn delete_marks_dirty_and_scrubs() {
        let mut project = project();
        let removed = project.delete_task(1);
        assert_eq!(removed, vec!["2"]);
        assert!(project.dirty);
        assert_eq!(project.store.tasks()[1].predecessors, "");
    }

    #[test]
    fn dirty_follows_real_changes_only() {
        let mut project = project();
        assert!(project.delete_task(99).is_empty());
        assert!(!project.apply_edit(99, &TaskEdit::default()));
        assert!(!project.dirty);

        let edit = TaskEdit::from_task(&project.store.tasks()[3]);
        assert!(project.apply_edit(3, &edit));
        assert!(project.dirty);

        project.load(
            "fresh",
            SourceTable {
                headers: vec!["ID".into()],
                rows: vec![vec!["1".into()]],
                delimiter: b',',
            },
        );
        assert!(!project.dirty);
    }

    #[test]
    fn reload_resets_a_stale_filter() {
        let mut project = project();
        project.set_filter(ResourceFilter::Only("Ana".into()));
        project.load(
            "other",
            SourceTable {
                headers: vec!["ID".into(), "Resource Names".into()],
                rows: vec![vec!["1".into(), "Cy".into()]],
                delimiter: b',',
            },
        );
        assert_eq!(project.resource_filter, ResourceFilter::All);
        assert_eq!(project.resources(), vec!["Cy"]);
    }

    #[test]
    fn zoom_widens_the_chart() {
        let mut project = project();
        project.zoom_in();
        let outcome = project.layout(1000.0, now());
        assert!((outcome.chart().unwrap().viewport.chart_width - 1500.0).abs() < 1e-3);
        project.zoom_out();
        project.zoom_out();
        let outcome = project.layout(1000.0, now());
        assert!(outcome.chart().unwrap().viewport.chart_width < 1000.0);
    }

    #[test]
    fn collapse_all_then_expand_all() {
        let mut project = project();
        project.collapse_all();
        assert_eq!(project.visible(), vec![0, 3]);
        project.expand_all();
        assert_eq!(project.visible(), vec![0, 1, 2, 3]);
    }
}
