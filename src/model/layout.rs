//! Row and bar placement for one render pass.

use std::collections::HashMap;

use chrono::NaiveDateTime;

use super::dependency::{resolve_dependencies, BarGeometry, Connector};
use super::task::Task;
use super::timeline::{DateWindow, Tick, TimelineViewport, Zoom};

pub const ROW_HEIGHT: f32 = 30.0;
pub const HEADER_HEIGHT: f32 = 30.0;
/// Vertical gap between a row's edge and its bar.
pub const BAR_INSET: f32 = 5.0;
/// Horizontal indentation per outline level in the name column.
pub const INDENT_PER_LEVEL: f32 = 15.0;

/// Drives bar colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarStatus {
    /// Exactly 100 percent; over-reported progress is not treated as done.
    Complete,
    /// Finish date has passed with progress under 100 percent.
    Overdue,
    /// Anything else, coloured by outline level.
    Level(u32),
}

impl BarStatus {
    pub fn of(task: &Task, finish: NaiveDateTime, now: NaiveDateTime) -> Self {
        if task.percent_complete == 100.0 {
            BarStatus::Complete
        } else if finish < now && task.percent_complete < 100.0 {
            BarStatus::Overdue
        } else {
            BarStatus::Level(task.outline_level)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskRow {
    /// Index into the store.
    pub task: usize,
    /// Top of the row in chart coordinates.
    pub y: f32,
    pub depth: u32,
    pub has_children: bool,
    pub collapsed: bool,
    /// `None` when the task's dates do not parse.
    pub bar: Option<BarGeometry>,
    pub status: Option<BarStatus>,
}

impl TaskRow {
    pub fn indent(&self) -> f32 {
        self.depth as f32 * INDENT_PER_LEVEL
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub viewport: TimelineViewport,
    pub rows: Vec<TaskRow>,
    pub ticks: Vec<Tick>,
    pub connectors: Vec<Connector>,
    pub total_height: f32,
}

/// Outcome of a full recompute.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome {
    /// No visible task has a parseable date pair.
    Empty,
    Chart(ChartLayout),
}

impl RenderOutcome {
    pub fn is_empty(&self) -> bool {
        matches!(self, RenderOutcome::Empty)
    }

    pub fn chart(&self) -> Option<&ChartLayout> {
        match self {
            RenderOutcome::Chart(layout) => Some(layout),
            RenderOutcome::Empty => None,
        }
    }
}

/// Place `visible` rows and their bars, then route the dependencies.
pub fn layout_chart(
    tasks: &[Task],
    visible: &[usize],
    viewport_width: f32,
    zoom: Zoom,
    now: NaiveDateTime,
) -> RenderOutcome {
    let Some(window) = DateWindow::from_tasks(tasks, visible) else {
        return RenderOutcome::Empty;
    };
    let viewport = TimelineViewport::new(window, viewport_width, zoom);

    let mut rows = Vec::with_capacity(visible.len());
    let mut bars: HashMap<String, (usize, BarGeometry)> = HashMap::new();
    for (row, &index) in visible.iter().enumerate() {
        let task = &tasks[index];
        let y = HEADER_HEIGHT + row as f32 * ROW_HEIGHT;
        let placed = task.date_range().map(|(start, finish)| {
            let bar = BarGeometry {
                x: viewport.date_to_x(start),
                y: y + BAR_INSET,
                width: viewport.span_to_width(start, finish),
                height: ROW_HEIGHT - 2.0 * BAR_INSET,
            };
            (bar, BarStatus::of(task, finish, now))
        });
        if let Some((bar, _)) = placed {
            bars.insert(task.id.clone(), (index, bar));
        }
        rows.push(TaskRow {
            task: index,
            y,
            depth: task.outline_level.saturating_sub(1),
            has_children: task.has_children(),
            collapsed: task.collapsed,
            bar: placed.map(|(bar, _)| bar),
            status: placed.map(|(_, status)| status),
        });
    }

    let connectors = resolve_dependencies(tasks, visible, &bars);
    tracing::trace!(
        rows = rows.len(),
        bars = bars.len(),
        connectors = connectors.len(),
        "chart layout computed"
    );

    RenderOutcome::Chart(ChartLayout {
        ticks: viewport.ticks(),
        viewport,
        total_height: HEADER_HEIGHT + visible.len() as f32 * ROW_HEIGHT,
        rows,
        connectors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::hierarchy::build_hierarchy;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap().and_hms_opt(12, 0, 0).unwrap()
    }

    #[test]
    fn no_dated_rows_is_the_empty_outcome() {
        let tasks = vec![Task::new("1", "a", 1), Task::new("2", "b", 1).with_dates("tbd", "tbd")];
        let outcome = layout_chart(&tasks, &[0, 1], 800.0, Zoom::default(), now());
        assert!(outcome.is_empty());
        assert!(outcome.chart().is_none());
    }

    #[test]
    fn every_visible_row_is_placed_but_only_dated_ones_get_bars() {
        let mut tasks = vec![
            Task::new("1", "Phase", 1).with_dates("2024-01-10", "2024-01-20"),
            Task::new("2", "Undated", 2),
            Task::new("3", "Work", 2).with_dates("2024-01-12", "2024-01-18"),
        ];
        build_hierarchy(&mut tasks);
        let outcome = layout_chart(&tasks, &[0, 1, 2], 2400.0, Zoom::default(), now());
        let layout = outcome.chart().unwrap();

        assert_eq!(layout.rows.len(), 3);
        assert_eq!(layout.total_height, HEADER_HEIGHT + 3.0 * ROW_HEIGHT);
        assert!(layout.rows[1].bar.is_none());
        assert_eq!(layout.rows[2].y, HEADER_HEIGHT + 2.0 * ROW_HEIGHT);
        assert_eq!(layout.rows[2].depth, 1);
        assert!(layout.rows[0].has_children);

        // 24-day window over 2400 px.
        let bar = layout.rows[0].bar.unwrap();
        assert!((bar.x - 700.0).abs() < 1e-3);
        assert!((bar.width - 1000.0).abs() < 1e-3);
        assert_eq!(bar.y, HEADER_HEIGHT + BAR_INSET);
        assert_eq!(bar.height, ROW_HEIGHT - 2.0 * BAR_INSET);
    }

    #[test]
    fn status_prefers_complete_then_overdue() {
        let finish_past = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let finish_future = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let mut task = Task::new("1", "a", 2);
        assert_eq!(BarStatus::of(&task, finish_past, now()), BarStatus::Overdue);
        assert_eq!(BarStatus::of(&task, finish_future, now()), BarStatus::Level(2));
        task.percent_complete = 100.0;
        assert_eq!(BarStatus::of(&task, finish_past, now()), BarStatus::Complete);
    }

    #[test]
    fn only_exactly_full_progress_is_complete() {
        let finish_future = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let mut task = Task::new("1", "a", 3);
        let finish_past = NaiveDate::from_ymd_opt(2023, 12, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        task.percent_complete = 150.0;
        assert_eq!(BarStatus::of(&task, finish_future, now()), BarStatus::Level(3));
        assert_eq!(BarStatus::of(&task, finish_past, now()), BarStatus::Level(3));
        task.percent_complete = 99.5;
        assert_eq!(BarStatus::of(&task, finish_future, now()), BarStatus::Level(3));
    }

    #[test]
    fn connectors_anchor_on_placed_bars() {
        let mut tasks = vec![
            Task::new("1", "a", 1).with_dates("2024-01-10", "2024-01-12"),
            Task::new("2", "b", 1).with_dates("2024-01-13", "2024-01-20"),
        ];
        tasks[1].predecessors = "1".into();
        let outcome = layout_chart(&tasks, &[0, 1], 2400.0, Zoom::default(), now());
        let layout = outcome.chart().unwrap();
        assert_eq!(layout.connectors.len(), 1);

        let pred = layout.rows[0].bar.unwrap();
        let succ = layout.rows[1].bar.unwrap();
        let path = &layout.connectors[0].path;
        assert!((path[0].x - (pred.x + pred.width)).abs() < 1e-3);
        assert_eq!(path[0].y, pred.center_y());
        assert!((path[4].x - succ.x).abs() < 1e-3);
        assert_eq!(path[4].y, succ.center_y());
    }
}
