//! CSV text through the project pipeline to a chart layout.

use chrono::{NaiveDate, NaiveDateTime};
use outline_gantt::io::parse_source;
use outline_gantt::model::{DependencyKind, Project, RenderOutcome, ResourceFilter};

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(0, 0, 0).unwrap()
}

fn project(csv: &str) -> Project {
    let mut project = Project::default();
    project.load("test", parse_source(csv).unwrap());
    project
}

#[test]
fn outline_levels_become_a_tree() {
    let mut project = project("ID,Outline Level,Name\n1,1,A\n2,2,B\n3,2,C\n4,1,D\n");
    let tasks = project.store.tasks();
    assert_eq!(tasks[0].children, vec![1, 2]);
    assert_eq!(tasks[1].parent, Some(0));
    assert_eq!(tasks[2].parent, Some(0));
    assert_eq!(tasks[3].parent, None);

    let levels = project.store.rebuild();
    assert_eq!(levels.get(&1), Some(&3));
    assert_eq!(levels.get(&2), Some(&2));
}

#[test]
fn finish_to_start_with_lag_connects_right_edge_to_left_edge() {
    let mut project = project(
        "ID,Name,Start,Finish,Predecessors\n\
         3,Design,2024-01-10,2024-01-14,\n\
         5,Build,2024-01-16,2024-01-20,3FS+2 days\n",
    );
    let outcome = project.layout(1200.0, now());
    let layout = outcome.chart().unwrap();
    assert_eq!(layout.connectors.len(), 1);

    let connector = &layout.connectors[0];
    assert_eq!(connector.kind, DependencyKind::FinishToStart);
    assert_eq!((connector.predecessor, connector.successor), (0, 1));
    let lag = connector.lag.as_ref().unwrap();
    assert_eq!((lag.sign, lag.amount), (1, Some(2)));

    let pred = layout.rows[0].bar.unwrap();
    let succ = layout.rows[1].bar.unwrap();
    let path = &connector.path;
    assert_eq!(path.len(), 5);
    assert!((path[0].x - (pred.x + pred.width)).abs() < 1e-3);
    assert!((path[4].x - succ.x).abs() < 1e-3);
    assert!(connector.arrowhead().is_some());
}

#[test]
fn undated_predecessor_keeps_its_row_but_draws_no_connector() {
    let mut project = project(
        "ID,Name,Start,Finish,Predecessors\n\
         1,Plan,,,\n\
         2,Build,2024-01-16,2024-01-20,1\n",
    );
    let outcome = project.layout(1200.0, now());
    let layout = outcome.chart().unwrap();
    assert_eq!(layout.rows.len(), 2);
    assert_eq!(layout.rows[0].task, 0);
    assert!(layout.rows[0].bar.is_none());
    assert!(layout.rows[1].bar.is_some());
    assert!(layout.connectors.is_empty());
}

#[test]
fn window_is_padded_by_a_week() {
    let mut project = project(
        "ID,Start,Finish\n1,2024-01-10,2024-01-15\n2,2024-01-12,2024-01-20\n",
    );
    let outcome = project.layout(800.0, now());
    let window = outcome.chart().unwrap().viewport.window;
    assert_eq!(window.min, day(2024, 1, 3));
    assert_eq!(window.max, day(2024, 1, 27));
}

#[test]
fn no_parseable_dates_renders_nothing() {
    let mut project = project("ID,Name,Start,Finish\n1,A,,\n2,B,someday,later\n");
    assert_eq!(project.layout(800.0, now()), RenderOutcome::Empty);
}

#[test]
fn filter_keeps_ancestors_but_collapse_still_wins() {
    let mut project = project(
        "ID,Outline Level,Name,Start,Finish,Resource Names\n\
         1,1,Phase,2024-01-10,2024-01-20,\n\
         2,2,Design,2024-01-10,2024-01-12,Ana\n\
         3,2,Build,2024-01-13,2024-01-20,Ben\n\
         4,1,Other,2024-01-21,2024-01-22,Ben\n",
    );
    project.set_filter(ResourceFilter::Only("Ana".into()));
    assert_eq!(project.visible(), vec![0, 1]);

    project.toggle_collapse(0);
    assert_eq!(project.visible(), vec![0]);

    project.set_filter(ResourceFilter::All);
    assert_eq!(project.visible(), vec![0, 3]);
}

#[test]
fn semicolon_sources_with_bom_and_quotes_load() {
    let mut project = project(
        "\u{feff}ID;Name;Start;Finish;Notes\n1;\"Plan; then act\";2024-01-10;2024-01-12;\"a<br>b\"\n\n2;Act;1/13/2024;1/15/2024;\n",
    );
    assert_eq!(project.store.delimiter(), b';');
    let tasks = project.store.tasks();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].name, "Plan; then act");
    assert_eq!(tasks[0].notes_plain(), "a\nb");
    assert_eq!(tasks[1].start_date(), Some(day(2024, 1, 13)));
    assert!(project.layout(800.0, now()).chart().is_some());
}

#[test]
fn bundled_sample_schedule_renders() {
    let mut project = project(include_str!("../assets/sample_schedule.csv"));
    assert_eq!(project.store.len(), 16);
    assert_eq!(project.resources(), vec!["Ana", "Ben", "Cy", "Dana"]);

    let outcome = project.layout(1200.0, day(2026, 10, 14));
    let layout = outcome.chart().unwrap();
    assert_eq!(layout.rows.len(), 16);
    assert_eq!(layout.connectors.len(), 11);

    project.collapse_all();
    assert_eq!(project.visible(), vec![0, 15]);
}
