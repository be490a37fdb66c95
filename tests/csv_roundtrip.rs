//! Import, edit, delete and export against real files.

use std::fs;

use outline_gantt::error::LoadError;
use outline_gantt::io::{export_csv, import_csv};
use outline_gantt::model::{Project, TaskEdit};

const SOURCE: &str = "Task ID;Name;Outline Level;Start;Finish;% Complete;Predecessors;Budget\n\
1;Phase A;1;2024-01-10;2024-01-20;0;;100\n\
2;Design;2;2024-01-10;2024-01-14;50;;40\n\
3;Build;2;2024-01-15;2024-01-20;0;2FS;60\n\
4;Phase B;1;2024-01-21;2024-02-01;0;3;0\n\
5;Test;2;2024-01-21;2024-02-01;0;4SS, 2;0\n";

#[test]
fn edit_delete_export_and_reimport() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("plan.csv");
    let output = dir.path().join("plan-out.csv");
    fs::write(&input, SOURCE).unwrap();

    let mut project = Project::default();
    project.load("plan", import_csv(&input).unwrap());
    assert_eq!(project.store.len(), 5);
    assert!(!project.dirty);

    let mut edit = TaskEdit::from_task(project.store.get(4).unwrap());
    edit.percent_complete = "75.0".into();
    assert!(project.apply_edit(4, &edit));
    assert!(project.dirty);

    let removed = project.delete_task(0);
    assert_eq!(removed, vec!["1", "2", "3"]);
    assert_eq!(project.store.len(), 2);

    assert_eq!(export_csv(&project.store, &output).unwrap(), 2);
    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(
        written,
        "Task ID;Name;Outline Level;Start;Finish;% Complete;Predecessors;Budget\n\
         4;Phase B;1;2024-01-21;2024-02-01;0;;0\n\
         5;Test;2;2024-01-21;2024-02-01;75;4SS;0\n"
    );

    let mut reloaded = Project::default();
    reloaded.load("plan-out", import_csv(&output).unwrap());
    let tasks = reloaded.store.tasks();
    assert_eq!(tasks[1].parent, Some(0));
    assert_eq!(tasks[1].percent_complete, 75.0);
    assert_eq!(tasks[1].extra.get(&7).map(String::as_str), Some("0"));
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = import_csv(&dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, LoadError::Read { .. }));
}

#[test]
fn a_source_without_ids_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-ids.csv");
    fs::write(&path, "Name,Start\nA,2024-01-01\n").unwrap();
    match import_csv(&path).unwrap_err() {
        LoadError::MissingColumn(column, headers) => {
            assert_eq!(column, "ID");
            assert_eq!(headers, vec!["Name", "Start"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}
