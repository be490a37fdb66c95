//! Ordered task records plus the column layout they were loaded from.

use std::collections::HashSet;

use super::dependency::scrub_predecessors;
use super::hierarchy::{build_hierarchy, subtree, LevelIndex};
use super::task::{parse_outline_level, parse_percent, Task, TaskField};

/// Header list and rows as handed over by a source reader.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceTable {
    pub headers: Vec<String>,
    /// Each row is padded/truncated to `headers.len()` by the reader.
    pub rows: Vec<Vec<String>>,
    pub delimiter: u8,
}

/// Normalize a header string to a canonical column key.
fn normalize_header(h: &str) -> String {
    h.trim().to_lowercase().replace([' ', '-', '_', '.'], "")
}

/// Map a normalized header to the task attribute it carries.
fn header_to_field(normalized: &str) -> Option<TaskField> {
    match normalized {
        "id" | "taskid" => Some(TaskField::Id),
        "name" | "taskname" | "task" | "title" | "activity" => Some(TaskField::Name),
        "start" | "startdate" | "begin" | "begindate" => Some(TaskField::Start),
        "finish" | "finishdate" | "end" | "enddate" | "due" | "duedate" => Some(TaskField::Finish),
        "%complete" | "percentcomplete" | "complete" | "progress" => Some(TaskField::PercentComplete),
        "predecessors" | "predecessor" | "dependencies" | "dependson" => Some(TaskField::Predecessors),
        "resourcenames" | "resourcename" | "resources" | "resource" | "assignedto" => {
            Some(TaskField::ResourceNames)
        }
        "notes" | "note" | "description" | "comments" => Some(TaskField::Notes),
        "outlinelevel" | "level" | "outline" => Some(TaskField::OutlineLevel),
        _ => None,
    }
}

/// Which attribute (if any) each source column feeds. The first column that
/// maps to an attribute owns it; later duplicates are kept as extra columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnMap {
    columns: Vec<Option<TaskField>>,
}

impl ColumnMap {
    pub fn from_headers(headers: &[String]) -> Self {
        let mut seen = HashSet::new();
        let columns = headers
            .iter()
            .map(|h| header_to_field(&normalize_header(h)).filter(|f| seen.insert(*f)))
            .collect();
        Self { columns }
    }

    pub fn field_at(&self, column: usize) -> Option<TaskField> {
        self.columns.get(column).copied().flatten()
    }

    pub fn contains(&self, field: TaskField) -> bool {
        self.columns.iter().any(|c| *c == Some(field))
    }
}

/// Everything the editor collects for one task, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskEdit {
    pub outline_level: String,
    pub id: String,
    pub name: String,
    pub start: String,
    pub finish: String,
    pub percent_complete: String,
    pub predecessors: String,
    pub resource_names: String,
    pub notes: String,
}

impl TaskEdit {
    pub fn from_task(task: &Task) -> Self {
        Self {
            outline_level: task.outline_level.to_string(),
            id: task.id.clone(),
            name: task.name.clone(),
            start: task.start.clone(),
            finish: task.finish.clone(),
            percent_complete: task.field(TaskField::PercentComplete),
            predecessors: task.predecessors.clone(),
            resource_names: task.resource_names.clone(),
            notes: task.notes.clone(),
        }
    }

    pub fn value_mut(&mut self, field: TaskField) -> &mut String {
        match field {
            TaskField::OutlineLevel => &mut self.outline_level,
            TaskField::Id => &mut self.id,
            TaskField::Name => &mut self.name,
            TaskField::Start => &mut self.start,
            TaskField::Finish => &mut self.finish,
            TaskField::PercentComplete => &mut self.percent_complete,
            TaskField::Predecessors => &mut self.predecessors,
            TaskField::ResourceNames => &mut self.resource_names,
            TaskField::Notes => &mut self.notes,
        }
    }
}

/// The ordered collection of tasks. The only owner of task records; tree
/// links are indices into [`TaskStore::tasks`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskStore {
    tasks: Vec<Task>,
    headers: Vec<String>,
    columns: ColumnMap,
    delimiter: u8,
}

impl TaskStore {
    /// Build a store from a source table, replacing nothing but itself.
    pub fn from_source(source: SourceTable) -> Self {
        let columns = ColumnMap::from_headers(&source.headers);
        let tasks = source
            .rows
            .iter()
            .map(|row| {
                let mut task = Task::default();
                for column in 0..source.headers.len() {
                    let value = row.get(column).map(String::as_str).unwrap_or("");
                    match columns.field_at(column) {
                        Some(field) => task.set_field(field, value),
                        None => {
                            task.extra.insert(column, value.to_string());
                        }
                    }
                }
                task
            })
            .collect();

        let mut store = Self {
            tasks,
            headers: source.headers,
            columns,
            delimiter: if source.delimiter == 0 { b',' } else { source.delimiter },
        };
        store.rebuild();
        store
    }

    /// Store over already-built tasks with the canonical header set.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let headers: Vec<String> = TaskField::all().iter().map(|f| f.label().to_string()).collect();
        let mut store = Self {
            tasks,
            columns: ColumnMap::from_headers(&headers),
            headers,
            delimiter: b',',
        };
        store.rebuild();
        store
    }

    /// Re-run the hierarchy builder over the current row order.
    pub fn rebuild(&mut self) -> LevelIndex {
        build_hierarchy(&mut self.tasks)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn tasks_mut(&mut self) -> &mut [Task] {
        &mut self.tasks
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn columns(&self) -> &ColumnMap {
        &self.columns
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Index of the task with `id`; with duplicate ids the last row wins.
    pub fn find_by_id(&self, id: &str) -> Option<usize> {
        self.tasks.iter().rposition(|t| t.id == id)
    }

    pub fn toggle_collapse(&mut self, index: usize) -> Option<bool> {
        let task = self.tasks.get_mut(index)?;
        task.collapsed = !task.collapsed;
        Some(task.collapsed)
    }

    /// Write editor values back. Text fields are taken verbatim; outline level
    /// and percent complete are parsed. Rebuilds the hierarchy.
    pub fn apply_edit(&mut self, index: usize, edit: &TaskEdit) -> bool {
        let Some(task) = self.tasks.get_mut(index) else {
            return false;
        };
        task.outline_level = parse_outline_level(&edit.outline_level);
        task.id = edit.id.clone();
        task.name = edit.name.clone();
        task.start = edit.start.clone();
        task.finish = edit.finish.clone();
        task.percent_complete = parse_percent(&edit.percent_complete);
        task.predecessors = edit.predecessors.clone();
        task.resource_names = edit.resource_names.clone();
        task.notes = edit.notes.clone();
        self.rebuild();
        true
    }

    /// Remove the task at `index` with its whole subtree, scrub predecessor
    /// references to the removed ids, and rebuild. Returns the removed ids.
    pub fn delete_subtree(&mut self, index: usize) -> Vec<String> {
        if index >= self.tasks.len() {
            return Vec::new();
        }
        let doomed: HashSet<usize> = subtree(&self.tasks, index).into_iter().collect();
        let removed_ids: Vec<String> = (0..self.tasks.len())
            .filter(|i| doomed.contains(i))
            .map(|i| self.tasks[i].id.clone())
            .collect();

        let mut position = 0;
        self.tasks.retain(|_| {
            let keep = !doomed.contains(&position);
            position += 1;
            keep
        });

        let removed_set: HashSet<&str> = removed_ids.iter().map(String::as_str).collect();
        for task in &mut self.tasks {
            if !task.predecessors.is_empty() {
                task.predecessors = scrub_predecessors(&task.predecessors, &|id| removed_set.contains(id));
            }
        }

        self.rebuild();
        removed_ids
    }
}
