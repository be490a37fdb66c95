//! Resource filtering and collapse propagation.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use super::task::Task;

/// Which tasks the chart shows by resource.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResourceFilter {
    #[default]
    All,
    /// Exact match against the trimmed `resource_names`.
    Only(String),
}

impl ResourceFilter {
    pub fn label(&self) -> &str {
        match self {
            ResourceFilter::All => "All",
            ResourceFilter::Only(name) => name,
        }
    }

    pub fn matches(&self, task: &Task) -> bool {
        match self {
            ResourceFilter::All => true,
            ResourceFilter::Only(name) => task.resource() == name,
        }
    }
}

impl fmt::Display for ResourceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Distinct non-empty resource names, sorted.
pub fn resource_names(tasks: &[Task]) -> Vec<String> {
    tasks
        .iter()
        .map(|t| t.resource())
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Ids of matching tasks plus every ancestor of a match.
pub fn included_ids(tasks: &[Task], filter: &ResourceFilter) -> HashSet<String> {
    let mut included = HashSet::new();
    match filter {
        ResourceFilter::All => {
            included.extend(tasks.iter().map(|t| t.id.clone()));
        }
        ResourceFilter::Only(_) => {
            for index in 0..tasks.len() {
                if filter.matches(&tasks[index]) {
                    include_with_ancestors(tasks, index, &mut included);
                }
            }
        }
    }
    included
}

fn include_with_ancestors(tasks: &[Task], index: usize, included: &mut HashSet<String>) {
    if included.insert(tasks[index].id.clone()) {
        if let Some(parent) = tasks[index].parent {
            include_with_ancestors(tasks, parent, included);
        }
    }
}

/// Candidate list: original row order restricted to the inclusion set.
pub fn filter_tasks(tasks: &[Task], filter: &ResourceFilter) -> Vec<usize> {
    let included = included_ids(tasks, filter);
    (0..tasks.len())
        .filter(|&i| included.contains(&tasks[i].id))
        .collect()
}

/// Recompute every `visible` flag from the candidates' roots downwards.
pub fn update_visibility(tasks: &mut [Task], candidates: &[usize]) {
    for task in tasks.iter_mut() {
        task.visible = false;
    }
    for &index in candidates {
        if tasks[index].parent.is_none() {
            set_visibility(tasks, index, true);
        }
    }
}

fn set_visibility(tasks: &mut [Task], index: usize, parent_visible: bool) {
    tasks[index].visible = parent_visible;
    let children = tasks[index].children.clone();
    if tasks[index].collapsed || !tasks[index].visible {
        for child in children {
            hide_subtree(tasks, child);
        }
    } else {
        for child in children {
            set_visibility(tasks, child, true);
        }
    }
}

fn hide_subtree(tasks: &mut [Task], index: usize) {
    tasks[index].visible = false;
    let children = tasks[index].children.clone();
    for child in children {
        hide_subtree(tasks, child);
    }
}

/// Filter, propagate collapse state and return the visible rows in order.
pub fn visible_tasks(tasks: &mut [Task], filter: &ResourceFilter) -> Vec<usize> {
    let candidates = filter_tasks(tasks, filter);
    update_visibility(tasks, &candidates);
    candidates.into_iter().filter(|&i| tasks[i].visible).collect()
}

/// Set `collapsed` on every task that has children.
pub fn set_all_collapsed(tasks: &mut [Task], collapsed: bool) {
    for task in tasks.iter_mut().filter(|t| t.has_children()) {
        task.collapsed = collapsed;
    }
}
