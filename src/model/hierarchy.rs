//! Outline-level → parent/child reconstruction.
//!
//! The source format carries no parent column: nesting is implied by row order
//! and each row's outline level. A row at level `n` hangs under the most recent
//! row seen at level `n - 1`; if no such row exists it becomes a root.

use std::collections::BTreeMap;

use super::task::Task;

/// Most recent task index seen at each outline level, as left by a build pass.
pub type LevelIndex = BTreeMap<u32, usize>;

/// Assign `parent`/`children` for every task in a single left-to-right pass.
///
/// Resets `parent`, `children` and `collapsed` first, so repeated calls on an
/// unchanged list produce the same tree.
pub fn build_hierarchy(tasks: &mut [Task]) -> LevelIndex {
    for task in tasks.iter_mut() {
        task.parent = None;
        task.children.clear();
        task.collapsed = false;
        task.outline_level = task.outline_level.max(1);
    }

    let mut last_at_level = LevelIndex::new();
    for index in 0..tasks.len() {
        let level = tasks[index].outline_level;
        if level > 1 {
            // Only the immediate parent level is consulted.
            if let Some(&parent) = last_at_level.get(&(level - 1)) {
                tasks[index].parent = Some(parent);
                tasks[parent].children.push(index);
            }
        }
        last_at_level.insert(level, index);
    }
    last_at_level
}

/// Indices of `root` and all of its transitive descendants, pre-order.
pub fn subtree(tasks: &[Task], root: usize) -> Vec<usize> {
    let mut out = Vec::new();
    collect_subtree(tasks, root, &mut out);
    out
}

fn collect_subtree(tasks: &[Task], index: usize, out: &mut Vec<usize>) {
    out.push(index);
    for &child in &tasks[index].children {
        collect_subtree(tasks, child, out);
    }
}

/// Ancestor chain of `index`, nearest first.
pub fn ancestors(tasks: &[Task], index: usize) -> Vec<usize> {
    let mut chain = Vec::new();
    let mut cursor = tasks[index].parent;
    while let Some(parent) = cursor {
        chain.push(parent);
        cursor = tasks[parent].parent;
    }
    chain
}
