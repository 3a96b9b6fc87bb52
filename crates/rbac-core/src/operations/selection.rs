//! Selection toggling and the save-time selection filter

use tracing::debug;

use rbac_shared::constants::DEFAULT_FILTER_DEPTH;

use crate::domain::{MenuForest, MenuNode, NodeId};
use crate::error::DomainError;

/// Flip `selected` on `id` and force every descendant to the new value, then
/// recompute each ancestor as "any child selected", nearest first.
pub fn toggle_selection(forest: &MenuForest, id: NodeId) -> Result<MenuForest, DomainError> {
    let value = !forest.get(id).ok_or(DomainError::NodeNotFound(id))?.selected;
    let mut next = forest.clone();

    for node in std::iter::once(id).chain(forest.descendants(id)) {
        if next.get(node).is_some_and(|e| e.selected != value) {
            if let Some(entry) = next.entry_mut(node) {
                entry.selected = value;
            }
        }
    }

    for ancestor in forest.ancestors(id) {
        let Some(entry) = next.get(ancestor) else {
            continue;
        };
        let any_child = entry
            .children
            .iter()
            .any(|child| next.get(*child).is_some_and(|c| c.selected));
        if entry.selected != any_child {
            if let Some(entry) = next.entry_mut(ancestor) {
                entry.selected = any_child;
            }
        }
    }

    debug!(node = %id, selected = value, "toggled menu selection");
    Ok(next)
}

/// How deep the save filter drops unselected nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDepth {
    /// Filter levels `1..=n` (roots are level 1); deeper nodes are kept as they are.
    Levels(usize),
    Unbounded,
}

impl Default for FilterDepth {
    fn default() -> Self {
        FilterDepth::Levels(DEFAULT_FILTER_DEPTH)
    }
}

impl FilterDepth {
    /// `0` means unbounded.
    pub fn from_setting(levels: usize) -> Self {
        match levels {
            0 => FilterDepth::Unbounded,
            n => FilterDepth::Levels(n),
        }
    }

    fn filters(&self, level: usize) -> bool {
        match self {
            FilterDepth::Levels(n) => level <= *n,
            FilterDepth::Unbounded => true,
        }
    }
}

/// The forest as submitted on save: unselected nodes (and their subtrees)
/// removed down to `depth`.
pub fn filter_selected(forest: &MenuForest, depth: FilterDepth) -> Vec<MenuNode> {
    filter_level(forest.to_nodes(), 1, depth)
}

fn filter_level(nodes: Vec<MenuNode>, level: usize, depth: FilterDepth) -> Vec<MenuNode> {
    if !depth.filters(level) {
        return nodes;
    }
    nodes
        .into_iter()
        .filter(|node| node.selected)
        .map(|mut node| {
            node.children = filter_level(std::mem::take(&mut node.children), level + 1, depth);
            node
        })
        .collect()
}
