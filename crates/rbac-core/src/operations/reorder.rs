//! Reordering within one sibling list

use tracing::debug;

use crate::domain::{MenuForest, NodeId};
use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Take the node at `drag_index` out of `parent`'s children (the roots for
/// `None`) and reinsert it at `hover_index`.
///
/// Out-of-range indices leave the forest unchanged.
pub fn move_node(
    forest: &MenuForest,
    parent: Option<NodeId>,
    drag_index: usize,
    hover_index: usize,
) -> Result<MenuForest, DomainError> {
    let len = match (parent, forest.children_of(parent)) {
        (_, Some(siblings)) => siblings.len(),
        (Some(parent), None) => return Err(DomainError::NodeNotFound(parent)),
        (None, None) => 0,
    };
    if drag_index >= len || hover_index >= len || drag_index == hover_index {
        return Ok(forest.clone());
    }

    let mut next = forest.clone();
    if let Some(siblings) = next.siblings_mut(parent) {
        let moved = siblings.remove(drag_index);
        siblings.insert(hover_index, moved);
    }

    debug!(parent = ?parent, from = drag_index, to = hover_index, "moved menu node");
    Ok(next)
}

/// One keyboard step; stepping past either end is a no-op.
pub fn step_node(forest: &MenuForest, id: NodeId, direction: Direction) -> Result<MenuForest, DomainError> {
    let (parent, index) = forest.position(id).ok_or(DomainError::NodeNotFound(id))?;
    let hover = match direction {
        Direction::Up => match index.checked_sub(1) {
            Some(hover) => hover,
            None => return Ok(forest.clone()),
        },
        Direction::Down => index + 1,
    };
    move_node(forest, parent, index, hover)
}
