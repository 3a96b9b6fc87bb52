// ============================================================================
// RBAC Core - Menu Forest
// File: crates/rbac-core/src/domain/forest.rs
// Description: Ordered menu forest stored as an id-keyed arena
// ============================================================================
//! Nodes are addressed by stable [`NodeId`]s instead of positional
//! coordinates, so every operation works at any depth. Entries are shared
//! behind `Arc`: cloning a forest is shallow, and an operation only copies the
//! entries it touches.

use std::collections::HashMap;
use std::sync::Arc;

use rbac_shared::{new_id, EntityId};

use crate::domain::{Icon, MenuNode};

pub type NodeId = EntityId;

/// One node in the arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub path: String,
    pub icon: Icon,
    pub name: String,
    pub tooltip: String,
    pub selected: bool,
    pub children: Vec<NodeId>,
}

/// A node as it appears in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatRow {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    /// Position among its siblings.
    pub index: usize,
    /// Roots are at depth 1.
    pub depth: usize,
}

#[derive(Debug, Clone, Default)]
pub struct MenuForest {
    roots: Vec<NodeId>,
    nodes: HashMap<NodeId, Arc<MenuEntry>>,
}

impl MenuForest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_nodes(nodes: Vec<MenuNode>) -> Self {
        let mut forest = Self::new();
        for node in nodes {
            let id = forest.attach(None, node);
            forest.roots.push(id);
        }
        forest
    }

    pub fn to_nodes(&self) -> Vec<MenuNode> {
        self.roots.iter().filter_map(|id| self.node(*id)).collect()
    }

    /// The subtree rooted at `id`, by value.
    pub fn node(&self, id: NodeId) -> Option<MenuNode> {
        let entry = self.get(id)?;
        Some(MenuNode {
            path: entry.path.clone(),
            icon: entry.icon,
            name: entry.name.clone(),
            tooltip: entry.tooltip.clone(),
            selected: entry.selected,
            children: entry.children.iter().filter_map(|c| self.node(*c)).collect(),
        })
    }

    pub fn get(&self, id: NodeId) -> Option<&MenuEntry> {
        self.nodes.get(&id).map(Arc::as_ref)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Ordered children of `parent`, or the roots for `None`.
    pub fn children_of(&self, parent: Option<NodeId>) -> Option<&[NodeId]> {
        match parent {
            None => Some(&self.roots),
            Some(id) => self.get(id).map(|e| e.children.as_slice()),
        }
    }

    /// Parent and sibling index of `id`.
    pub fn position(&self, id: NodeId) -> Option<(Option<NodeId>, usize)> {
        let parent = self.get(id)?.parent;
        let index = self.children_of(parent)?.iter().position(|c| *c == id)?;
        Some((parent, index))
    }

    /// Map a dashboard-style `(parent_index, index)` coordinate to an id.
    ///
    /// `None` addresses the roots; `Some(p)` addresses the children of root `p`.
    pub fn resolve(&self, parent_index: Option<usize>, index: usize) -> Option<NodeId> {
        match parent_index {
            None => self.roots.get(index).copied(),
            Some(p) => {
                let parent = self.roots.get(p)?;
                self.get(*parent)?.children.get(index).copied()
            }
        }
    }

    /// Every node below `id`, pre-order.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = match self.get(id) {
            Some(entry) => entry.children.iter().rev().copied().collect(),
            None => return out,
        };
        while let Some(next) = stack.pop() {
            out.push(next);
            if let Some(entry) = self.get(next) {
                stack.extend(entry.children.iter().rev().copied());
            }
        }
        out
    }

    /// Ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut current = self.get(id).and_then(|e| e.parent);
        while let Some(parent) = current {
            out.push(parent);
            current = self.get(parent).and_then(|e| e.parent);
        }
        out
    }

    pub fn depth(&self, id: NodeId) -> Option<usize> {
        self.contains(id).then(|| self.ancestors(id).len() + 1)
    }

    /// All nodes in display order.
    pub fn flatten(&self) -> Vec<FlatRow> {
        let mut rows = Vec::with_capacity(self.nodes.len());
        self.flatten_into(None, 1, &mut rows);
        rows
    }

    fn flatten_into(&self, parent: Option<NodeId>, depth: usize, rows: &mut Vec<FlatRow>) {
        let Some(children) = self.children_of(parent) else {
            return;
        };
        for (index, id) in children.iter().enumerate() {
            rows.push(FlatRow { id: *id, parent, index, depth });
            self.flatten_into(Some(*id), depth + 1, rows);
        }
    }

    pub fn find_by_path(&self, path: &str) -> Option<NodeId> {
        self.flatten()
            .into_iter()
            .map(|row| row.id)
            .find(|id| self.get(*id).is_some_and(|e| e.path == path))
    }

    pub fn entries(&self) -> impl Iterator<Item = &MenuEntry> {
        self.nodes.values().map(Arc::as_ref)
    }

    // ------------------------------------------------------------------
    // Copy-on-write mutation, used by the operations module
    // ------------------------------------------------------------------

    /// Insert `node` and its subtree under `parent` without linking it into
    /// any child list; returns the new id.
    pub(crate) fn attach(&mut self, parent: Option<NodeId>, node: MenuNode) -> NodeId {
        let id = new_id();
        let children = node
            .children
            .into_iter()
            .map(|child| self.attach(Some(id), child))
            .collect();
        self.nodes.insert(
            id,
            Arc::new(MenuEntry {
                id,
                parent,
                path: node.path,
                icon: node.icon,
                name: node.name,
                tooltip: node.tooltip,
                selected: node.selected,
                children,
            }),
        );
        id
    }

    pub(crate) fn entry_mut(&mut self, id: NodeId) -> Option<&mut MenuEntry> {
        self.nodes.get_mut(&id).map(Arc::make_mut)
    }

    pub(crate) fn siblings_mut(&mut self, parent: Option<NodeId>) -> Option<&mut Vec<NodeId>> {
        match parent {
            None => Some(&mut self.roots),
            Some(id) => self.entry_mut(id).map(|e| &mut e.children),
        }
    }

    pub(crate) fn forget(&mut self, id: NodeId) {
        self.nodes.remove(&id);
    }

    /// True when both forests hold the very same allocation for `id`.
    #[cfg(test)]
    pub(crate) fn shares_entry(&self, other: &MenuForest, id: NodeId) -> bool {
        match (self.nodes.get(&id), other.nodes.get(&id)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Structural equality: same shape and fields, ids ignored.
impl PartialEq for MenuForest {
    fn eq(&self, other: &Self) -> bool {
        self.to_nodes() == other.to_nodes()
    }
}

impl Eq for MenuForest {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MenuForest {
        MenuForest::from_nodes(vec![
            MenuNode::new("/dashboard", Icon::LayoutDashboard, "Dashboard"),
            MenuNode::new("/fleet", Icon::Truck, "Fleet").with_children(vec![
                MenuNode::new("/fleet/vehicles", Icon::Car, "Vehicles").with_children(vec![
                    MenuNode::new("/fleet/vehicles/archived", Icon::FileText, "Archived"),
                ]),
                MenuNode::new("/fleet/walkarounds", Icon::ClipboardCheck, "Walkarounds"),
            ]),
        ])
    }

    #[test]
    fn test_round_trip_through_nodes() {
        let forest = sample();
        assert_eq!(forest.len(), 5);
        assert_eq!(MenuForest::from_nodes(forest.to_nodes()), forest);
    }

    #[test]
    fn test_resolve_legacy_coordinates() {
        let forest = sample();
        let fleet = forest.resolve(None, 1).unwrap();
        assert_eq!(forest.get(fleet).unwrap().path, "/fleet");

        let walkarounds = forest.resolve(Some(1), 1).unwrap();
        assert_eq!(forest.get(walkarounds).unwrap().path, "/fleet/walkarounds");
        assert_eq!(forest.position(walkarounds), Some((Some(fleet), 1)));

        assert!(forest.resolve(Some(0), 0).is_none());
        assert!(forest.resolve(None, 7).is_none());
    }

    #[test]
    fn test_flatten_is_preorder_with_depth() {
        let forest = sample();
        let rows: Vec<(String, usize)> = forest
            .flatten()
            .iter()
            .map(|r| (forest.get(r.id).unwrap().path.clone(), r.depth))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("/dashboard".to_string(), 1),
                ("/fleet".to_string(), 1),
                ("/fleet/vehicles".to_string(), 2),
                ("/fleet/vehicles/archived".to_string(), 3),
                ("/fleet/walkarounds".to_string(), 2),
            ]
        );
    }

    #[test]
    fn test_descendants_and_ancestors() {
        let forest = sample();
        let fleet = forest.find_by_path("/fleet").unwrap();
        let archived = forest.find_by_path("/fleet/vehicles/archived").unwrap();
        let vehicles = forest.find_by_path("/fleet/vehicles").unwrap();

        assert_eq!(forest.descendants(fleet).len(), 3);
        assert_eq!(forest.ancestors(archived), vec![vehicles, fleet]);
        assert_eq!(forest.depth(archived), Some(3));
    }
}
