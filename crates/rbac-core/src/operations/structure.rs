//! Inserting and removing nodes

use tracing::debug;

use rbac_shared::new_id;

use crate::domain::{Icon, MenuForest, MenuNode, NodeId};
use crate::error::DomainError;

pub const NEW_MENU_NAME: &str = "New Menu";
pub const NEW_MENU_PATH_PREFIX: &str = "/new-menu-";

fn unique_path(forest: &MenuForest) -> String {
    loop {
        let suffix = new_id().simple().to_string();
        let path = format!("{}{}", NEW_MENU_PATH_PREFIX, &suffix[..8]);
        if !forest.entries().any(|e| e.path == path) {
            return path;
        }
    }
}

/// Append a fresh, selected node to the children of `parent`, or to the
/// roots when `parent` is `None`. Every ancestor becomes selected, since a
/// parent is selected while any of its children is.
pub fn insert_child(
    forest: &MenuForest,
    parent: Option<NodeId>,
) -> Result<(MenuForest, NodeId), DomainError> {
    if let Some(parent) = parent {
        if !forest.contains(parent) {
            return Err(DomainError::NodeNotFound(parent));
        }
    }

    let mut next = forest.clone();
    let id = next.attach(parent, MenuNode::new(unique_path(forest), Icon::default(), NEW_MENU_NAME));
    match next.siblings_mut(parent) {
        Some(siblings) => siblings.push(id),
        None => return Err(DomainError::InternalError(format!("no child list for {id}"))),
    }
    for ancestor in next.ancestors(id) {
        if next.get(ancestor).is_some_and(|e| !e.selected) {
            if let Some(entry) = next.entry_mut(ancestor) {
                entry.selected = true;
            }
        }
    }

    debug!(node = %id, parent = ?parent, "inserted menu node");
    Ok((next, id))
}

/// Remove `id` together with its subtree.
pub fn remove_node(forest: &MenuForest, id: NodeId) -> Result<MenuForest, DomainError> {
    let (parent, index) = forest.position(id).ok_or(DomainError::NodeNotFound(id))?;

    let mut next = forest.clone();
    if let Some(siblings) = next.siblings_mut(parent) {
        siblings.remove(index);
    }
    for node in forest.descendants(id) {
        next.forget(node);
    }
    next.forget(id);

    debug!(node = %id, "removed menu node");
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::fixtures::{fleet_forest, id_of, selected};
    use crate::operations::{filter_selected, toggle_selection, FilterDepth};
    use crate::validation::is_valid_path;

    #[test]
    fn test_insert_then_remove_restores_forest() {
        let forest = MenuForest::from_nodes(vec![MenuNode::new("/a", Icon::Circle, "A")]);
        let a = forest.resolve(None, 0).unwrap();

        let (with_child, child) = insert_child(&forest, Some(a)).unwrap();
        assert_eq!(with_child.get(a).unwrap().children, vec![child]);

        let restored = remove_node(&with_child, child).unwrap();
        assert_eq!(restored, forest);
        assert_eq!(restored.len(), 1);
    }

    #[test]
    fn test_inserted_node_defaults() {
        let forest = fleet_forest();
        let (next, id) = insert_child(&forest, Some(id_of(&forest, "/fleet/vehicles"))).unwrap();
        let entry = next.get(id).unwrap();

        assert!(entry.path.starts_with(NEW_MENU_PATH_PREFIX));
        assert!(is_valid_path(&entry.path));
        assert_eq!(entry.icon, Icon::Circle);
        assert_eq!(entry.name, NEW_MENU_NAME);
        assert_eq!(entry.tooltip, NEW_MENU_NAME);
        assert!(entry.selected);
        assert!(entry.children.is_empty());
        assert_eq!(next.depth(id), Some(3));
        assert_eq!(forest.len() + 1, next.len());
    }

    #[test]
    fn test_inserted_paths_are_unique() {
        let mut forest = fleet_forest();
        for _ in 0..20 {
            forest = insert_child(&forest, None).unwrap().0;
        }
        let mut paths: Vec<String> = forest.entries().map(|e| e.path.clone()).collect();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), forest.len());
        assert_eq!(forest.roots().len(), 22);
    }

    #[test]
    fn test_remove_drops_whole_subtree() {
        let forest = fleet_forest();
        let next = remove_node(&forest, id_of(&forest, "/fleet")).unwrap();
        assert_eq!(next.len(), 1);
        assert!(next.find_by_path("/fleet/vehicles/archived").is_none());
        assert_eq!(forest.len(), 5);
    }

    #[test]
    fn test_remove_keeps_parent_selection() {
        let forest = fleet_forest();
        let next = remove_node(&forest, id_of(&forest, "/fleet/vehicles")).unwrap();
        let next = remove_node(&next, id_of(&next, "/fleet/walkarounds")).unwrap();
        assert!(next.get(id_of(&next, "/fleet")).unwrap().selected);
    }

    #[test]
    fn test_insert_under_deselected_parent_selects_ancestors() {
        let forest = fleet_forest();
        let forest = toggle_selection(&forest, id_of(&forest, "/fleet")).unwrap();
        assert!(!selected(&forest, "/fleet"));

        let vehicles = id_of(&forest, "/fleet/vehicles");
        let (next, id) = insert_child(&forest, Some(vehicles)).unwrap();
        let path = next.get(id).unwrap().path.clone();

        assert!(selected(&next, "/fleet"));
        assert!(selected(&next, "/fleet/vehicles"));
        assert!(!selected(&next, "/fleet/walkarounds"));
        assert!(!selected(&next, "/fleet/vehicles/archived"));

        let (next, shallow) = insert_child(&next, Some(id_of(&next, "/fleet"))).unwrap();
        let shallow_path = next.get(shallow).unwrap().path.clone();

        let saved = filter_selected(&next, FilterDepth::default());
        let fleet = saved.iter().find(|n| n.path == "/fleet").unwrap();
        assert!(fleet.children.iter().any(|c| c.path == shallow_path));
        assert!(fleet.children.iter().any(|c| c.path == "/fleet/vehicles"));
        assert!(!fleet.children.iter().any(|c| c.path == "/fleet/walkarounds"));
        let kept = fleet.children.iter().find(|c| c.path == "/fleet/vehicles").unwrap();
        assert!(kept.children.iter().any(|g| g.path == path));
    }

    #[test]
    fn test_unknown_targets() {
        let forest = fleet_forest();
        let stranger = new_id();
        assert_eq!(insert_child(&forest, Some(stranger)).unwrap_err(), DomainError::NodeNotFound(stranger));
        assert_eq!(remove_node(&forest, stranger).unwrap_err(), DomainError::NodeNotFound(stranger));
    }
}
