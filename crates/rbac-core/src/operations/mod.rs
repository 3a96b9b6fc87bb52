//! Pure operations on a [`MenuForest`](crate::MenuForest).
//!
//! Each operation borrows the current forest and returns a new one; the input
//! is never modified. Unknown ids are reported as
//! [`DomainError::NodeNotFound`](crate::DomainError::NodeNotFound).

pub mod selection;
pub mod structure;
pub mod update;
pub mod reorder;

pub use selection::{filter_selected, toggle_selection, FilterDepth};
pub use structure::{insert_child, remove_node, NEW_MENU_NAME, NEW_MENU_PATH_PREFIX};
pub use update::{update_field, EditRules, EditWarning, FieldUpdate};
pub use reorder::{move_node, step_node, Direction};

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::domain::{Icon, MenuForest, MenuNode};

    /// Two roots; `/fleet` has two children and one grandchild.
    pub fn fleet_forest() -> MenuForest {
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

    pub fn id_of(forest: &MenuForest, path: &str) -> crate::domain::NodeId {
        forest
            .find_by_path(path)
            .unwrap_or_else(|| panic!("no node at {path}"))
    }

    pub fn selected(forest: &MenuForest, path: &str) -> bool {
        forest.get(id_of(forest, path)).map(|e| e.selected).unwrap_or(false)
    }
}
