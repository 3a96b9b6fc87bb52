//! JSON shape of a role's menu as exchanged with the role API.
//!
//! ```text
//! MenuForest := { items: MenuNode[] }
//! MenuNode   := { nav, icon, name, tooltip, children: MenuNode[], isSelected }
//! ```

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{Icon, MenuForest, MenuNode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MenuForestDto {
    #[serde(default)]
    pub items: Vec<MenuNodeDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuNodeDto {
    pub nav: String,
    pub icon: String,
    pub name: String,
    #[serde(default)]
    pub tooltip: String,
    #[serde(default)]
    pub children: Vec<MenuNodeDto>,
    /// Stored menus only hold selected nodes, so a missing flag reads as selected.
    #[serde(rename = "isSelected", default = "selected_by_default")]
    pub is_selected: bool,
}

fn selected_by_default() -> bool {
    true
}

impl From<&MenuNode> for MenuNodeDto {
    fn from(node: &MenuNode) -> Self {
        Self {
            nav: node.path.clone(),
            icon: node.icon.as_str().to_string(),
            name: node.name.clone(),
            tooltip: node.tooltip.clone(),
            children: node.children.iter().map(MenuNodeDto::from).collect(),
            is_selected: node.selected,
        }
    }
}

impl MenuNodeDto {
    /// Unknown icon keys fall back to the default icon.
    pub fn into_node(self) -> MenuNode {
        let (icon, coerced) = Icon::coerce(&self.icon);
        if coerced {
            warn!("Unknown icon '{}' on menu '{}', using {}", self.icon, self.nav, icon);
        }
        MenuNode {
            path: self.nav,
            icon,
            name: self.name,
            tooltip: self.tooltip,
            selected: self.is_selected,
            children: self.children.into_iter().map(MenuNodeDto::into_node).collect(),
        }
    }
}

impl MenuForestDto {
    pub fn from_nodes(nodes: &[MenuNode]) -> Self {
        Self { items: nodes.iter().map(MenuNodeDto::from).collect() }
    }

    pub fn into_nodes(self) -> Vec<MenuNode> {
        self.items.into_iter().map(MenuNodeDto::into_node).collect()
    }

    pub fn into_forest(self) -> MenuForest {
        MenuForest::from_nodes(self.into_nodes())
    }
}

impl From<&MenuForest> for MenuForestDto {
    fn from(forest: &MenuForest) -> Self {
        Self::from_nodes(&forest.to_nodes())
    }
}
