//! Menu node value types

use crate::domain::Icon;

/// A menu node and its subtree, by value.
///
/// This is the shape used to seed and export a [`MenuForest`](crate::MenuForest);
/// structural equality on it ignores arena ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuNode {
    pub path: String,
    pub icon: Icon,
    pub name: String,
    pub tooltip: String,
    pub selected: bool,
    pub children: Vec<MenuNode>,
}

impl MenuNode {
    /// Selected leaf whose tooltip mirrors its name.
    pub fn new(path: impl Into<String>, icon: Icon, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            path: path.into(),
            icon,
            tooltip: name.clone(),
            name,
            selected: true,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<MenuNode>) -> Self {
        self.children = children;
        self
    }

    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

/// Partial update of a node's display fields.
///
/// `icon` is the raw key as picked or typed; unknown keys are coerced, not rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuPatch {
    pub path: Option<String>,
    pub icon: Option<String>,
    pub name: Option<String>,
    pub tooltip: Option<String>,
}

impl MenuPatch {
    pub fn path(path: impl Into<String>) -> Self {
        Self { path: Some(path.into()), ..Self::default() }
    }

    pub fn icon(icon: impl Into<String>) -> Self {
        Self { icon: Some(icon.into()), ..Self::default() }
    }

    pub fn name(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), ..Self::default() }
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_none() && self.icon.is_none() && self.name.is_none() && self.tooltip.is_none()
    }
}
