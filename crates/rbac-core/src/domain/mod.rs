//! # RBAC Core - Domain Module
//! 
//! Menu-tree model and role entities.

pub mod icon;
pub mod menu;
pub mod forest;
pub mod template;
pub mod wire;
pub mod permissions;
pub mod role;

// Re-export all entities and enums
pub use icon::Icon;
pub use menu::{MenuNode, MenuPatch};
pub use forest::{FlatRow, MenuEntry, MenuForest, NodeId};
pub use template::{default_template, TemplateItem, DEFAULT_MENU};
pub use wire::{MenuForestDto, MenuNodeDto};
pub use permissions::{MenuPermissions, PermissionMatrix, RESOURCES};
pub use role::{Role, RoleUpsert};
