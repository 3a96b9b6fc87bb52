// ============================================================================
// RBAC Core - Permission Matrix
// File: crates/rbac-core/src/domain/permissions.rs
// Description: Per-resource permission flags carried by a role
// ============================================================================

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Resources a role can be granted access to.
pub const RESOURCES: &[&str] = &["vehicles", "drivers", "shifts", "sites", "walkarounds", "roles"];

/// Permission flags for one resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MenuPermissions {
    pub view: bool,
    pub add: bool,
    pub edit: bool,
    pub delete: bool,
    pub approve: bool,
    pub download: bool,
    pub upload: bool,
    pub print: bool,
}

impl MenuPermissions {
    pub fn full_access() -> Self {
        Self {
            view: true,
            add: true,
            edit: true,
            delete: true,
            approve: true,
            download: true,
            upload: true,
            print: true,
        }
    }

    pub fn read_only() -> Self {
        Self {
            view: true,
            add: false,
            edit: false,
            delete: false,
            approve: false,
            download: true,
            upload: false,
            print: true,
        }
    }

    pub fn no_access() -> Self {
        Self::default()
    }

    pub fn has_any(&self) -> bool {
        self.view || self.add || self.edit || self.delete ||
        self.approve || self.download || self.upload || self.print
    }
}

/// Resource name to permission flags, kept in name order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct PermissionMatrix(BTreeMap<String, MenuPermissions>);

impl PermissionMatrix {
    /// Every known resource, read-only.
    pub fn for_new_role() -> Self {
        Self(
            RESOURCES
                .iter()
                .map(|r| (r.to_string(), MenuPermissions::read_only()))
                .collect(),
        )
    }

    pub fn get(&self, resource: &str) -> MenuPermissions {
        self.0.get(resource).copied().unwrap_or_default()
    }

    pub fn set(&mut self, resource: impl Into<String>, permissions: MenuPermissions) {
        self.0.insert(resource.into(), permissions);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MenuPermissions)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Resources with at least one flag set.
    pub fn granted(&self) -> usize {
        self.0.values().filter(|p| p.has_any()).count()
    }
}
