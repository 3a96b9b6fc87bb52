// ============================================================================
// RBAC Core - Role Entity
// File: crates/rbac-core/src/domain/role.rs
// Description: Role with its permission matrix and stored menu
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::{MenuForest, MenuForestDto, PermissionMatrix};
use crate::error::DomainError;

/// Role as stored by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub permissions: PermissionMatrix,
    #[serde(default)]
    pub menu: MenuForestDto,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Role {
    pub fn menu_forest(&self) -> MenuForest {
        self.menu.clone().into_forest()
    }
}

/// Create-or-replace payload. The menu is sent whole, never as a delta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RoleUpsert {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[validate(length(min = 2, max = 100, message = "Role name must be between 2 and 100 characters"))]
    pub name: String,

    pub permissions: PermissionMatrix,
    pub menu: MenuForestDto,
}

impl RoleUpsert {
    pub fn new(
        id: Option<String>,
        name: &str,
        permissions: PermissionMatrix,
        menu: MenuForestDto,
    ) -> Result<Self, DomainError> {
        let upsert = Self {
            id,
            name: name.trim().to_string(),
            permissions,
            menu,
        };

        upsert.validate()?;
        Ok(upsert)
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_upsert_trims_name() {
        let upsert = RoleUpsert::new(
            None,
            "  Depot Supervisor ",
            PermissionMatrix::for_new_role(),
            MenuForestDto::default(),
        )
        .unwrap();
        assert_eq!(upsert.name, "Depot Supervisor");
        assert!(upsert.is_new());
    }

    #[test]
    fn test_upsert_rejects_short_name() {
        let result = RoleUpsert::new(None, " x ", PermissionMatrix::default(), MenuForestDto::default());
        assert!(matches!(result, Err(DomainError::ValidationError(_))));
    }

    #[test]
    fn test_decode_role_with_mongo_style_id() {
        let role: Role = serde_json::from_value(json!({
            "_id": "65f1c0ffee",
            "name": "Dispatcher",
            "menu": { "items": [] },
            "updatedAt": "2026-03-01T08:00:00Z"
        }))
        .unwrap();
        assert_eq!(role.id, "65f1c0ffee");
        assert!(role.permissions.iter().next().is_none());
        assert!(role.updated_at.is_some());
    }
}
