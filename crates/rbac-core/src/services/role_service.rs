// ============================================================================
// RBAC Core - Role Service
// File: crates/rbac-core/src/services/role_service.rs
// ============================================================================
//! Role listing, opening, saving and deleting on top of a [`RoleRepository`]

use std::sync::Arc;
use tracing::{error, info, warn};

use rbac_shared::utils::matches_query;
use rbac_shared::{paginate, Page, Pagination};

use crate::domain::{default_template, Role};
use crate::error::DomainError;
use crate::repositories::RoleRepository;
use crate::services::{EditSession, SessionOptions};

/// Role workflows used by the editor
pub struct RoleService<R: RoleRepository> {
    role_repo: Arc<R>,
    options: SessionOptions,
}

impl<R: RoleRepository> RoleService<R> {
    pub fn new(role_repo: Arc<R>, options: SessionOptions) -> Self {
        Self { role_repo, options }
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Roles whose name contains `query` (case-insensitive), one page at a time
    pub async fn list_roles(&self, query: &str, pagination: Pagination) -> Result<Page<Role>, DomainError> {
        let roles = self.role_repo.list().await.inspect_err(|e| {
            error!("Failed to list roles: {}", e);
        })?;

        let matching: Vec<Role> = roles
            .into_iter()
            .filter(|role| matches_query(&role.name, query))
            .collect();

        Ok(paginate(&matching, pagination))
    }

    /// Load a stored role into a fresh editing session
    pub async fn open_role(&self, id: &str) -> Result<EditSession, DomainError> {
        info!("Opening role: {}", id);

        let role = self.role_repo.find_by_id(id).await?.ok_or_else(|| {
            warn!("Role not found: {}", id);
            DomainError::RoleNotFound(id.to_string())
        })?;

        Ok(EditSession::from_role(&role, self.options))
    }

    /// Session for a new role seeded from the default menu template
    pub fn new_role(&self) -> EditSession {
        EditSession::new_role(&default_template(), self.options)
    }

    /// Submit the session. On success the session is reseeded from the stored
    /// role; on failure it is left untouched so the user can retry.
    pub async fn save(&self, session: &mut EditSession) -> Result<Role, DomainError> {
        let upsert = session.build_upsert().inspect_err(|e| {
            warn!("Role not saved: {}", e);
        })?;

        info!(
            role = upsert.id.as_deref().unwrap_or("<new>"),
            items = upsert.menu.items.len(),
            "Saving role: {}",
            upsert.name
        );

        let stored = self.role_repo.upsert(&upsert).await.inspect_err(|e| {
            error!("Failed to save role {}: {}", upsert.name, e);
        })?;

        session.mark_saved(&stored);
        info!("Role saved: {} ({})", stored.name, stored.id);
        Ok(stored)
    }

    pub async fn delete_role(&self, id: &str) -> Result<(), DomainError> {
        info!("Deleting role: {}", id);

        self.role_repo.delete(id).await.inspect_err(|e| {
            error!("Failed to delete role {}: {}", id, e);
        })?;

        info!("Role deleted: {}", id);
        Ok(())
    }
}
