//! Role repository trait (port)

use async_trait::async_trait;

use crate::domain::{Role, RoleUpsert};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Role>, DomainError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Role>, DomainError>;
    /// Create when `role.id` is `None`, otherwise replace the stored role.
    async fn upsert(&self, role: &RoleUpsert) -> Result<Role, DomainError>;
    async fn delete(&self, id: &str) -> Result<(), DomainError>;
}
