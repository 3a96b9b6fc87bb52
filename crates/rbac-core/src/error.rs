//! Domain errors

use thiserror::Error;

use crate::domain::NodeId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Menu node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Invalid menu path '{0}': must start with '/' and contain only letters, digits, '-', '_' or '/'")]
    InvalidPath(String),

    #[error("Menu path already in use: {0}")]
    DuplicatePath(String),

    #[error("Role not found: {0}")]
    RoleNotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Non-2xx answer from the role API; `message` is shown to the user verbatim.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(errors.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(error: serde_json::Error) -> Self {
        DomainError::SerializationError(error.to_string())
    }
}
