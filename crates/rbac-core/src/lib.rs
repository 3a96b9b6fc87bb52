//! # RBAC Core
//! 
//! Menu-tree model, tree operations, role entities, the role repository
//! port, and the editing services built on top of them.

pub mod domain;
pub mod operations;
pub mod validation;
pub mod services;
pub mod repositories;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
