//! Domain services (editing state and role workflows)

pub mod edit_session;
pub mod role_service;

pub use edit_session::{EditSession, SessionOptions};
pub use role_service::RoleService;
