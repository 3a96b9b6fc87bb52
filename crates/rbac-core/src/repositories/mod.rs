//! Repository traits (ports)

pub mod role_repository;

pub use role_repository::RoleRepository;
#[cfg(test)]
pub use role_repository::MockRoleRepository;
