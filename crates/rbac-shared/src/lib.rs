//! # RBAC Shared
//! 
//! Shared configuration, telemetry, pagination types, and constants for the
//! role/menu editor.

pub mod constants;
pub mod types;
pub mod utils;
pub mod telemetry;
pub mod config;
pub mod error;

pub use types::*;
pub use error::AppError;
