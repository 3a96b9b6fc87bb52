//! Application-wide constants

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:3000/api";
/// Selection filter depth of the shipped dashboard: roots and their direct children.
pub const DEFAULT_FILTER_DEPTH: usize = 2;
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_DIR: &str = "logs";
pub const DEFAULT_LOG_FILE_PREFIX: &str = "rbac-editor";
