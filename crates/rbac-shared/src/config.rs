//! Configuration management

use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_FILTER_DEPTH, DEFAULT_LOG_DIR, DEFAULT_LOG_FILE_PREFIX,
    DEFAULT_LOG_LEVEL, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ApiSettings,
    pub editor: EditorSettings,
    pub log: LogSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    /// Request timeout in seconds. Requests never time out when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EditorSettings {
    /// How many tree levels the save filter drops unselected nodes from.
    /// `0` filters the whole tree.
    pub filter_depth: usize,
    /// `forest` or `siblings`.
    pub path_scope: String,
    pub tooltip_follows_name: bool,
    pub page_size: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    pub level: String,
    pub dir: String,
    pub file_prefix: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Layers: defaults, `config/default`, `config/{APP_ENV}`, the explicit
    /// file (if any), then `RBAC__SECTION__KEY` environment variables.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let mut builder = Config::builder()
            .set_default("app.env", env.clone())?
            .set_default("app.name", "rbac-editor")?
            .set_default("api.base_url", DEFAULT_API_BASE_URL)?
            .set_default("editor.filter_depth", DEFAULT_FILTER_DEPTH as i64)?
            .set_default("editor.path_scope", "forest")?
            .set_default("editor.tooltip_follows_name", true)?
            .set_default("editor.page_size", DEFAULT_PAGE_SIZE as i64)?
            .set_default("log.level", DEFAULT_LOG_LEVEL)?
            .set_default("log.dir", DEFAULT_LOG_DIR)?
            .set_default("log.file_prefix", DEFAULT_LOG_FILE_PREFIX)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false));

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        let config = builder
            .add_source(Environment::with_prefix("RBAC").separator("__").try_parsing(true))
            .build()?;

        let mut loaded: AppConfig = config.try_deserialize()?;
        loaded.editor.page_size = loaded.editor.page_size.clamp(1, MAX_PAGE_SIZE);
        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_files() {
        let config = AppConfig::load_from(None).unwrap();
        assert_eq!(config.editor.filter_depth, DEFAULT_FILTER_DEPTH);
        assert_eq!(config.editor.path_scope, "forest");
        assert!(config.editor.tooltip_follows_name);
        assert_eq!(config.log.file_prefix, DEFAULT_LOG_FILE_PREFIX);
    }

    #[test]
    fn test_explicit_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[api]\nbase_url = \"https://fleet.example.com/api\"\ntimeout_secs = 15\n\n\
             [editor]\nfilter_depth = 0\npath_scope = \"siblings\"\npage_size = 500"
        )
        .unwrap();

        let config = AppConfig::load_from(Some(file.path())).unwrap();
        assert_eq!(config.api.base_url, "https://fleet.example.com/api");
        assert_eq!(config.api.timeout_secs, Some(15));
        assert_eq!(config.editor.filter_depth, 0);
        assert_eq!(config.editor.path_scope, "siblings");
        assert_eq!(config.editor.page_size, MAX_PAGE_SIZE);
    }
}
