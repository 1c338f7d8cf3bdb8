//! Configuration module
//!
//! The service reads a TOML file (default `~/.config/catalog-service/config.toml`).
//! Every section and key is optional; missing values fall back to defaults.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 3001
//!
//! [catalog]
//! data_path = "products.json"
//! default_page_size_all = 50
//! default_page_size_category = 10
//! categories = ["beauty", "groceries", "furniture", "fragrances"]
//!
//! [logging]
//! level = "info"
//! format = "text"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::domain::catalog::{QueryResolver, DEFAULT_PAGE_SIZE_ALL, DEFAULT_PAGE_SIZE_CATEGORY};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// The file could not be read because it does not exist.
    pub fn is_missing_file(&self) -> bool {
        matches!(self, ConfigError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

/// Where the effective configuration came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    File,
    /// No file at the configured path
    Defaults,
}

/// Default location of the configuration file
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("catalog-service")
        .join("config.toml")
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            shutdown_timeout: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// JSON catalog file; `None` keeps products in memory only
    pub data_path: Option<PathBuf>,
    pub default_page_size_all: i64,
    pub default_page_size_category: i64,
    pub max_page_size: Option<i64>,
    pub categories: Vec<String>,
}

impl CatalogConfig {
    pub fn resolver(&self) -> QueryResolver {
        QueryResolver::new(self.default_page_size_all, self.default_page_size_category)
            .with_max_page_size(self.max_page_size)
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            data_path: Some(PathBuf::from("products.json")),
            default_page_size_all: DEFAULT_PAGE_SIZE_ALL,
            default_page_size_category: DEFAULT_PAGE_SIZE_CATEGORY,
            max_page_size: None,
            categories: ["beauty", "groceries", "furniture", "fragrances"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, overridden by `RUST_LOG`
    pub level: String,
    /// `text` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

impl AppConfig {
    /// Load and validate the configuration at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`load`](Self::load), but a missing file yields the defaults.
    /// A file that exists and fails to parse or validate is still an error.
    pub fn load_or_default(path: &Path) -> Result<(Self, ConfigSource), ConfigError> {
        match Self::load(path) {
            Ok(config) => Ok((config, ConfigSource::File)),
            Err(e) if e.is_missing_file() => Ok((Self::default(), ConfigSource::Defaults)),
            Err(e) => Err(e),
        }
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let catalog = &self.catalog;
        if catalog.default_page_size_all <= 0 || catalog.default_page_size_category <= 0 {
            return Err(ConfigError::Invalid(
                "default page sizes must be positive".to_string(),
            ));
        }
        if let Some(max) = catalog.max_page_size {
            if max < catalog.default_page_size_all.max(catalog.default_page_size_category) {
                return Err(ConfigError::Invalid(format!(
                    "max_page_size {} is smaller than a default page size",
                    max
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let cfg = AppConfig::from_toml("").unwrap();
        assert_eq!(cfg.server.port, 3001);
        assert_eq!(cfg.catalog.default_page_size_all, 50);
        assert_eq!(cfg.catalog.default_page_size_category, 10);
        assert_eq!(cfg.logging.level, "info");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = AppConfig::from_toml(
            r#"
            [server]
            port = 8080

            [catalog]
            default_page_size_all = 20
            categories = ["Beauty"]
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.address(), "0.0.0.0:8080");
        assert_eq!(cfg.catalog.default_page_size_all, 20);
        assert_eq!(cfg.catalog.default_page_size_category, 10);
        assert_eq!(cfg.catalog.categories, vec!["Beauty".to_string()]);
    }

    #[test]
    fn rejects_non_positive_page_size() {
        let cfg = AppConfig::from_toml("[catalog]\ndefault_page_size_category = 0").unwrap();
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_max_below_defaults() {
        let cfg = AppConfig::from_toml("[catalog]\nmax_page_size = 20").unwrap();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = AppConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let (cfg, source) = AppConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(source, ConfigSource::Defaults);
        assert_eq!(cfg.server.port, 3001);
    }

    #[test]
    fn invalid_values_are_not_replaced_by_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[catalog]\nmax_page_size = 20\n").unwrap();
        let err = AppConfig::load_or_default(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(!err.is_missing_file());
    }

    #[test]
    fn syntax_errors_are_not_replaced_by_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server\nport = ").unwrap();
        let err = AppConfig::load_or_default(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn existing_file_is_reported_as_file_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 9000\n").unwrap();
        let (cfg, source) = AppConfig::load_or_default(&path).unwrap();
        assert_eq!(source, ConfigSource::File);
        assert_eq!(cfg.server.port, 9000);
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[logging]\nformat = \"json\"\n").unwrap();
        let cfg = AppConfig::load(&path).unwrap();
        assert_eq!(cfg.logging.format, "json");
    }
}
