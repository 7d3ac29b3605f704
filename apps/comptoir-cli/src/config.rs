//! # CLI Configuration
//!
//! Where the data lives and how the dashboard is presented.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command line (highest priority)                                    │
//! │     --data-dir ./shop                                                  │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     COMPTOIR_DATA_DIR=/srv/comptoir                                    │
//! │     COMPTOIR_LOCALE=en_US                                              │
//! │     COMPTOIR_TOP_SELLERS=10                                            │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config PATH, or                                                  │
//! │     ~/.config/comptoir/comptoir.toml (Linux)                           │
//! │     ~/Library/Application Support/fr.comptoir.comptoir/... (macOS)     │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     platform data dir, fr_FR, top 5                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # comptoir.toml
//! [store]
//! data_dir = "/srv/comptoir"
//! pretty = true
//!
//! [display]
//! locale = "fr_FR"
//!
//! [dashboard]
//! top_sellers = 5
//! ```

use std::path::{Path, PathBuf};

use chrono::Locale;
use comptoir_core::dashboard::DashboardOptions;
use comptoir_core::TOP_SELLERS_LIMIT;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// `[store]`: where records are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSection {
    /// Data directory. Default: the platform data dir.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Pretty-print the JSON records.
    #[serde(default)]
    pub pretty: bool,
}

/// `[display]`: label localisation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySection {
    /// Locale for weekday and date labels (`fr_FR`, `en_US`, ...).
    #[serde(default = "default_locale")]
    pub locale: String,
}

fn default_locale() -> String {
    "fr_FR".to_string()
}

impl Default for DisplaySection {
    fn default() -> Self {
        DisplaySection {
            locale: default_locale(),
        }
    }
}

/// `[dashboard]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSection {
    /// Size of the top sellers ranking.
    #[serde(default = "default_top_sellers")]
    pub top_sellers: usize,
}

fn default_top_sellers() -> usize {
    TOP_SELLERS_LIMIT
}

impl Default for DashboardSection {
    fn default() -> Self {
        DashboardSection {
            top_sellers: default_top_sellers(),
        }
    }
}

// =============================================================================
// AppConfig
// =============================================================================

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreSection,

    #[serde(default)]
    pub display: DisplaySection,

    #[serde(default)]
    pub dashboard: DashboardSection,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (comptoir.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = Self::default();

        let path = config_path
            .map(Path::to_path_buf)
            .or_else(Self::default_config_path);
        if let Some(path) = path {
            if path.exists() {
                info!(?path, "Loading config from file");
                config = Self::from_file(&path)?;
            } else if config_path.is_some() {
                return Err(ConfigError::Io {
                    path,
                    source: std::io::ErrorKind::NotFound.into(),
                });
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<&Path>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        self.locale()?;

        if self.dashboard.top_sellers == 0 {
            return Err(ConfigError::Invalid(
                "dashboard.top_sellers must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = var("COMPTOIR_DATA_DIR") {
            debug!(data_dir = %dir, "Overriding data dir from environment");
            self.store.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(locale) = var("COMPTOIR_LOCALE") {
            debug!(locale = %locale, "Overriding locale from environment");
            self.display.locale = locale;
        }

        if let Some(top) = var("COMPTOIR_TOP_SELLERS") {
            match top.parse::<usize>() {
                Ok(n) => self.dashboard.top_sellers = n,
                Err(_) => warn!(value = %top, "Ignoring invalid COMPTOIR_TOP_SELLERS"),
            }
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("comptoir.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// The data directory: configured, or the platform default.
    pub fn data_dir(&self) -> ConfigResult<PathBuf> {
        match &self.store.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => project_dirs()
                .map(|dirs| dirs.data_dir().to_path_buf())
                .ok_or_else(|| {
                    ConfigError::Invalid("could not determine a data directory".into())
                }),
        }
    }

    pub fn locale(&self) -> ConfigResult<Locale> {
        Locale::try_from(self.display.locale.as_str()).map_err(|_| {
            ConfigError::Invalid(format!("unknown locale '{}'", self.display.locale))
        })
    }

    pub fn dashboard_options(&self) -> ConfigResult<DashboardOptions> {
        Ok(DashboardOptions {
            top_sellers: self.dashboard.top_sellers,
            locale: self.locale()?,
        })
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("fr", "comptoir", "comptoir")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.display.locale, "fr_FR");
        assert_eq!(config.dashboard.top_sellers, 5);
        assert!(config.validate().is_ok());
        assert!(matches!(config.locale(), Ok(Locale::fr_FR)));
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("comptoir.toml");
        std::fs::write(&path, "[display]\nlocale = \"en_US\"\n").unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.display.locale, "en_US");
        assert_eq!(config.dashboard.top_sellers, 5);
        assert_eq!(config.store.data_dir, None);
    }

    #[test]
    fn test_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("comptoir.toml");
        std::fs::write(&path, "[dashboard]\ntop_sellers = \"many\"\n").unwrap();
        assert!(matches!(
            AppConfig::from_file(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load(Some(&dir.path().join("nope.toml")));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("COMPTOIR_DATA_DIR", "/tmp/shop"),
            ("COMPTOIR_LOCALE", "en_US"),
            ("COMPTOIR_TOP_SELLERS", "3"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_overrides(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/tmp/shop"));
        assert!(matches!(config.locale(), Ok(Locale::en_US)));
        assert_eq!(config.dashboard_options().unwrap().top_sellers, 3);
    }

    #[test]
    fn test_invalid_values() {
        let mut config = AppConfig::default();
        config.display.locale = "xx_YY".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.dashboard.top_sellers = 0;
        assert!(config.validate().is_err());
    }
}
