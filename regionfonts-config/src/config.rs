//! Tool configuration: where settings live and how fonts are requested.

use crate::error::ConfigError;
use crate::store::YamlSettingsStore;
use crate::types::{FontDisplay, LogLevel};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the hosted-font CSS API.
    #[serde(default = "crate::defaults::font_endpoint")]
    pub font_endpoint: String,

    /// `font-display` strategy requested for every family.
    #[serde(default)]
    pub font_display: FontDisplay,

    /// Rebuild the whole document after a settings change instead of
    /// re-applying fonts in place.
    #[serde(default = "crate::defaults::bool_false")]
    pub reload_on_change: bool,

    /// Override for the font settings file location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings_file: Option<PathBuf>,

    /// Debounce window for settings file change events.
    #[serde(default = "crate::defaults::watch_debounce_ms")]
    pub watch_debounce_ms: u64,

    #[serde(default = "crate::defaults::log_level")]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            font_endpoint: crate::defaults::font_endpoint(),
            font_display: FontDisplay::default(),
            reload_on_change: crate::defaults::bool_false(),
            settings_file: None,
            watch_debounce_ms: crate::defaults::watch_debounce_ms(),
            log_level: crate::defaults::log_level(),
        }
    }
}

impl Config {
    /// Load configuration from the default path, creating it when absent.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();
        log::info!("Config path: {:?}", config_path);

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            log::info!(
                "Config file not found, creating default at {:?}",
                config_path
            );
            let config = Self::default();
            if let Err(e) = config.save() {
                log::error!("Failed to save default config: {}", e);
                return Err(e);
            }
            Ok(config)
        }
    }

    /// Load and validate configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        log::info!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let config: Config = if contents.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml_ng::from_str(&contents).map_err(|e| ConfigError::parse(path, e))?
        };
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
        }
        let yaml = serde_yaml_ng::to_string(self).map_err(ConfigError::from)?;
        fs::write(path, yaml).map_err(|e| ConfigError::io(path, e))?;
        Ok(())
    }

    /// Reject values the stylesheet engine cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = url::Url::parse(&self.font_endpoint).map_err(|e| {
            ConfigError::Validation(format!(
                "font_endpoint '{}' is not a valid URL: {e}",
                self.font_endpoint
            ))
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ConfigError::Validation(format!(
                "font_endpoint must use http or https, got '{}'",
                endpoint.scheme()
            )));
        }
        if endpoint.query().is_some() {
            return Err(ConfigError::Validation(
                "font_endpoint must not carry a query string".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the configuration directory path (using XDG convention)
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("regionfonts")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("regionfonts")
            } else {
                PathBuf::from(".")
            }
        }
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Where the font settings mapping is persisted.
    pub fn settings_path(&self) -> PathBuf {
        self.settings_file
            .clone()
            .unwrap_or_else(|| Self::config_dir().join("font-settings.yaml"))
    }

    /// File-backed store at `settings_path()`.
    pub fn settings_store(&self) -> YamlSettingsStore {
        YamlSettingsStore::new(self.settings_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.font_endpoint, "https://fonts.googleapis.com/css2");
        assert_eq!(config.font_display, FontDisplay::Swap);
        assert!(!config.reload_on_change);
        assert!(config.settings_file.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: Config = serde_yaml_ng::from_str("reload_on_change: true\n").unwrap();
        assert!(config.reload_on_change);
        assert_eq!(config.font_display, FontDisplay::Swap);
        assert_eq!(config.watch_debounce_ms, 250);
    }

    #[test]
    fn test_validate_rejects_bad_endpoint() {
        let mut config = Config {
            font_endpoint: "not a url".to_string(),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        config.font_endpoint = "ftp://fonts.example.com/css2".to_string();
        assert!(config.validate().is_err());

        config.font_endpoint = "https://fonts.example.com/css2?family=x".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("config.yaml");
        let config = Config {
            font_display: FontDisplay::Optional,
            settings_file: Some(temp_dir.path().join("fonts.yaml")),
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.settings_path(), temp_dir.path().join("fonts.yaml"));
    }

    #[test]
    fn test_load_from_invalid_endpoint_downcasts() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "font_endpoint: 'mailto:fonts@example.com'\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_default_settings_path_in_config_dir() {
        let config = Config::default();
        assert_eq!(
            config.settings_path(),
            Config::config_dir().join("font-settings.yaml")
        );
    }
}
