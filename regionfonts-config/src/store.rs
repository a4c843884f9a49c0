//! Settings persistence.
//!
//! The stylesheet engine never persists anything itself; it is handed a
//! `FontSettings` snapshot read through a `SettingsStore`.

use crate::error::ConfigError;
use crate::font_rule::FontSettings;
use parking_lot::Mutex;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Key-value persistence for the whole font mapping.
pub trait SettingsStore: Send + Sync {
    /// The persisted mapping, or an empty one when nothing is stored.
    fn get(&self) -> FontSettings;

    /// Replace the entire persisted mapping.
    fn set(&self, settings: FontSettings) -> Result<(), ConfigError>;
}

/// Process-local store, used for embedding and tests.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    settings: Mutex<FontSettings>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: FontSettings) -> Self {
        Self {
            settings: Mutex::new(settings),
        }
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self) -> FontSettings {
        self.settings.lock().clone()
    }

    fn set(&self, settings: FontSettings) -> Result<(), ConfigError> {
        *self.settings.lock() = settings;
        Ok(())
    }
}

/// Store backed by one YAML file holding the selector → rule map.
#[derive(Debug, Clone)]
pub struct YamlSettingsStore {
    path: PathBuf,
}

impl YamlSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Strict read: a missing or blank file is an empty mapping, anything
    /// unreadable or unparsable is an error.
    pub fn load(&self) -> Result<FontSettings, ConfigError> {
        if !self.path.exists() {
            return Ok(FontSettings::new());
        }
        let contents =
            fs::read_to_string(&self.path).map_err(|e| ConfigError::io(&self.path, e))?;
        if contents.trim().is_empty() {
            return Ok(FontSettings::new());
        }
        serde_yaml_ng::from_str(&contents).map_err(|e| ConfigError::parse(&self.path, e))
    }
}

impl SettingsStore for YamlSettingsStore {
    fn get(&self) -> FontSettings {
        match self.load() {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring unreadable font settings: {}", e);
                FontSettings::new()
            }
        }
    }

    /// Writes to a sibling temp file and renames it over the settings file, so
    /// a reader (or the watcher) never sees a truncated mapping.
    fn set(&self, settings: FontSettings) -> Result<(), ConfigError> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
        let yaml = serde_yaml_ng::to_string(&settings)?;

        let mut tmp = NamedTempFile::new_in(parent).map_err(|e| ConfigError::io(parent, e))?;
        tmp.write_all(yaml.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| ConfigError::io(tmp.path(), e))?;
        tmp.persist(&self.path)
            .map_err(|e| ConfigError::io(&self.path, e.error))?;
        log::debug!(
            "Saved {} font rule(s) to {}",
            settings.len(),
            self.path.display()
        );
        Ok(())
    }
}
