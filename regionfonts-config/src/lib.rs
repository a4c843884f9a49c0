//! Settings model and configuration for regionfonts.
//!
//! This crate provides the data the font-application engine consumes:
//!
//! - `FontRule` / `FontSettings`: the selector → font mapping and its
//!   normalization rules
//! - `SettingsStore`: the persistence seam, with in-memory and YAML-file stores
//! - The default region catalog shown by the settings form
//! - Tool configuration (`Config`) and its default values
//! - Settings file watching

pub mod config;
pub mod defaults;
pub mod error;
pub mod font_rule;
pub mod regions;
pub mod store;
mod types;
#[cfg(feature = "watcher")]
pub mod watcher;

// Re-export main types for convenience
pub use config::Config;
pub use error::ConfigError;
pub use font_rule::{FontRule, FontSettings};
pub use regions::{DEFAULT_REGIONS, Region};
pub use store::{MemorySettingsStore, SettingsStore, YamlSettingsStore};
pub use types::{FontDisplay, LogLevel};
#[cfg(feature = "watcher")]
pub use watcher::{SettingsChangeEvent, SettingsWatcher};
