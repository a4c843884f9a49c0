//! Typed error variants for the regionfonts-config crate.
//!
//! Config loading and the file-backed settings store produce these. The
//! application boundary still works in `anyhow::Result`; callers that care
//! about the failure mode can downcast.
//!
//! # Example
//!
//! ```rust,no_run
//! use regionfonts_config::ConfigError;
//!
//! fn check_load_err(e: &anyhow::Error) {
//!     if let Some(cfg_err) = e.downcast_ref::<ConfigError>() {
//!         match cfg_err {
//!             ConfigError::Io { path, .. } => eprintln!("cannot access {}", path.display()),
//!             ConfigError::Parse { path, .. } => eprintln!("bad YAML in {}", path.display()),
//!             ConfigError::Serialize(e) => eprintln!("cannot encode: {e}"),
//!             ConfigError::Validation(msg) => eprintln!("Validation: {msg}"),
//!         }
//!     }
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing a file failed.
    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file contained YAML that could not be parsed into the expected shape.
    #[error("YAML parse error in '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// A value could not be encoded as YAML.
    #[error("YAML encode error: {0}")]
    Serialize(#[from] serde_yaml_ng::Error),

    /// A field value failed semantic validation.
    ///
    /// The inner string names the field and the reason.
    #[error("Config validation error: {0}")]
    Validation(String),
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, source: serde_yaml_ng::Error) -> Self {
        ConfigError::Parse {
            path: path.into(),
            source,
        }
    }
}
