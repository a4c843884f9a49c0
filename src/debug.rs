//! Log bridge for the regionfonts binary.
//!
//! Routes every `log::` call to `<temp>/regionfonts_debug.log` so output never
//! mixes with the HTML/YAML the CLI prints on stdout. When `RUST_LOG` is set
//! the lines are mirrored to stderr as well.
//!
//! Level precedence: `--log-level` flag, then `RUST_LOG`, then the config
//! file's `log_level` (applied after the config is loaded).

use log::{LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;
use regionfonts_config::LogLevel;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

struct LogBridge {
    file: Mutex<Option<File>>,
    mirror_stderr: bool,
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "[{}] [{:<5}] [{}] {}\n",
            timestamp(),
            record.level(),
            record.target(),
            record.args()
        );
        if let Some(file) = self.file.lock().as_mut() {
            let _ = file.write_all(line.as_bytes());
        }
        if self.mirror_stderr {
            eprint!("{line}");
        }
    }

    fn flush(&self) {
        if let Some(file) = self.file.lock().as_mut() {
            let _ = file.flush();
        }
    }
}

static BRIDGE: OnceLock<LogBridge> = OnceLock::new();
/// Set when the flag or `RUST_LOG` chose the level; config must not override.
static LEVEL_PINNED: AtomicBool = AtomicBool::new(false);

/// Path of the debug log file.
pub fn log_path() -> PathBuf {
    std::env::temp_dir().join("regionfonts_debug.log")
}

fn timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

fn rust_log_level() -> Option<LevelFilter> {
    let value = std::env::var("RUST_LOG").ok()?;
    // Accept plain levels only; module filters fall back to the default.
    value.trim().parse::<LevelFilter>().ok()
}

/// Install the bridge as the global logger.
///
/// `cli_level` comes from `--log-level`. Calling this twice is harmless; the
/// second call only adjusts the level.
pub fn init_log_bridge(cli_level: Option<LogLevel>) {
    let env_level = rust_log_level();
    let level = match (cli_level, env_level) {
        (Some(cli), _) => Some(cli.to_level_filter()),
        (None, Some(env)) => Some(env),
        (None, None) => None,
    };
    LEVEL_PINNED.store(level.is_some(), Ordering::Relaxed);

    let bridge = BRIDGE.get_or_init(|| {
        let file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(log_path())
            .ok();
        LogBridge {
            file: Mutex::new(file),
            mirror_stderr: std::env::var_os("RUST_LOG").is_some(),
        }
    });
    if log::set_logger(bridge).is_err() {
        log::debug!("Logger already installed");
    }
    log::set_max_level(level.unwrap_or(LevelFilter::Info));
}

/// Apply the config file's level unless the flag or `RUST_LOG` already chose one.
pub fn apply_config_level(level: LogLevel) {
    if !LEVEL_PINNED.load(Ordering::Relaxed) {
        log::set_max_level(level.to_level_filter());
    }
}
