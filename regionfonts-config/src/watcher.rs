//! Settings file watcher.
//!
//! Emits a `SettingsChangeEvent` whenever the font settings file is written,
//! so the apply cycle can run again without a restart. Editors often save in
//! several steps, so events are debounced on the trailing edge: one change is
//! reported once the file has been quiet for the debounce window, which means
//! the last write of a burst is always the one seen.

use anyhow::{Context, Result};
use notify::{Config as NotifyConfig, Event, EventKind, PollWatcher, RecursiveMode, Watcher};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, channel};
use std::thread;
use std::time::Duration;

/// The watched settings file changed on disk.
#[derive(Debug, Clone)]
pub struct SettingsChangeEvent {
    pub path: PathBuf,
}

/// Forwards raw notify events that touch the settings file to the debouncer.
#[derive(Clone)]
struct ChangeFilter {
    filename: OsString,
    raw_tx: Sender<()>,
}

impl ChangeFilter {
    fn handle(&self, result: notify::Result<Event>) {
        let Ok(event) = result else {
            return;
        };
        // Create covers editors that save by rename.
        if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
            return;
        }
        let touches_settings = event
            .paths
            .iter()
            .any(|p| p.file_name().is_some_and(|f| f == self.filename));
        if touches_settings {
            // The debouncer only exits once every sender is gone.
            let _ = self.raw_tx.send(());
        }
    }
}

/// Collapse bursts of raw events into one change per quiet period.
///
/// Runs until every raw sender has been dropped, flushing a pending change
/// before exiting.
fn spawn_debouncer(
    raw_rx: Receiver<()>,
    debounce: Duration,
    path: PathBuf,
    tx: Sender<SettingsChangeEvent>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        while raw_rx.recv().is_ok() {
            let disconnected = loop {
                match raw_rx.recv_timeout(debounce) {
                    Ok(()) => log::trace!("Debouncing settings change event"),
                    Err(RecvTimeoutError::Timeout) => break false,
                    Err(RecvTimeoutError::Disconnected) => break true,
                }
            };

            log::info!("Font settings changed: {}", path.display());
            let change = SettingsChangeEvent { path: path.clone() };
            if tx.send(change).is_err() || disconnected {
                break;
            }
        }
        log::debug!("Settings debouncer stopped");
    })
}

/// Watches one settings file and queues change events.
pub struct SettingsWatcher {
    /// Kept alive for as long as watching should continue.
    _watcher: Box<dyn Watcher + Send>,
    events: Receiver<SettingsChangeEvent>,
}

impl std::fmt::Debug for SettingsWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsWatcher").finish_non_exhaustive()
    }
}

impl SettingsWatcher {
    /// Start watching `settings_path`.
    ///
    /// The file must exist. The parent directory is watched non-recursively
    /// so atomic rename-on-save is still seen. Uses the native backend when
    /// available and falls back to a 500 ms `PollWatcher` otherwise.
    pub fn new(settings_path: &Path, debounce_ms: u64) -> Result<Self> {
        if !settings_path.exists() {
            anyhow::bail!("Settings file not found: {}", settings_path.display());
        }
        let path = settings_path
            .canonicalize()
            .unwrap_or_else(|_| settings_path.to_path_buf());
        let filename = path
            .file_name()
            .context("Settings path has no filename")?
            .to_os_string();
        let parent = path
            .parent()
            .context("Settings path has no parent directory")?
            .to_path_buf();

        let (tx, rx) = channel();
        let (raw_tx, raw_rx) = channel();
        spawn_debouncer(raw_rx, Duration::from_millis(debounce_ms), path.clone(), tx);
        let filter = ChangeFilter { filename, raw_tx };

        let mut watcher = Self::create_backend(filter)?;
        watcher
            .watch(&parent, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch directory: {}", parent.display()))?;

        log::info!("Settings hot reload: watching {}", path.display());
        Ok(Self {
            _watcher: watcher,
            events: rx,
        })
    }

    fn create_backend(filter: ChangeFilter) -> Result<Box<dyn Watcher + Send>> {
        let native = filter.clone();
        match notify::recommended_watcher(move |res: notify::Result<Event>| native.handle(res)) {
            Ok(w) => {
                log::debug!("Settings watcher: using native backend");
                Ok(Box::new(w))
            }
            Err(e) => {
                log::warn!(
                    "Settings watcher: native backend unavailable ({}); falling back to PollWatcher",
                    e
                );
                let poll = PollWatcher::new(
                    move |res: notify::Result<Event>| filter.handle(res),
                    NotifyConfig::default().with_poll_interval(Duration::from_millis(500)),
                )
                .context("Failed to create fallback PollWatcher")?;
                Ok(Box::new(poll))
            }
        }
    }

    /// Next pending change, without blocking.
    pub fn try_recv(&self) -> Option<SettingsChangeEvent> {
        self.events.try_recv().ok()
    }

    /// Wait up to `timeout` for the next change.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<SettingsChangeEvent> {
        self.events.recv_timeout(timeout).ok()
    }
}
