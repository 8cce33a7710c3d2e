use std::collections::HashMap;
use std::fs::OpenOptions;
use std::os::fd::{AsRawFd, RawFd};
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::channel::SerialChannel;
use crate::config::LineConfig;
use crate::error::{Result, TransportError};
use crate::termios;

/// Settings a line had before serialcan first touched it.
struct SavedLine {
    original: libc::termios,
    open_channels: usize,
}

/// Opens serial channels and owns the per-line restoration state.
///
/// The first channel opened on a line snapshots the line's terminal
/// settings. Later channels on the same line share that snapshot and bump a
/// counter; the channel whose close drops the counter to zero writes the
/// snapshot back. Lines are identified by their canonical device path, so a
/// symlink such as `/dev/serial/by-id/...` and its target count as one line.
///
/// Cloning is cheap and clones share the same state. Every channel a process
/// opens on a line must come from one manager or its clones: a second,
/// independent manager would snapshot the already-raw settings and restore
/// those instead.
#[derive(Clone, Default)]
pub struct LineManager {
    config: LineConfig,
    lines: Arc<Mutex<HashMap<PathBuf, SavedLine>>>,
}

impl LineManager {
    /// Create a manager that opens lines with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a manager that opens lines with an explicit configuration.
    pub fn with_config(config: LineConfig) -> Self {
        Self {
            config,
            lines: Arc::default(),
        }
    }

    /// Configuration applied to every channel this manager opens.
    pub fn config(&self) -> &LineConfig {
        &self.config
    }

    /// Open `path` and switch it to raw mode (blocking).
    pub fn open(&self, path: impl AsRef<Path>) -> Result<SerialChannel> {
        let requested = path.as_ref();
        let line = std::fs::canonicalize(requested).unwrap_or_else(|_| requested.to_path_buf());

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(libc::O_NOCTTY)
            .open(&line)
            .map_err(|e| TransportError::Open {
                path: requested.to_path_buf(),
                source: e,
            })?;
        let fd = file.as_raw_fd();
        let configure_err = |e| TransportError::Configure {
            path: requested.to_path_buf(),
            source: e,
        };

        let mut lines = self.lock();
        let current = termios::get_attrs(fd).map_err(configure_err)?;
        let raw = termios::raw_attrs(self.config.baud_rate).map_err(configure_err)?;
        if self.config.flush_on_open {
            termios::flush(fd).map_err(configure_err)?;
        }
        termios::set_attrs(fd, &raw).map_err(configure_err)?;

        let saved = lines.entry(line.clone()).or_insert_with(|| {
            debug!(?line, "saving original terminal settings");
            SavedLine {
                original: current,
                open_channels: 0,
            }
        });
        saved.open_channels += 1;

        info!(
            ?line,
            baud = %self.config.baud_rate,
            open_channels = saved.open_channels,
            "opened serial line in raw mode"
        );

        Ok(SerialChannel::new(file, line, self.clone()))
    }

    /// Number of channels currently open on `path` through this manager.
    pub fn open_channels(&self, path: impl AsRef<Path>) -> usize {
        let requested = path.as_ref();
        let line = std::fs::canonicalize(requested).unwrap_or_else(|_| requested.to_path_buf());
        self.lock()
            .get(&line)
            .map(|saved| saved.open_channels)
            .unwrap_or(0)
    }

    /// Put every tracked line back to its original settings right away.
    ///
    /// Meant for paths that end the process without dropping channels, such
    /// as an interrupt handler. Each line is reopened to apply its snapshot
    /// and then forgotten; channels closed afterwards leave it alone.
    /// Returns how many lines were restored.
    pub fn restore_all(&self) -> usize {
        let mut lines = self.lock();
        let mut restored = 0usize;
        for (line, saved) in lines.drain() {
            let result = OpenOptions::new()
                .read(true)
                .write(true)
                .custom_flags(libc::O_NOCTTY | libc::O_NONBLOCK)
                .open(&line)
                .and_then(|file| termios::set_attrs(file.as_raw_fd(), &saved.original));
            match result {
                Ok(()) => {
                    info!(?line, "restored original terminal settings");
                    restored += 1;
                }
                Err(err) => warn!(?line, %err, "failed to restore terminal settings"),
            }
        }
        restored
    }

    /// Called by a closing channel while its descriptor is still open.
    pub(crate) fn release(&self, line: &Path, fd: RawFd) {
        let mut lines = self.lock();
        let Some(saved) = lines.get_mut(line) else {
            warn!(?line, "released a channel on an untracked line");
            return;
        };

        saved.open_channels = saved.open_channels.saturating_sub(1);
        if saved.open_channels > 0 {
            debug!(
                ?line,
                open_channels = saved.open_channels,
                "channel closed; line still in use"
            );
            return;
        }

        if let Some(saved) = lines.remove(line) {
            match termios::set_attrs(fd, &saved.original) {
                Ok(()) => info!(?line, "restored original terminal settings"),
                Err(err) => warn!(?line, %err, "failed to restore terminal settings"),
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<PathBuf, SavedLine>> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for LineManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineManager")
            .field("config", &self.config)
            .field("lines", &self.lock().len())
            .finish()
    }
}
