use std::fs::File;
use std::io::{Read, Write};
use std::os::fd::{AsFd, AsRawFd, BorrowedFd};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, TransportError};
use crate::line::LineManager;
use crate::status::ModemStatus;
use crate::termios;

/// An open, raw-mode serial channel — implements Read + Write.
///
/// Reads block until at least one byte is available; writes go straight to
/// the device. Dropping the channel releases it on its [`LineManager`].
pub struct SerialChannel {
    file: File,
    line: PathBuf,
    manager: LineManager,
}

impl SerialChannel {
    pub(crate) fn new(file: File, line: PathBuf, manager: LineManager) -> Self {
        Self {
            file,
            line,
            manager,
        }
    }

    /// Canonical path of the line this channel is open on.
    pub fn line(&self) -> &Path {
        &self.line
    }

    /// Query the modem control/status lines.
    pub fn status(&self) -> Result<ModemStatus> {
        termios::modem_bits(self.file.as_raw_fd())
            .map(ModemStatus::from_bits)
            .map_err(TransportError::StatusQuery)
    }

    /// Close the channel, restoring the line if this was its last channel.
    pub fn close(self) {
        debug!(line = ?self.line, "closing serial channel");
        drop(self);
    }
}

impl Read for SerialChannel {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.file.read(buf)
    }
}

impl Write for SerialChannel {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.file.flush()
    }
}

impl AsFd for SerialChannel {
    fn as_fd(&self) -> BorrowedFd<'_> {
        self.file.as_fd()
    }
}

impl Drop for SerialChannel {
    fn drop(&mut self) {
        self.manager.release(&self.line, self.file.as_raw_fd());
    }
}

impl std::fmt::Debug for SerialChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialChannel")
            .field("line", &self.line)
            .finish()
    }
}
