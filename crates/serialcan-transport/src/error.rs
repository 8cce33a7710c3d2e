use std::path::PathBuf;

/// Errors that can occur while opening or driving a serial line.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The device could not be opened.
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The device was opened but raw mode could not be applied.
    #[error("failed to configure {path}: {source}")]
    Configure {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The modem status ioctl failed.
    #[error("modem status query failed: {0}")]
    StatusQuery(std::io::Error),

    /// The requested baud rate has no termios speed constant.
    #[error("unsupported baud rate {0}")]
    UnsupportedBaudRate(u32),

    /// An I/O error occurred on the channel.
    #[error("serial I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TransportError {
    /// The underlying OS error, if this error wraps one.
    pub fn io_source(&self) -> Option<&std::io::Error> {
        match self {
            TransportError::Open { source, .. } | TransportError::Configure { source, .. } => {
                Some(source)
            }
            TransportError::StatusQuery(source) | TransportError::Io(source) => Some(source),
            TransportError::UnsupportedBaudRate(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, TransportError>;
