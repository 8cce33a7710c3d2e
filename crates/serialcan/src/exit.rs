use std::fmt;
use std::io;

use serialcan_frame::FrameError;
use serialcan_transport::TransportError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const TRANSPORT_ERROR: i32 = 3;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;
pub const INTERRUPTED: i32 = 130;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::NotFound => TRANSPORT_ERROR,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn transport_error(context: &str, err: TransportError) -> CliError {
    let permission_denied = err
        .io_source()
        .is_some_and(|source| source.kind() == io::ErrorKind::PermissionDenied);
    let code = match err {
        TransportError::UnsupportedBaudRate(_) => USAGE,
        _ if permission_denied => PERMISSION_DENIED,
        _ => TRANSPORT_ERROR,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn frame_error(context: &str, err: FrameError) -> CliError {
    match err {
        FrameError::Io(source) => io_error(context, source),
        FrameError::EmptyFrame
        | FrameError::FrameTooLong { .. }
        | FrameError::InvalidLength { .. }
        | FrameError::HeaderMismatch { .. } => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
        FrameError::ShortRead { .. } | FrameError::ShortWrite { .. } => {
            CliError::new(FAILURE, format!("{context}: {err}"))
        }
    }
}
