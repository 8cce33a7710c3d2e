/// Errors that can occur while sending or receiving frames.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// A variable-form frame needs at least its header byte.
    #[error("frame is empty")]
    EmptyFrame,

    /// The payload is longer than the wire form allows.
    #[error("frame too long ({size} bytes, max {max})")]
    FrameTooLong { size: usize, max: usize },

    /// A fixed-form frame must be exactly `expected` bytes.
    #[error("invalid frame length ({size} bytes, expected {expected})")]
    InvalidLength { size: usize, expected: usize },

    /// A frame's header does not match its length.
    #[error("header declares {declared} bytes but the frame holds {available}")]
    HeaderMismatch { declared: usize, available: usize },

    /// The channel accepted fewer bytes than the frame requires.
    #[error("short write ({written} of {expected} bytes)")]
    ShortWrite { expected: usize, written: usize },

    /// The channel ended before the frame was complete.
    #[error("short read ({read} of {expected} bytes)")]
    ShortRead { expected: usize, read: usize },

    /// An I/O error occurred while reading or writing frames.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FrameError>;
