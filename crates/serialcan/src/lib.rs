//! Exchange CAN frames with serial adapters over raw-mode tty lines.
//!
//! # Crate Structure
//!
//! - [`transport`] — Opening lines in raw mode and restoring them on close
//! - [`frame`] — Variable (self-describing) and fixed 13-byte frame codecs

/// Re-export transport types.
pub mod transport {
    pub use serialcan_transport::*;
}

/// Re-export frame types.
pub mod frame {
    pub use serialcan_frame::*;
}
