//! Raw-mode serial line channels.
//!
//! Opens a serial device, switches it to raw, blocking, 8N1 transport at a
//! fixed baud rate and hands back a [`SerialChannel`] implementing
//! `Read + Write`. Every channel is opened through a [`LineManager`], which
//! remembers the terminal settings a line had before the first channel was
//! opened on it and puts them back when the last channel on that line closes.
//!
//! This is the lowest layer of serialcan. Framing lives in `serialcan-frame`.

pub mod config;
pub mod error;

#[cfg(unix)]
pub mod channel;
#[cfg(unix)]
pub mod line;
#[cfg(unix)]
pub mod status;
#[cfg(unix)]
mod termios;

#[cfg(all(test, target_os = "linux"))]
pub(crate) mod pty;

pub use config::{BaudRate, LineConfig};
pub use error::{Result, TransportError};

#[cfg(unix)]
pub use channel::SerialChannel;
#[cfg(unix)]
pub use line::LineManager;
#[cfg(unix)]
pub use status::ModemStatus;
