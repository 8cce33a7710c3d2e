use std::fmt;

use crate::error::TransportError;

/// Line speeds the raw-mode configuration knows how to program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BaudRate {
    B9600,
    B19200,
    B38400,
    B57600,
    #[default]
    B115200,
    B230400,
}

impl BaudRate {
    /// Every supported rate, slowest first.
    pub const ALL: [BaudRate; 6] = [
        BaudRate::B9600,
        BaudRate::B19200,
        BaudRate::B38400,
        BaudRate::B57600,
        BaudRate::B115200,
        BaudRate::B230400,
    ];

    /// Bits per second.
    pub fn bits_per_second(self) -> u32 {
        match self {
            BaudRate::B9600 => 9_600,
            BaudRate::B19200 => 19_200,
            BaudRate::B38400 => 38_400,
            BaudRate::B57600 => 57_600,
            BaudRate::B115200 => 115_200,
            BaudRate::B230400 => 230_400,
        }
    }

    /// The termios speed constant for this rate.
    #[cfg(unix)]
    pub(crate) fn as_speed(self) -> libc::speed_t {
        match self {
            BaudRate::B9600 => libc::B9600,
            BaudRate::B19200 => libc::B19200,
            BaudRate::B38400 => libc::B38400,
            BaudRate::B57600 => libc::B57600,
            BaudRate::B115200 => libc::B115200,
            BaudRate::B230400 => libc::B230400,
        }
    }
}

impl TryFrom<u32> for BaudRate {
    type Error = TransportError;

    fn try_from(bps: u32) -> Result<Self, Self::Error> {
        BaudRate::ALL
            .into_iter()
            .find(|rate| rate.bits_per_second() == bps)
            .ok_or(TransportError::UnsupportedBaudRate(bps))
    }
}

impl fmt::Display for BaudRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits_per_second())
    }
}

/// Configuration applied to a line when a channel is opened on it.
#[derive(Debug, Clone)]
pub struct LineConfig {
    /// Input and output speed. Default: 115200.
    pub baud_rate: BaudRate,
    /// Discard unread input and unsent output before switching to raw mode.
    pub flush_on_open: bool,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            baud_rate: BaudRate::default(),
            flush_on_open: true,
        }
    }
}
