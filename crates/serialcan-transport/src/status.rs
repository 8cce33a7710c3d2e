use std::fmt;

/// Modem control and status line bits as reported by `TIOCMGET`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModemStatus(libc::c_int);

impl ModemStatus {
    /// Wrap raw `TIOCM_*` bits.
    pub fn from_bits(bits: libc::c_int) -> Self {
        Self(bits)
    }

    /// The raw `TIOCM_*` bits.
    pub fn bits(self) -> libc::c_int {
        self.0
    }

    /// Data Terminal Ready.
    pub fn dtr(self) -> bool {
        self.has(libc::TIOCM_DTR)
    }

    /// Request To Send.
    pub fn rts(self) -> bool {
        self.has(libc::TIOCM_RTS)
    }

    /// Clear To Send.
    pub fn cts(self) -> bool {
        self.has(libc::TIOCM_CTS)
    }

    /// Data Set Ready.
    pub fn dsr(self) -> bool {
        self.has(libc::TIOCM_DSR)
    }

    /// Data Carrier Detect.
    pub fn carrier(self) -> bool {
        self.has(libc::TIOCM_CAR)
    }

    /// Ring Indicator.
    pub fn ring(self) -> bool {
        self.has(libc::TIOCM_RNG)
    }

    /// Names of the lines currently asserted, in a fixed order.
    pub fn asserted(self) -> Vec<&'static str> {
        [
            ("DTR", self.dtr()),
            ("RTS", self.rts()),
            ("CTS", self.cts()),
            ("DSR", self.dsr()),
            ("CD", self.carrier()),
            ("RI", self.ring()),
        ]
        .into_iter()
        .filter_map(|(name, set)| set.then_some(name))
        .collect()
    }

    fn has(self, mask: libc::c_int) -> bool {
        self.0 & mask != 0
    }
}

impl fmt::Display for ModemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let asserted = self.asserted();
        if asserted.is_empty() {
            write!(f, "none")
        } else {
            write!(f, "{}", asserted.join("|"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_individual_lines() {
        let status = ModemStatus::from_bits(libc::TIOCM_DTR | libc::TIOCM_CTS);
        assert!(status.dtr());
        assert!(status.cts());
        assert!(!status.rts());
        assert!(!status.dsr());
        assert!(!status.carrier());
        assert!(!status.ring());
    }

    #[test]
    fn display_lists_asserted_lines() {
        let status = ModemStatus::from_bits(libc::TIOCM_RTS | libc::TIOCM_CAR);
        assert_eq!(status.to_string(), "RTS|CD");
        assert_eq!(ModemStatus::default().to_string(), "none");
    }
}
