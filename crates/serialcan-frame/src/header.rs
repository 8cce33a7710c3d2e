//! Header bytes understood by serial CAN adapters.
//!
//! In the variable form the low nibble of the header is the frame length
//! minus one and the high nibble says what the frame is. The codec never
//! looks at the high nibble; these names exist for callers and diagnostics.

/// A CAN packet: header plus 15 bytes.
pub const PACKET: u8 = 0x0F;

/// The adapter accepted the previous request.
pub const SUCCESS: u8 = 0x10;

/// Ask the adapter to reset the bus controller.
pub const REQUEST_SOFT_RESET: u8 = 0x20;

/// Ask the adapter to reset every node on the bus.
pub const REQUEST_HARD_RESET: u8 = 0x30;

/// Ask for bus power readings.
pub const REQUEST_POWER_STATUS: u8 = 0x40;

/// Switch bus power; one parameter byte.
pub const SET_POWER: u8 = 0x51;

/// Switch the bus termination resistor; one parameter byte.
pub const SET_CAN_RES: u8 = 0x61;

/// Ask for adapter debug output; two parameter bytes.
pub const REQUEST_DEBUG: u8 = 0x72;

/// Adapter firmware version report.
pub const VERSION: u8 = 0x80;

/// The adapter rejected the previous request.
pub const FAIL: u8 = 0xE0;

/// The adapter did not recognise the previous request.
pub const COMMAND_UNKNOWN: u8 = 0xF0;

/// The kind nibble of a header byte.
pub fn kind(header: u8) -> u8 {
    header >> 4
}

/// Returns a human-readable name for the kind of a header byte.
pub fn kind_name(header: u8) -> &'static str {
    match kind(header) {
        0x0 => "PACKET",
        0x1 => "SUCCESS",
        0x2 => "REQUEST_SOFT_RESET",
        0x3 => "REQUEST_HARD_RESET",
        0x4 => "REQUEST_POWER_STATUS",
        0x5 => "SET_POWER",
        0x6 => "SET_CAN_RES",
        0x7 => "REQUEST_DEBUG",
        0x8 => "VERSION",
        0xE => "FAIL",
        0xF => "COMMAND_UNKNOWN",
        _ => "UNKNOWN",
    }
}
