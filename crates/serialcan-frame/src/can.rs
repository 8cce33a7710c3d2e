//! CAN identifier and frame layout carried by the fixed form.
//!
//! Block layout:
//! ```text
//! ┌──────────────────┬──────────┬──────────────────┐
//! │ CAN id (4B BE)   │ DLC (1B) │ Data (8B)        │
//! └──────────────────┴──────────┴──────────────────┘
//! ```

use std::fmt;

use crate::fixed::FIXED_FRAME_LEN;

/// Maximum classic CAN data length.
pub const MAX_DATA_LEN: usize = 8;

/// A 32-bit CAN identifier with flag and field accessors.
///
/// The top three bits are the usual extended/remote/error flags. The
/// remaining bits are split by the bus protocol: first/last fragment
/// markers, a 7-bit node address, a system-message flag and, for system
/// messages, a function and a parameter byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CanId(u32);

impl CanId {
    pub const EXTENDED: u32 = 1 << 31;
    pub const REMOTE: u32 = 1 << 30;
    pub const ERROR: u32 = 1 << 29;
    pub const FIRST: u32 = 1 << 28;
    pub const LAST: u32 = 1 << 20;
    pub const SYSTEM: u32 = 1 << 18;

    const NODE_SHIFT: u32 = 21;
    const NODE_MASK: u32 = 0x7F;

    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }

    pub fn is_extended(self) -> bool {
        self.0 & Self::EXTENDED != 0
    }

    pub fn is_remote(self) -> bool {
        self.0 & Self::REMOTE != 0
    }

    pub fn is_error(self) -> bool {
        self.0 & Self::ERROR != 0
    }

    /// First fragment of a message.
    pub fn is_first(self) -> bool {
        self.0 & Self::FIRST != 0
    }

    /// Last fragment of a message.
    pub fn is_last(self) -> bool {
        self.0 & Self::LAST != 0
    }

    pub fn is_system(self) -> bool {
        self.0 & Self::SYSTEM != 0
    }

    /// 7-bit node address.
    pub fn node(self) -> u8 {
        ((self.0 >> Self::NODE_SHIFT) & Self::NODE_MASK) as u8
    }

    /// Same identifier addressed to another node.
    pub fn with_node(self, node: u8) -> Self {
        let cleared = self.0 & !(Self::NODE_MASK << Self::NODE_SHIFT);
        Self(cleared | ((u32::from(node) & Self::NODE_MASK) << Self::NODE_SHIFT))
    }

    /// System function byte (bits 8..16).
    pub fn sys_func(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// System parameter byte (bits 0..8).
    pub fn sys_param(self) -> u8 {
        self.0 as u8
    }
}

impl From<u32> for CanId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for CanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{:08x},n={}", self.0, self.node())?;
        if self.is_first() {
            f.write_str(",first")?;
        }
        if self.is_last() {
            f.write_str(",last")?;
        }
        if self.is_system() {
            write!(f, ",sys={:02x}:{:02x}", self.sys_func(), self.sys_param())?;
        }
        f.write_str(">")
    }
}

/// A classic CAN frame as exchanged in one fixed-form block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CanFrame {
    pub id: CanId,
    /// Data length code as sent; not clamped.
    pub dlc: u8,
    pub data: [u8; MAX_DATA_LEN],
}

impl CanFrame {
    /// Build a frame from up to 8 data bytes; extra bytes are dropped.
    pub fn new(id: CanId, data: &[u8]) -> Self {
        let len = data.len().min(MAX_DATA_LEN);
        let mut buf = [0u8; MAX_DATA_LEN];
        buf[..len].copy_from_slice(&data[..len]);
        Self {
            id,
            dlc: len as u8,
            data: buf,
        }
    }

    /// The data bytes covered by the DLC.
    pub fn payload(&self) -> &[u8] {
        &self.data[..usize::from(self.dlc).min(MAX_DATA_LEN)]
    }

    pub fn to_bytes(&self) -> [u8; FIXED_FRAME_LEN] {
        let mut block = [0u8; FIXED_FRAME_LEN];
        block[..4].copy_from_slice(&self.id.raw().to_be_bytes());
        block[4] = self.dlc;
        block[5..].copy_from_slice(&self.data);
        block
    }

    pub fn from_bytes(block: &[u8; FIXED_FRAME_LEN]) -> Self {
        let mut id = [0u8; 4];
        id.copy_from_slice(&block[..4]);
        let mut data = [0u8; MAX_DATA_LEN];
        data.copy_from_slice(&block[5..]);
        Self {
            id: CanId::new(u32::from_be_bytes(id)),
            dlc: block[4],
            data,
        }
    }
}

impl fmt::Display for CanFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} {}:", self.id, self.dlc)?;
        for byte in self.payload() {
            write!(f, " {byte:02x}")?;
        }
        f.write_str("]")
    }
}
