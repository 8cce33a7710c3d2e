use std::fmt;
use std::io::{Read, Write};
use std::str::FromStr;

use bytes::Bytes;

use crate::error::Result;
use crate::fixed::{FixedCodec, FIXED_FRAME_LEN};
use crate::variable::{VariableCodec, MAX_FRAME_LEN};

/// Send and receive whole frames over a borrowed byte channel.
///
/// Both wire forms implement this, and so does [`FrameForm`], which picks
/// one of them at runtime.
pub trait FrameCodec {
    /// Which wire form this codec speaks.
    fn form(&self) -> FrameForm;

    /// Write one frame (blocking).
    fn send<W: Write + ?Sized>(&self, channel: &mut W, payload: &[u8]) -> Result<()>;

    /// Read one frame (blocking).
    fn recv<R: Read + ?Sized>(&self, channel: &mut R) -> Result<Bytes>;
}

/// The wire form a deployment uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameForm {
    /// Length in the low nibble of the first byte, 1–16 bytes.
    #[default]
    Variable,
    /// Always 13 bytes.
    Fixed,
}

impl FrameForm {
    /// Short lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            FrameForm::Variable => "variable",
            FrameForm::Fixed => "fixed",
        }
    }

    /// Largest frame this form can carry.
    pub fn max_frame_len(self) -> usize {
        match self {
            FrameForm::Variable => MAX_FRAME_LEN,
            FrameForm::Fixed => FIXED_FRAME_LEN,
        }
    }
}

impl FrameCodec for FrameForm {
    fn form(&self) -> FrameForm {
        *self
    }

    fn send<W: Write + ?Sized>(&self, channel: &mut W, payload: &[u8]) -> Result<()> {
        match self {
            FrameForm::Variable => VariableCodec.send(channel, payload),
            FrameForm::Fixed => FixedCodec.send(channel, payload),
        }
    }

    fn recv<R: Read + ?Sized>(&self, channel: &mut R) -> Result<Bytes> {
        match self {
            FrameForm::Variable => VariableCodec.recv(channel),
            FrameForm::Fixed => FixedCodec.recv(channel),
        }
    }
}

impl fmt::Display for FrameForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown [`FrameForm`] name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown frame form {0:?} (expected \"variable\" or \"fixed\")")]
pub struct UnknownFrameForm(pub String);

impl FromStr for FrameForm {
    type Err = UnknownFrameForm;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "variable" | "var" => Ok(FrameForm::Variable),
            "fixed" | "fixed13" => Ok(FrameForm::Fixed),
            _ => Err(UnknownFrameForm(s.to_string())),
        }
    }
}
