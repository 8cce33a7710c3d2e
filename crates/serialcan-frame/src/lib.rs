//! CAN frame codecs over a raw serial byte channel.
//!
//! Two wire forms exist, and a deployment uses exactly one of them:
//!
//! - **variable**: the low nibble of the first byte holds the frame length
//!   minus one, so a frame is 1–16 bytes and describes its own length. The
//!   first byte is both the header and the first payload byte.
//! - **fixed**: every frame is exactly 13 bytes (a [`CanFrame`] block).
//!
//! No checksums, no retransmission, no reassembly. A short read or write
//! fails the call and the partial frame is dropped.

pub mod can;
pub mod codec;
pub mod error;
pub mod fixed;
pub mod header;
pub mod reader;
pub mod variable;
mod wire;
pub mod writer;

pub use can::{CanFrame, CanId};
pub use codec::{FrameCodec, FrameForm, UnknownFrameForm};
pub use error::{FrameError, Result};
pub use fixed::{FixedCodec, FIXED_FRAME_LEN};
pub use header::kind_name;
pub use reader::FrameReader;
pub use variable::{frame_len, Frame, VariableCodec, MAX_FRAME_LEN};
pub use writer::FrameWriter;
