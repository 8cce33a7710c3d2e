//! Fixed form: every frame is exactly 13 bytes with no header.
//!
//! Both ends must agree on the form out of band. The block layout used by
//! serial CAN adapters is described by [`CanFrame`].

use std::io::{Read, Write};

use bytes::Bytes;
use tracing::debug;

use crate::can::CanFrame;
use crate::codec::{FrameCodec, FrameForm};
use crate::error::{FrameError, Result};
use crate::wire::{read_full, write_full};

/// Size of every fixed-form frame.
pub const FIXED_FRAME_LEN: usize = 13;

/// Write one 13-byte block (blocking).
pub fn send<W: Write + ?Sized>(channel: &mut W, block: &[u8; FIXED_FRAME_LEN]) -> Result<()> {
    write_full(channel, block)?;
    debug!(frame = %hex::encode(block), "sent fixed frame");
    Ok(())
}

/// Read one 13-byte block (blocking).
pub fn recv<R: Read + ?Sized>(channel: &mut R) -> Result<[u8; FIXED_FRAME_LEN]> {
    let mut block = [0u8; FIXED_FRAME_LEN];
    read_full(channel, &mut block)?;
    debug!(frame = %hex::encode(block), "received fixed frame");
    Ok(block)
}

/// Write a CAN frame as one fixed-form block.
pub fn send_can<W: Write + ?Sized>(channel: &mut W, frame: &CanFrame) -> Result<()> {
    send(channel, &frame.to_bytes())?;
    debug!(%frame, "sent CAN frame");
    Ok(())
}

/// Read one fixed-form block as a CAN frame.
pub fn recv_can<R: Read + ?Sized>(channel: &mut R) -> Result<CanFrame> {
    let frame = CanFrame::from_bytes(&recv(channel)?);
    debug!(%frame, "received CAN frame");
    Ok(frame)
}

/// The fixed form as a [`FrameCodec`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedCodec;

impl FrameCodec for FixedCodec {
    fn form(&self) -> FrameForm {
        FrameForm::Fixed
    }

    fn send<W: Write + ?Sized>(&self, channel: &mut W, payload: &[u8]) -> Result<()> {
        let block = <&[u8; FIXED_FRAME_LEN]>::try_from(payload).map_err(|_| {
            FrameError::InvalidLength {
                size: payload.len(),
                expected: FIXED_FRAME_LEN,
            }
        })?;
        send(channel, block)
    }

    fn recv<R: Read + ?Sized>(&self, channel: &mut R) -> Result<Bytes> {
        recv(channel).map(|block| Bytes::copy_from_slice(&block))
    }
}
