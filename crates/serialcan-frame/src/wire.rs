use std::io::{ErrorKind, Read, Write};

use crate::error::{FrameError, Result};

/// Write all of `buf`, blocking until the channel takes it or fails.
///
/// Only `Interrupted` is retried. A zero-length write means the channel can
/// take no more and fails the frame.
pub(crate) fn write_full<W: Write + ?Sized>(channel: &mut W, buf: &[u8]) -> Result<()> {
    let mut offset = 0usize;
    while offset < buf.len() {
        match channel.write(&buf[offset..]) {
            Ok(0) => {
                return Err(FrameError::ShortWrite {
                    expected: buf.len(),
                    written: offset,
                })
            }
            Ok(n) => offset += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(FrameError::Io(err)),
        }
    }

    loop {
        match channel.flush() {
            Ok(()) => return Ok(()),
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(FrameError::Io(err)),
        }
    }
}

/// Fill `buf` completely, blocking until enough bytes arrive or the channel
/// reaches end of stream.
pub(crate) fn read_full<R: Read + ?Sized>(channel: &mut R, buf: &mut [u8]) -> Result<()> {
    let mut filled = 0usize;
    while filled < buf.len() {
        match channel.read(&mut buf[filled..]) {
            Ok(0) => {
                return Err(FrameError::ShortRead {
                    expected: buf.len(),
                    read: filled,
                })
            }
            Ok(n) => filled += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(FrameError::Io(err)),
        }
    }
    Ok(())
}
