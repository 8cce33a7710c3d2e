//! Variable form: the frame length lives in the low nibble of its first byte.
//!
//! Wire format:
//! ```text
//! ┌──────────────────────┬──────────────────────────┐
//! │ Header (1B)          │ Body (0..=15 bytes)      │
//! │ hi: kind, lo: len-1  │                          │
//! └──────────────────────┴──────────────────────────┘
//! ```
//!
//! The header is also the first payload byte. Senders put the length in the
//! buffer themselves; the codec reads it back from there rather than taking
//! it as a separate argument.

use std::io::{Read, Write};

use bytes::Bytes;
use tracing::{debug, warn};

use crate::codec::{FrameCodec, FrameForm};
use crate::error::{FrameError, Result};
use crate::header;
use crate::wire::{read_full, write_full};

/// Longest variable-form frame, header included.
pub const MAX_FRAME_LEN: usize = 16;

const LENGTH_MASK: u8 = 0x0F;

/// Total frame length declared by a header byte (1–16).
pub fn frame_len(header: u8) -> usize {
    usize::from(header & LENGTH_MASK) + 1
}

/// A complete variable-form frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    bytes: Bytes,
}

impl Frame {
    /// Build a frame whose header matches its length exactly.
    pub fn new(bytes: impl Into<Bytes>) -> Result<Self> {
        let bytes = bytes.into();
        let Some(&header) = bytes.first() else {
            return Err(FrameError::EmptyFrame);
        };
        if bytes.len() > MAX_FRAME_LEN {
            return Err(FrameError::FrameTooLong {
                size: bytes.len(),
                max: MAX_FRAME_LEN,
            });
        }
        let declared = frame_len(header);
        if declared != bytes.len() {
            return Err(FrameError::HeaderMismatch {
                declared,
                available: bytes.len(),
            });
        }
        Ok(Self { bytes })
    }

    /// Build a frame from a header kind and a body, filling in the length.
    pub fn with_kind(kind: u8, body: &[u8]) -> Result<Self> {
        if body.len() >= MAX_FRAME_LEN {
            return Err(FrameError::FrameTooLong {
                size: body.len() + 1,
                max: MAX_FRAME_LEN,
            });
        }
        let mut bytes = Vec::with_capacity(body.len() + 1);
        bytes.push((kind & !LENGTH_MASK) | body.len() as u8);
        bytes.extend_from_slice(body);
        Self::new(bytes)
    }

    /// The header byte.
    pub fn header(&self) -> u8 {
        self.bytes[0]
    }

    /// Name of the header kind, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        header::kind_name(self.header())
    }

    /// Bytes following the header.
    pub fn body(&self) -> &[u8] {
        &self.bytes[1..]
    }

    /// Total length including the header.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false; a frame carries at least its header.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The whole frame, header first.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the frame and return its bytes.
    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Send the frame that starts at `payload[0]` (blocking).
///
/// The number of bytes written is taken from the low nibble of
/// `payload[0]`, not from `payload.len()`. Bytes past the declared length
/// are not sent; a header declaring more bytes than supplied is padded with
/// zeros up to the declared length.
pub fn encode_and_send<W: Write + ?Sized>(channel: &mut W, payload: &[u8]) -> Result<()> {
    let Some(&header) = payload.first() else {
        return Err(FrameError::EmptyFrame);
    };
    if payload.len() > MAX_FRAME_LEN {
        return Err(FrameError::FrameTooLong {
            size: payload.len(),
            max: MAX_FRAME_LEN,
        });
    }

    let declared = frame_len(header);
    if declared != payload.len() {
        debug!(
            declared,
            supplied = payload.len(),
            "header length differs from buffer; sending declared length"
        );
    }

    let mut block = [0u8; MAX_FRAME_LEN];
    block[..payload.len()].copy_from_slice(payload);
    let frame = &block[..declared];
    match write_full(channel, frame) {
        Ok(()) => {
            debug!(frame = %hex::encode(frame), "sent serial frame");
            Ok(())
        }
        Err(err) => {
            warn!(frame = %hex::encode(frame), %err, "failed sending serial frame");
            Err(err)
        }
    }
}

/// Receive one frame (blocking).
///
/// Reads the header, then exactly as many further bytes as its low nibble
/// declares. Either read coming up short fails the call.
pub fn recv_and_decode<R: Read + ?Sized>(channel: &mut R) -> Result<Frame> {
    let mut buf = [0u8; MAX_FRAME_LEN];
    read_full(channel, &mut buf[..1])?;

    let len = frame_len(buf[0]);
    read_full(channel, &mut buf[1..len]).map_err(|err| match err {
        FrameError::ShortRead { read, .. } => {
            warn!(header = buf[0], read = read + 1, len, "failed receiving serial frame");
            FrameError::ShortRead {
                expected: len,
                read: read + 1,
            }
        }
        other => other,
    })?;

    debug!(frame = %hex::encode(&buf[..len]), "received serial frame");
    Ok(Frame {
        bytes: Bytes::copy_from_slice(&buf[..len]),
    })
}

/// The variable form as a [`FrameCodec`].
#[derive(Debug, Clone, Copy, Default)]
pub struct VariableCodec;

impl FrameCodec for VariableCodec {
    fn form(&self) -> FrameForm {
        FrameForm::Variable
    }

    fn send<W: Write + ?Sized>(&self, channel: &mut W, payload: &[u8]) -> Result<()> {
        encode_and_send(channel, payload)
    }

    fn recv<R: Read + ?Sized>(&self, channel: &mut R) -> Result<Bytes> {
        recv_and_decode(channel).map(Frame::into_bytes)
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, ErrorKind};
    use std::os::unix::net::UnixStream;

    use super::*;

    fn frame_of_len(len: usize) -> Vec<u8> {
        let mut bytes: Vec<u8> = (0..len as u8).map(|i| i.wrapping_mul(37)).collect();
        bytes[0] = 0xA0 | (len as u8 - 1);
        bytes
    }

    #[test]
    fn roundtrip_every_length_over_socket_pair() {
        let (mut left, mut right) = UnixStream::pair().unwrap();
        for len in 1..=MAX_FRAME_LEN {
            let payload = frame_of_len(len);
            encode_and_send(&mut left, &payload).unwrap();
            let frame = recv_and_decode(&mut right).unwrap();
            assert_eq!(frame.as_bytes(), payload.as_slice(), "length {len}");
        }
    }

    #[test]
    fn single_byte_frame() {
        let mut wire = Cursor::new(Vec::new());
        encode_and_send(&mut wire, &[0x10]).unwrap();
        assert_eq!(wire.get_ref(), &vec![0x10]);

        wire.set_position(0);
        let frame = recv_and_decode(&mut wire).unwrap();
        assert_eq!(frame.len(), 1);
        assert!(frame.body().is_empty());
        assert_eq!(frame.kind_name(), "SUCCESS");
    }

    #[test]
    fn sixteen_byte_frame() {
        let payload = frame_of_len(16);
        assert_eq!(payload[0] & 0x0F, 0x0F);

        let mut wire = Cursor::new(Vec::new());
        encode_and_send(&mut wire, &payload).unwrap();
        assert_eq!(wire.get_ref().len(), 16);

        wire.set_position(0);
        let frame = recv_and_decode(&mut wire).unwrap();
        assert_eq!(frame.len(), 16);
        assert_eq!(wire.position(), 16);
    }

    #[test]
    fn length_comes_from_header_not_buffer() {
        let mut wire = Cursor::new(Vec::new());
        encode_and_send(&mut wire, &[0x51, 0x01, 0xEE, 0xEE]).unwrap();
        assert_eq!(wire.into_inner(), vec![0x51, 0x01]);
    }

    #[test]
    fn header_longer_than_buffer_is_zero_padded() {
        let mut wire = Cursor::new(Vec::new());
        encode_and_send(&mut wire, &[0x03, 0x01]).unwrap();
        assert_eq!(wire.get_ref(), &vec![0x03, 0x01, 0x00, 0x00]);

        wire.set_position(0);
        let frame = recv_and_decode(&mut wire).unwrap();
        assert_eq!(frame.as_bytes(), &[0x03, 0x01, 0x00, 0x00]);
    }

    #[test]
    fn empty_and_oversized_payloads_rejected() {
        let mut wire = Cursor::new(Vec::new());
        assert!(matches!(
            encode_and_send(&mut wire, &[]).unwrap_err(),
            FrameError::EmptyFrame
        ));
        assert!(matches!(
            encode_and_send(&mut wire, &[0x0F; 17]).unwrap_err(),
            FrameError::FrameTooLong { size: 17, max: 16 }
        ));
    }

    #[test]
    fn nothing_to_read_fails_without_payload() {
        let mut wire = Cursor::new(Vec::<u8>::new());
        let err = recv_and_decode(&mut wire).unwrap_err();
        assert!(matches!(
            err,
            FrameError::ShortRead {
                expected: 1,
                read: 0
            }
        ));
    }

    #[test]
    fn channel_closed_mid_frame() {
        let (mut left, mut right) = UnixStream::pair().unwrap();
        std::io::Write::write_all(&mut left, &[0x05, 0xAA]).unwrap();
        drop(left);

        let err = recv_and_decode(&mut right).unwrap_err();
        assert!(matches!(
            err,
            FrameError::ShortRead {
                expected: 6,
                read: 2
            }
        ));
    }

    #[test]
    fn channel_closed_after_header() {
        let mut wire = Cursor::new(vec![0x0F]);
        let err = recv_and_decode(&mut wire).unwrap_err();
        assert!(matches!(
            err,
            FrameError::ShortRead {
                expected: 16,
                read: 1
            }
        ));
    }

    #[test]
    fn back_to_back_frames_split_on_headers() {
        let mut wire = Cursor::new(vec![0x10, 0x51, 0x01, 0x72, 0x01, 0x02]);
        let a = recv_and_decode(&mut wire).unwrap();
        let b = recv_and_decode(&mut wire).unwrap();
        let c = recv_and_decode(&mut wire).unwrap();
        assert_eq!(a.as_bytes(), &[0x10]);
        assert_eq!(b.as_bytes(), &[0x51, 0x01]);
        assert_eq!(c.as_bytes(), &[0x72, 0x01, 0x02]);
    }

    #[test]
    fn write_error_propagates() {
        let err = encode_and_send(&mut BrokenPipe, &[0x10]).unwrap_err();
        assert!(matches!(err, FrameError::Io(e) if e.kind() == ErrorKind::BrokenPipe));
    }

    #[test]
    fn zero_length_write_is_short_write() {
        let err = encode_and_send(&mut FullChannel, &[0x11, 0x22]).unwrap_err();
        assert!(matches!(
            err,
            FrameError::ShortWrite {
                expected: 2,
                written: 0
            }
        ));
    }

    #[test]
    fn interrupted_read_retries() {
        let mut reader = InterruptedThenData {
            interrupted: false,
            inner: Cursor::new(vec![0x61, 0x01]),
        };
        let frame = recv_and_decode(&mut reader).unwrap();
        assert_eq!(frame.as_bytes(), &[0x61, 0x01]);
    }

    #[test]
    fn frame_new_checks_header() {
        assert!(Frame::new(vec![0x51, 0x00]).is_ok());
        assert!(matches!(
            Frame::new(vec![0x52, 0x00]).unwrap_err(),
            FrameError::HeaderMismatch { .. }
        ));
        assert!(matches!(
            Frame::new(Vec::new()).unwrap_err(),
            FrameError::EmptyFrame
        ));
    }

    #[test]
    fn frame_with_kind_fills_length() {
        let frame = Frame::with_kind(crate::header::REQUEST_DEBUG, &[0x01, 0x02]).unwrap();
        assert_eq!(frame.as_bytes(), &[0x72, 0x01, 0x02]);
        assert_eq!(frame.body(), &[0x01, 0x02]);

        let err = Frame::with_kind(0x00, &[0u8; 16]).unwrap_err();
        assert!(matches!(err, FrameError::FrameTooLong { size: 17, .. }));
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    struct FullChannel;

    impl Write for FullChannel {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Ok(0)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    struct InterruptedThenData {
        interrupted: bool,
        inner: Cursor<Vec<u8>>,
    }

    impl Read for InterruptedThenData {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(std::io::Error::from(ErrorKind::Interrupted));
            }
            self.inner.read(buf)
        }
    }
}
