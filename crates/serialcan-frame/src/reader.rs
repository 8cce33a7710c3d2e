use std::io::Read;

use bytes::Bytes;

use crate::codec::{FrameCodec, FrameForm};
use crate::error::Result;

/// Reads complete frames from any `Read` channel.
///
/// Callers always get whole frames; a frame cut short by the channel is an
/// error and its bytes are dropped.
pub struct FrameReader<T, C = FrameForm> {
    inner: T,
    codec: C,
}

impl<T: Read> FrameReader<T, FrameForm> {
    /// Create a reader for the variable form.
    pub fn new(inner: T) -> Self {
        Self::with_codec(inner, FrameForm::Variable)
    }
}

impl<T: Read, C: FrameCodec> FrameReader<T, C> {
    /// Create a reader for an explicit codec.
    pub fn with_codec(inner: T, codec: C) -> Self {
        Self { inner, codec }
    }

    /// Read the next complete frame (blocking).
    pub fn read_frame(&mut self) -> Result<Bytes> {
        self.codec.recv(&mut self.inner)
    }

    /// The codec in use.
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Borrow the underlying channel.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying channel.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner channel.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::os::unix::net::UnixStream;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::error::FrameError;
    use crate::fixed::FixedCodec;
    use crate::variable::VariableCodec;
    use crate::writer::FrameWriter;

    #[test]
    fn read_multiple_variable_frames() {
        let wire = vec![0x10, 0x51, 0x01, 0x0F];
        let mut reader = FrameReader::new(Cursor::new(wire));

        assert_eq!(reader.read_frame().unwrap().as_ref(), &[0x10]);
        assert_eq!(reader.read_frame().unwrap().as_ref(), &[0x51, 0x01]);
        let err = reader.read_frame().unwrap_err();
        assert!(matches!(err, FrameError::ShortRead { expected: 16, read: 1 }));
    }

    #[test]
    fn fixed_reader_reads_blocks() {
        let mut wire = vec![1u8; 13];
        wire.extend([2u8; 13]);
        let mut reader = FrameReader::with_codec(Cursor::new(wire), FixedCodec);

        assert_eq!(reader.read_frame().unwrap().as_ref(), &[1u8; 13]);
        assert_eq!(reader.read_frame().unwrap().as_ref(), &[2u8; 13]);
        assert_eq!(reader.codec().form(), FrameForm::Fixed);
    }

    #[test]
    fn connection_closed_cleanly() {
        let mut reader = FrameReader::new(Cursor::new(Vec::<u8>::new()));
        let err = reader.read_frame().unwrap_err();
        assert!(matches!(err, FrameError::ShortRead { expected: 1, read: 0 }));
    }

    #[test]
    fn concurrent_reader_writer_threads() {
        let (left, right) = UnixStream::pair().unwrap();
        let mut writer = FrameWriter::with_codec(left, VariableCodec);
        let reader = Arc::new(Mutex::new(FrameReader::with_codec(right, VariableCodec)));

        let reader_thread = {
            let reader = Arc::clone(&reader);
            std::thread::spawn(move || {
                for i in 0..64u8 {
                    let frame = reader.lock().unwrap().read_frame().unwrap();
                    let len = usize::from(i % 16) + 1;
                    assert_eq!(frame.len(), len);
                    assert_eq!(frame[0] & 0x0F, i % 16);
                }
            })
        };

        for i in 0..64u8 {
            let len = usize::from(i % 16) + 1;
            let mut payload = vec![i; len];
            payload[0] = i % 16;
            writer.send(&payload).unwrap();
        }

        reader_thread.join().unwrap();
    }

    #[test]
    fn accessors_and_into_inner() {
        let mut reader = FrameReader::new(Cursor::new(Vec::<u8>::new()));

        let _ = reader.get_ref();
        let _ = reader.get_mut();
        let _inner = reader.into_inner();
    }
}
