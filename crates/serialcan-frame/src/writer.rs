use std::io::Write;

use crate::codec::{FrameCodec, FrameForm};
use crate::error::Result;

/// Writes complete frames to any `Write` channel.
pub struct FrameWriter<T, C = FrameForm> {
    inner: T,
    codec: C,
}

impl<T: Write> FrameWriter<T, FrameForm> {
    /// Create a writer for the variable form.
    pub fn new(inner: T) -> Self {
        Self::with_codec(inner, FrameForm::Variable)
    }
}

impl<T: Write, C: FrameCodec> FrameWriter<T, C> {
    /// Create a writer for an explicit codec.
    pub fn with_codec(inner: T, codec: C) -> Self {
        Self { inner, codec }
    }

    /// Encode and send one frame (blocking).
    pub fn send(&mut self, payload: &[u8]) -> Result<()> {
        self.codec.send(&mut self.inner, payload)
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

    /// Consume the writer and return the inner channel.
    pub fn into_inner(self) -> T {
        self.inner
    }
}
