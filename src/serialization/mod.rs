//! Consensus Wire Serialization
//!
//! Fixed-layout oracle structures travel as opaque blobs: a u32
//! little-endian length prefix followed by exactly that many raw bytes.
//! The reader exposes a `remaining()` probe and fails cleanly (no partial
//! object) when fewer bytes remain than a structure requires.

use crate::{Error, Result};

/// Decode a u64 from the first eight bytes of `bytes`.
///
/// Callers slice out of fixed-size buffers, so the length is always
/// sufficient by construction.
pub fn read_u64_le(bytes: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes[..8]);
    u64::from_le_bytes(buf)
}

/// Appends length-prefixed blobs to a byte buffer.
#[derive(Debug, Default)]
pub struct BlobWriter {
    buf: Vec<u8>,
}

impl BlobWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Create a writer with preallocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Append one opaque blob: u32 LE length, then the raw bytes.
    pub fn write_blob(&mut self, bytes: &[u8]) {
        self.buf
            .extend_from_slice(&(bytes.len() as u32).to_le_bytes());
        self.buf.extend_from_slice(bytes);
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consume the writer, returning the wire bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// Reads length-prefixed blobs back out of a byte slice.
#[derive(Debug)]
pub struct BlobReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BlobReader<'a> {
    /// Wrap a byte slice for reading.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// True once every byte has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Read one opaque blob whose length must equal `expected`.
    ///
    /// Checks that the prefix and at least `expected` bytes remain before
    /// consuming anything, so a failed read leaves no partial object.
    pub fn read_blob(&mut self, expected: usize) -> Result<&'a [u8]> {
        if self.remaining() < 4 {
            return Err(Error::Serialization(format!(
                "blob header truncated: {} bytes remaining",
                self.remaining()
            )));
        }
        let mut len_bytes = [0u8; 4];
        len_bytes.copy_from_slice(&self.data[self.pos..self.pos + 4]);
        let len = u32::from_le_bytes(len_bytes) as usize;

        if len != expected {
            return Err(Error::Serialization(format!(
                "blob length {} does not match expected {}",
                len, expected
            )));
        }
        if self.remaining() - 4 < len {
            return Err(Error::Serialization(format!(
                "blob body truncated: need {} bytes, {} remaining",
                len,
                self.remaining() - 4
            )));
        }

        let start = self.pos + 4;
        self.pos = start + len;
        Ok(&self.data[start..self.pos])
    }
}
