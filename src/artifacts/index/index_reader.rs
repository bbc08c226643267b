//! Offset-tracking reader for the index file
//!
//! Every read names the field it is decoding, so that a short read reports
//! which field was cut off and at which absolute byte offset it started.

use crate::artifacts::index::error::{IndexError, IndexResult};
use byteorder::{NetworkEndian, ReadBytesExt};
use std::io::{self, Read, Seek, SeekFrom};

#[derive(Debug)]
pub struct IndexReader<R> {
    inner: R,
    offset: u64,
}

impl<R: Read + Seek> IndexReader<R> {
    /// Wrap a reader, starting from its current position.
    pub fn new(mut inner: R) -> IndexResult<Self> {
        let offset = inner.stream_position()?;
        Ok(IndexReader { inner, offset })
    }

    /// Absolute offset of the next byte to be read
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn seek_to(&mut self, offset: u64) -> IndexResult<()> {
        self.offset = self.inner.seek(SeekFrom::Start(offset))?;
        Ok(())
    }

    pub fn read_u32(&mut self, field: &'static str) -> IndexResult<u32> {
        let value = self
            .inner
            .read_u32::<NetworkEndian>()
            .map_err(|e| self.read_error(e, field))?;
        self.offset += 4;

        Ok(value)
    }

    pub fn read_u16(&mut self, field: &'static str) -> IndexResult<u16> {
        let value = self
            .inner
            .read_u16::<NetworkEndian>()
            .map_err(|e| self.read_error(e, field))?;
        self.offset += 2;

        Ok(value)
    }

    pub fn read_array<const N: usize>(&mut self, field: &'static str) -> IndexResult<[u8; N]> {
        let mut buffer = [0u8; N];
        self.inner
            .read_exact(&mut buffer)
            .map_err(|e| self.read_error(e, field))?;
        self.offset += N as u64;

        Ok(buffer)
    }

    pub fn read_bytes(&mut self, len: usize, field: &'static str) -> IndexResult<Vec<u8>> {
        let mut buffer = vec![0u8; len];
        self.inner
            .read_exact(&mut buffer)
            .map_err(|e| self.read_error(e, field))?;
        self.offset += len as u64;

        Ok(buffer)
    }

    /// Consume up to `len` bytes, stopping quietly at end of stream.
    ///
    /// Returns the number of bytes actually skipped.
    pub fn skip(&mut self, len: u64) -> IndexResult<u64> {
        let skipped = io::copy(&mut self.inner.by_ref().take(len), &mut io::sink())?;
        self.offset += skipped;

        Ok(skipped)
    }

    fn read_error(&self, error: io::Error, field: &'static str) -> IndexError {
        match error.kind() {
            io::ErrorKind::UnexpectedEof => IndexError::Truncated {
                field,
                offset: self.offset,
            },
            _ => IndexError::Io(error),
        }
    }
}
