//! Git index (staging area)
//!
//! The index is Git's staging area that tracks which files should be included in the next commit.
//! It maintains metadata about files including their mode, timestamps, and SHA-1 hashes.
//!
//! ## Index File Format
//!
//! The index file contains:
//! - Header: Signature, version, and entry count
//! - Entries: Tracked paths with metadata, each padded to 8-byte alignment
//!
//! Decoding is read-only and all-or-nothing: the first malformed field aborts the
//! whole decode and no partially built [`Index`] is returned.

use crate::artifacts::index::HEADER_SIZE;
use crate::artifacts::index::error::{IndexError, IndexResult};
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::index::index_header::IndexHeader;
use crate::artifacts::index::index_reader::IndexReader;
use std::io::{BufReader, Read, Seek};
use std::ops::DerefMut;
use std::path::Path;

/// Decoded git index
///
/// Holds the header and exactly `entry_count` entries, in on-disk order.
#[derive(Debug, Clone)]
pub struct Index {
    header: IndexHeader,
    entries: Vec<IndexEntry>,
}

impl Index {
    /// Read and validate the header, rewinding the reader to the start first.
    pub fn decode_header<R: Read + Seek>(reader: &mut IndexReader<R>) -> IndexResult<IndexHeader> {
        IndexHeader::decode(reader)
    }

    /// Decode exactly `count` entries starting right after the header.
    pub fn decode_entries<R: Read + Seek>(
        reader: &mut IndexReader<R>,
        count: u32,
    ) -> IndexResult<Vec<IndexEntry>> {
        reader.seek_to(HEADER_SIZE)?;

        (0..count)
            .map(|_| IndexEntry::decode(reader))
            .collect::<IndexResult<Vec<_>>>()
    }

    /// Decode a whole index from a seekable byte stream.
    pub fn decode<R: Read + Seek>(source: R) -> IndexResult<Self> {
        let mut reader = IndexReader::new(source)?;

        let header = Self::decode_header(&mut reader)?;
        let entries = Self::decode_entries(&mut reader, header.entry_count())?;
        tracing::debug!(entries = entries.len(), "decoded index");

        Ok(Index { header, entries })
    }

    /// Load the index file at `path`
    ///
    /// # Locking
    ///
    /// Acquires a shared lock on the index file during reading.
    pub fn load(path: &Path) -> IndexResult<Self> {
        let mut index_file = std::fs::OpenOptions::new().read(true).open(path)?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Shared, 0, 1)?;

        Self::decode(BufReader::new(lock.deref_mut()))
    }

    pub fn header(&self) -> &IndexHeader {
        &self.header
    }

    /// Look up the entry at `index`, in on-disk order.
    ///
    /// # Returns
    ///
    /// [`IndexError::OutOfRange`] for any `index >= entry_count`
    pub fn entry_at(&self, index: usize) -> IndexResult<&IndexEntry> {
        if index >= self.len() {
            return Err(IndexError::OutOfRange {
                index,
                count: self.header.entry_count(),
            });
        }

        Ok(&self.entries[index])
    }

    pub fn entries(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.header.entry_count() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Display for Index {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.header)?;
        for (position, entry) in self.entries.iter().enumerate() {
            write!(f, "\n[Entry {position}] {entry}")?;
        }

        Ok(())
    }
}
