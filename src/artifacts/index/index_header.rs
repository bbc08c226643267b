use crate::artifacts::index::error::{IndexError, IndexResult};
use crate::artifacts::index::index_reader::IndexReader;
use crate::artifacts::index::{SIGNATURE, SUPPORTED_VERSIONS};
use derive_new::new;
use std::io::{Read, Seek};

/// The 12-byte header at the start of every index file
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct IndexHeader {
    signature: [u8; 4],
    version: u32,
    entry_count: u32,
}

impl IndexHeader {
    pub fn signature(&self) -> &[u8; 4] {
        &self.signature
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Number of entries that follow the header, as recorded on disk
    pub fn entry_count(&self) -> u32 {
        self.entry_count
    }

    /// Decode the header from the start of the stream.
    ///
    /// The reader is rewound to offset 0 first, so decoding twice yields the same header.
    /// The signature is checked before the version is read, and the version before the
    /// entry count; the entry count itself is taken as-is.
    pub fn decode<R: Read + Seek>(reader: &mut IndexReader<R>) -> IndexResult<Self> {
        reader.seek_to(0)?;

        let signature = reader.read_array::<4>("signature")?;
        if &signature != SIGNATURE {
            return Err(IndexError::InvalidSignature {
                found: String::from_utf8_lossy(&signature).into_owned(),
            });
        }

        let version = reader.read_u32("version")?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(IndexError::UnsupportedVersion(version));
        }

        let entry_count = reader.read_u32("entry count")?;
        tracing::debug!(version, entry_count, "decoded index header");

        Ok(IndexHeader {
            signature,
            version,
            entry_count,
        })
    }
}

impl std::fmt::Display for IndexHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Signature    : {}",
            String::from_utf8_lossy(&self.signature)
        )?;
        writeln!(f, "Version      : {}", self.version)?;
        write!(f, "Entries      : {}", self.entry_count)
    }
}
