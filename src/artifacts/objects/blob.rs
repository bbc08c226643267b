//! Git blob object
//!
//! Blobs store file content in Git. They contain only the raw file data,
//! without any metadata like filename or permissions (those are stored in trees).
//!
//! ## Format
//!
//! Decoded: `blob <size>\0<content>`
//! Encoded: the decoded form, zlib-compressed
//!
//! A [`Blob`] wraps a seekable byte source and a declared size. The decoded bytes,
//! the object ID, and the encoded bytes are each computed on first use and cached
//! for the lifetime of the blob; the byte source is only read while decoding.

use crate::artifacts::objects::error::{ObjectError, ObjectResult};
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use sha1::{Digest, Sha1};
use std::cell::{OnceCell, RefCell};
use std::fs::{File, Metadata};
use std::io::{Cursor, Read, Seek, SeekFrom, Write};
use std::path::Path;

/// Git blob object over a seekable byte source
///
/// The source is owned by the blob and released when the blob is closed or dropped.
/// Caches are single-initialization cells, which keeps a blob on one thread at a time.
pub struct Blob<S = File> {
    source: RefCell<S>,
    size: u64,
    decoded: OnceCell<Bytes>,
    digest: OnceCell<ObjectId>,
    encoded: OnceCell<Bytes>,
}

impl Blob<File> {
    /// Open the file at `path` and use its current length as the declared size.
    pub fn from_path(path: &Path) -> ObjectResult<Self> {
        let file = File::open(path)?;
        let metadata = file.metadata()?;

        Ok(Self::from_file(file, &metadata))
    }

    /// Wrap an open file, sized by `metadata` taken from the same handle.
    pub fn from_file(file: File, metadata: &Metadata) -> Self {
        Self::with_size(file, metadata.len())
    }
}

impl Blob<Cursor<Bytes>> {
    pub fn from_bytes(content: impl Into<Bytes>) -> Self {
        let content = content.into();
        let size = content.len() as u64;

        Self::with_size(Cursor::new(content), size)
    }
}

impl<S: Read + Seek> Blob<S> {
    /// Wrap a byte source holding at least `size` bytes from its start.
    ///
    /// # Returns
    ///
    /// Error if `size` is negative. The source is not touched until the blob is decoded.
    pub fn new(source: S, size: i64) -> ObjectResult<Self> {
        let size = u64::try_from(size).map_err(|_| ObjectError::NegativeSize(size))?;

        Ok(Self::with_size(source, size))
    }

    fn with_size(source: S, size: u64) -> Self {
        Blob {
            source: RefCell::new(source),
            size,
            decoded: OnceCell::new(),
            digest: OnceCell::new(),
            encoded: OnceCell::new(),
        }
    }

    /// Declared content length in bytes
    pub fn size(&self) -> u64 {
        self.size
    }

    /// The raw content, without the object header
    pub fn content(&self) -> ObjectResult<Bytes> {
        let decoded = self.decode()?;
        let header_len = decoded.len() - self.size as usize;

        Ok(decoded.slice(header_len..))
    }

    /// Release the byte source.
    pub fn close(self) {
        drop(self.source.into_inner());
    }

    fn header(&self) -> String {
        format!("{} {}\0", self.object_type(), self.size)
    }

    fn read_content(&self, buffer: &mut Vec<u8>) -> ObjectResult<()> {
        let mut source = self.source.borrow_mut();
        source.seek(SeekFrom::Start(0))?;

        let read = source.by_ref().take(self.size).read_to_end(buffer)? as u64;
        if read < self.size {
            return Err(ObjectError::Truncated {
                expected: self.size,
                actual: read,
            });
        }

        Ok(())
    }
}

impl<S: Read + Seek> Object for Blob<S> {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }

    fn decode(&self) -> ObjectResult<Bytes> {
        if let Some(decoded) = self.decoded.get() {
            return Ok(decoded.clone());
        }

        let mut decoded = self.header().into_bytes();
        self.read_content(&mut decoded)?;
        tracing::trace!(size = self.size, "decoded blob");

        Ok(self.decoded.get_or_init(|| Bytes::from(decoded)).clone())
    }

    fn object_id(&self) -> ObjectResult<ObjectId> {
        if let Some(oid) = self.digest.get() {
            return Ok(*oid);
        }

        let decoded = self.decode()?;
        let digest = ObjectId::try_from_slice(&Sha1::digest(&decoded))?;

        Ok(*self.digest.get_or_init(|| digest))
    }

    fn encode(&self) -> ObjectResult<Bytes> {
        if let Some(encoded) = self.encoded.get() {
            return Ok(encoded.clone());
        }

        let decoded = self.decode()?;
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&decoded)?;
        // finish writes the zlib trailer; without it the stream cannot be inflated
        let encoded = encoder.finish()?;

        Ok(self.encoded.get_or_init(|| Bytes::from(encoded)).clone())
    }
}

impl<S> std::fmt::Debug for Blob<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Blob")
            .field("size", &self.size)
            .field("decoded", &self.decoded.get().is_some())
            .field("digest", &self.digest.get())
            .field("encoded", &self.encoded.get().is_some())
            .finish()
    }
}
