//! Loose object database
//!
//! Objects live at `<objects>/<first two hex digits>/<remaining 38 hex digits>`,
//! each file holding the zlib-compressed decoded object.

use crate::artifacts::objects::DIGEST_SIZE;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::error::{ObjectError, ObjectResult};
use crate::artifacts::objects::object::{Object, ObjectBox};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

// TODO: read packed objects once pack index parsing exists
impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Map a raw 20-byte digest to its loose object file.
    ///
    /// # Returns
    ///
    /// Error if `digest` is not exactly [`DIGEST_SIZE`] bytes long
    pub fn resolve_path(&self, digest: &[u8]) -> ObjectResult<PathBuf> {
        if digest.len() != DIGEST_SIZE {
            return Err(ObjectError::InvalidDigestLength(digest.len()));
        }

        let object_id = ObjectId::try_from_slice(digest)?;
        Ok(self.object_path(&object_id))
    }

    pub fn object_path(&self, object_id: &ObjectId) -> PathBuf {
        self.path.join(object_id.to_path())
    }

    pub fn contains(&self, object_id: &ObjectId) -> bool {
        self.object_path(object_id).is_file()
    }

    /// Read, inflate, and verify the object named by `object_id`.
    ///
    /// The declared size must match the inflated content exactly, and the decoded
    /// object must hash back to `object_id`. Only blobs can be read.
    pub fn read_object(&self, object_id: &ObjectId) -> ObjectResult<ObjectBox> {
        let object_path = self.object_path(object_id);
        tracing::debug!(oid = %object_id, path = %object_path.display(), "reading object");

        let object_content = Self::decompress(std::fs::read(&object_path)?.into())?;
        let mut object_reader = Cursor::new(object_content.clone());
        let (object_type, size) = ObjectType::parse_header(&mut object_reader)?;

        let content = object_content.slice(object_reader.position() as usize..);
        let actual = content.len() as u64;
        if actual < size {
            return Err(ObjectError::Truncated {
                expected: size,
                actual,
            });
        }
        if actual > size {
            return Err(ObjectError::MalformedHeader(format!(
                "declared size {size} but found {actual} content bytes"
            )));
        }

        let object = match object_type {
            ObjectType::Blob => ObjectBox::Blob(Box::new(Blob::from_bytes(content))),
            other => return Err(ObjectError::UnsupportedType(other)),
        };

        let actual_id = object.as_object().object_id()?;
        if actual_id != *object_id {
            tracing::warn!(expected = %object_id, actual = %actual_id, "object hash mismatch");
            return Err(ObjectError::HashMismatch {
                expected: *object_id,
                actual: actual_id,
            });
        }

        Ok(object)
    }

    /// Peek at the object header without verifying the content.
    pub fn object_type(&self, object_id: &ObjectId) -> ObjectResult<ObjectType> {
        let object_content = Self::decompress(std::fs::read(self.object_path(object_id))?.into())?;
        let (object_type, _) = ObjectType::parse_header(&mut Cursor::new(object_content))?;

        Ok(object_type)
    }

    /// Write `object` unless an object with the same ID is already stored.
    pub fn store(&self, object: &impl Object) -> ObjectResult<ObjectId> {
        let object_id = object.object_id()?;
        let object_path = self.object_path(&object_id);

        if object_path.exists() {
            tracing::debug!(oid = %object_id, "object already stored");
            return Ok(object_id);
        }

        // object paths always have a fan-out directory
        let object_dir = object_path.parent().unwrap_or(self.objects_path());
        std::fs::create_dir_all(object_dir)?;
        self.write_object(object_dir, &object_path, &object.encode()?)?;
        tracing::debug!(oid = %object_id, path = %object_path.display(), "stored object");

        Ok(object_id)
    }

    fn write_object(
        &self,
        object_dir: &Path,
        object_path: &Path,
        object_content: &[u8],
    ) -> ObjectResult<()> {
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)?;

        // rename the temp file to the object file to make it atomic
        file.write_all(object_content)
            .and_then(|_| std::fs::rename(&temp_object_path, object_path))
            .inspect_err(|_| {
                // best effort, the write error is the one reported
                let _ = std::fs::remove_file(&temp_object_path);
            })?;

        Ok(())
    }

    fn decompress(data: Bytes) -> ObjectResult<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder.read_to_end(&mut decompressed_content)?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
