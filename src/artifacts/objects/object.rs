use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::error::ObjectResult;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use std::io::Cursor;
use std::path::PathBuf;

/// A type-tagged unit of stored content
///
/// Implementors compute each derived form at most once and hand out copies,
/// so repeated calls always return the same value.
pub trait Object {
    fn object_type(&self) -> ObjectType;

    /// The uncompressed object: `<type> <size>\0<content>`
    fn decode(&self) -> ObjectResult<Bytes>;

    /// SHA-1 of the decoded form
    fn object_id(&self) -> ObjectResult<ObjectId>;

    /// The zlib-compressed decoded form, as stored on disk
    fn encode(&self) -> ObjectResult<Bytes>;

    fn object_path(&self) -> ObjectResult<PathBuf> {
        Ok(self.object_id()?.to_path())
    }
}

/// An object read back from the database
pub enum ObjectBox {
    Blob(Box<Blob<Cursor<Bytes>>>),
}

impl ObjectBox {
    pub fn as_object(&self) -> &dyn Object {
        match self {
            ObjectBox::Blob(blob) => &**blob,
        }
    }

    /// Release the object's byte source.
    pub fn close(self) {
        match self {
            ObjectBox::Blob(blob) => blob.close(),
        }
    }
}

impl std::fmt::Debug for ObjectBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectBox::Blob(blob) => f.debug_tuple("Blob").field(blob).finish(),
        }
    }
}
