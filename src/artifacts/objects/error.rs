use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;

/// Errors raised while building, encoding, or reading objects
#[derive(Debug, thiserror::Error)]
pub enum ObjectError {
    #[error("declared object size {0} is negative")]
    NegativeSize(i64),

    #[error("object digest must be 20 raw bytes, got {0}")]
    InvalidDigestLength(usize),

    #[error("invalid object ID {0:?}")]
    InvalidHex(String),

    /// The byte source holds fewer bytes than the declared size.
    #[error("object content truncated: expected {expected} bytes, found {actual}")]
    Truncated { expected: u64, actual: u64 },

    #[error("malformed object header: {0}")]
    MalformedHeader(String),

    #[error("unknown object type {0:?}")]
    UnknownType(String),

    #[error("reading {0} objects is not supported")]
    UnsupportedType(ObjectType),

    #[error("corrupt object {expected}: content hashes to {actual}")]
    HashMismatch { expected: ObjectId, actual: ObjectId },

    #[error("object I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ObjectResult<T> = Result<T, ObjectError>;
