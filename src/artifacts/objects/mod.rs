//! Git object types and operations
//!
//! Git stores all content as objects identified by SHA-1 hashes. There are four types:
//!
//! - **Blob**: File content (raw bytes)
//! - **Tree**: Directory listing (names, modes, and object IDs)
//! - **Commit**: Snapshot with metadata (author, message, parent commits, tree)
//! - **Tag**: Annotated reference to another object
//!
//! Only blobs are read and written here; the other types are recognised in object
//! headers and rejected as unsupported.
//!
//! All objects share the same decoded form, `<type> <size>\0<content>`, which is
//! hashed to produce the object ID and zlib-compressed to produce the stored form.

pub mod blob;
pub mod error;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 digest in bytes
pub const DIGEST_SIZE: usize = 20;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
