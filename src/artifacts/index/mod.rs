//! Git index file format
//!
//! The index (also called staging area or cache) stores information about the working tree.
//! It tracks which paths are staged, together with the stat data and content digest
//! recorded when they were staged.
//!
//! ## File Format (Version 2)
//!
//! All integers are stored in network byte order.
//!
//! ```text
//! Header (12 bytes):
//!   - Signature: "DIRC" (4 bytes)
//!   - Version: 2 (4 bytes)
//!   - Entry count (4 bytes)
//!
//! Entry (62 fixed bytes + name + padding):
//!   - ctime seconds, ctime nanoseconds (4 + 4 bytes)
//!   - mtime seconds, mtime nanoseconds (4 + 4 bytes)
//!   - device, inode (4 + 4 bytes)
//!   - mode (4 bytes): 9 bit permission, 3 unused bits, 4 bit entry kind
//!   - uid, gid, size (4 + 4 + 4 bytes)
//!   - SHA-1 digest (20 bytes)
//!   - flags (2 bytes): 12 bit name length, 2 bit stage, 1 reserved bit, assume-valid
//!   - name (name length bytes)
//!   - 1 to 8 NUL bytes, so that the entry ends on a multiple of 8 from offset 12
//! ```

pub mod bit_fields;
pub mod conflict_stage;
pub mod entry_kind;
pub mod error;
pub mod index_entry;
pub mod index_header;
pub mod index_reader;

#[cfg(test)]
pub(crate) mod test_support;

/// Size of index header in bytes
pub const HEADER_SIZE: u64 = 12; // 4 bytes for signature, 4 for version, 4 for entry count

/// Magic signature identifying index files
pub const SIGNATURE: &[u8; 4] = b"DIRC";

/// Index file format versions this crate can decode
pub const SUPPORTED_VERSIONS: [u32; 1] = [2];
