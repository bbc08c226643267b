use crate::artifacts::index::entry_kind::EntryKind;

/// Errors raised while decoding or building index data
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("invalid index signature {found:?}, expected \"DIRC\"")]
    InvalidSignature { found: String },

    #[error("unsupported index version {0}")]
    UnsupportedVersion(u32),

    /// The stream ended before a field was fully read.
    #[error("unexpected end of index while reading {field} at offset {offset}")]
    Truncated { field: &'static str, offset: u64 },

    #[error("unknown entry kind {value:#x} in mode word at offset {offset}")]
    UnknownEntryKind { value: u8, offset: u64 },

    #[error("entry name at offset {offset} contains a NUL byte")]
    NulInName { offset: u64 },

    #[error("forbidden permission {permission:03o} for {kind}")]
    ForbiddenPermission { kind: EntryKind, permission: u16 },

    #[error("entry {index} is out of range, the index holds {count} entries")]
    OutOfRange { index: usize, count: u32 },

    #[error("index I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type IndexResult<T> = Result<T, IndexError>;
